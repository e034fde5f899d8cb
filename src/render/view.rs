//! Sketch display widget
//!
//! This widget hosts one sketch inside an egui layout.
//!
//! ## How it works
//!
//! - The widget takes all available space; its size is the canvas size
//! - Each frame the caller renders a `DisplayList` at that size
//! - The list joins the `Trail`, which fades older frames
//! - Every retained layer is painted with its alpha scaled by its weight
//!
//! ## Coordinate System
//!
//! Canvas coordinates are pixels from the widget's top-left corner, with
//! Y increasing downward, exactly as egui lays out screen space.

use eframe::egui::{self, Color32, Pos2, Rect, Vec2};

use super::canvas::{Color, DisplayList, DrawCommand, Stroke};
use super::trail::Trail;
use crate::geometry::Point2D;

/// Sketch display widget
pub struct SketchView {
    trail: Trail,
}

impl Default for SketchView {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchView {
    pub fn new() -> Self {
        Self {
            trail: Trail::new(),
        }
    }

    /// Draw the widget
    ///
    /// # Arguments
    /// * `ui` - The egui UI context
    /// * `render` - Produces this frame at the given width and height, or
    ///   `None` to keep showing the retained frames
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        render: impl FnOnce(f64, f64) -> Option<DisplayList>,
    ) -> egui::Response {
        let size = ui.available_size().max(Vec2::splat(1.0));
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect;

        if let Some(list) = render(rect.width() as f64, rect.height() as f64) {
            self.trail.push(list);
        }

        painter.rect_filled(rect, 0.0, to_color32(self.trail.background(), 1.0));

        for layer in self.trail.layers() {
            paint_list(&painter, rect, &layer.list, layer.weight);
        }

        response
    }

    /// Drop the retained frames
    pub fn clear_trail(&mut self) {
        self.trail.reset();
    }
}

fn to_color32(color: Color, weight: f32) -> Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a * weight),
    )
}

fn to_stroke(stroke: Stroke, weight: f32) -> egui::Stroke {
    egui::Stroke::new(stroke.width, to_color32(stroke.color, weight))
}

fn to_screen(rect: Rect, point: &Point2D) -> Pos2 {
    Pos2::new(rect.left() + point.x as f32, rect.top() + point.y as f32)
}

fn to_screen_all(rect: Rect, points: &[Point2D]) -> Vec<Pos2> {
    points.iter().map(|p| to_screen(rect, p)).collect()
}

/// Paint one recorded frame
fn paint_list(painter: &egui::Painter, rect: Rect, list: &DisplayList, weight: f32) {
    for command in list.commands() {
        match command {
            // Clears are folded into the trail background
            DrawCommand::Clear(_) => {}

            DrawCommand::StrokePath {
                points,
                closed,
                stroke,
            } => {
                let mut screen = to_screen_all(rect, points);
                let egui_stroke = to_stroke(*stroke, weight);
                match stroke.dash {
                    Some((dash, gap)) => {
                        if let (true, Some(&first)) = (*closed, screen.first()) {
                            screen.push(first);
                        }
                        painter.extend(egui::Shape::dashed_line(&screen, egui_stroke, dash, gap));
                    }
                    None if *closed => {
                        painter.add(egui::Shape::closed_line(screen, egui_stroke));
                    }
                    None => {
                        painter.add(egui::Shape::line(screen, egui_stroke));
                    }
                }
            }

            DrawCommand::FillPath { points, color } => {
                painter.add(egui::Shape::convex_polygon(
                    to_screen_all(rect, points),
                    to_color32(*color, weight),
                    egui::Stroke::NONE,
                ));
            }

            DrawCommand::FillUnder {
                points,
                baseline,
                color,
            } => {
                painter.add(egui::Shape::mesh(fill_under_mesh(
                    rect,
                    points,
                    *baseline,
                    to_color32(*color, weight),
                )));
            }

            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(
                    to_screen(rect, center),
                    *radius as f32,
                    to_color32(*color, weight),
                );
            }

            DrawCommand::StrokeCircle {
                center,
                radius,
                stroke,
            } => {
                painter.circle_stroke(
                    to_screen(rect, center),
                    *radius as f32,
                    to_stroke(*stroke, weight),
                );
            }
        }
    }
}

/// Triangulate the band between a curve and a horizontal baseline
///
/// The area need not be convex, so it is built as one quad per curve
/// segment instead of a single polygon.
fn fill_under_mesh(rect: Rect, points: &[Point2D], baseline: f64, color: Color32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    let base_y = rect.top() + baseline as f32;

    for point in points {
        let top = to_screen(rect, point);
        mesh.colored_vertex(top, color);
        mesh.colored_vertex(Pos2::new(top.x, base_y), color);
    }

    for i in 0..points.len().saturating_sub(1) as u32 {
        let (top, bottom) = (2 * i, 2 * i + 1);
        let (next_top, next_bottom) = (2 * i + 2, 2 * i + 3);
        mesh.add_triangle(top, bottom, next_top);
        mesh.add_triangle(next_top, bottom, next_bottom);
    }

    mesh
}
