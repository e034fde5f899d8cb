//! Drawing surface
//!
//! Sketches draw through the `Canvas` trait in screen pixels with the
//! origin at the top-left corner. `DisplayList` records the calls so a frame
//! can be inspected in tests and replayed by the view.

use crate::geometry::Point2D;

/// RGBA color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Color from hue in degrees (any value, wrapped) and saturation and
    /// lightness in percent
    pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self::hsla(hue, saturation, lightness, 1.0)
    }

    pub fn hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;

        Self {
            r: (r + m) as f32,
            g: (g + m) as f32,
            b: (b + m) as f32,
            a: alpha.clamp(0.0, 1.0) as f32,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Paint `over` on top of this color
    pub fn blend(self, over: Color) -> Self {
        let t = over.a;
        Self {
            r: self.r + (over.r - self.r) * t,
            g: self.g + (over.g - self.g) * t,
            b: self.b + (over.b - self.b) * t,
            a: self.a + (1.0 - self.a) * t,
        }
    }
}

/// Line style
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
    /// Dash and gap lengths in pixels
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    pub fn new(width: f64, color: Color) -> Self {
        Self {
            width: width as f32,
            color,
            dash: None,
        }
    }

    pub fn dashed(self, dash: f32, gap: f32) -> Self {
        Self {
            dash: Some((dash, gap)),
            ..self
        }
    }
}

/// A 2D drawing surface
pub trait Canvas {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    /// Paint the whole surface; a translucent color fades what is already there
    fn clear(&mut self, color: Color);

    fn stroke_path(&mut self, points: &[Point2D], closed: bool, stroke: Stroke);

    /// Fill a convex polygon
    fn fill_path(&mut self, points: &[Point2D], color: Color);

    /// Fill the area between a curve and the horizontal line `y = baseline`
    fn fill_under(&mut self, points: &[Point2D], baseline: f64, color: Color);

    fn fill_circle(&mut self, center: Point2D, radius: f64, color: Color);

    fn stroke_circle(&mut self, center: Point2D, radius: f64, stroke: Stroke);
}

/// One recorded drawing call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    StrokePath {
        points: Vec<Point2D>,
        closed: bool,
        stroke: Stroke,
    },
    FillPath {
        points: Vec<Point2D>,
        color: Color,
    },
    FillUnder {
        points: Vec<Point2D>,
        baseline: f64,
        color: Color,
    },
    FillCircle {
        center: Point2D,
        radius: f64,
        color: Color,
    },
    StrokeCircle {
        center: Point2D,
        radius: f64,
        stroke: Stroke,
    },
}

/// A recorded frame
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Color of the first clear in this frame, if any
    pub fn clear_color(&self) -> Option<Color> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::Clear(color) => Some(*color),
            _ => None,
        })
    }

    /// All stroked paths, in drawing order
    pub fn strokes(&self) -> impl Iterator<Item = (&[Point2D], Stroke)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::StrokePath { points, stroke, .. } => Some((points.as_slice(), *stroke)),
            _ => None,
        })
    }
}

impl Canvas for DisplayList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn stroke_path(&mut self, points: &[Point2D], closed: bool, stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::StrokePath {
            points: points.to_vec(),
            closed,
            stroke,
        });
    }

    fn fill_path(&mut self, points: &[Point2D], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::FillPath {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_under(&mut self, points: &[Point2D], baseline: f64, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::FillUnder {
            points: points.to_vec(),
            baseline,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point2D, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point2D, radius: f64, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke,
        });
    }
}
