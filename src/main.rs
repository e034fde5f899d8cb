//! sketchbook - Generative art sketches
//!
//! A gallery of small animated drawings: a celestial sphere, a wireframe
//! cube, Lissajous figures, waves and a set of tweened shape studies.
//! Every sketch exposes its parameters in the side panel; changes are
//! remembered per sketch across runs.

use std::time::{Duration, Instant};

use eframe::egui;

mod frame;
mod geometry;
mod render;
mod settings;
mod shapes;
mod sketches;
mod tween;

use frame::FrameLoop;
use render::SketchView;
use settings::AppSettings;
use sketches::{Sketch, SketchKind};

/// Minimum time between two writes of the settings file
const SAVE_INTERVAL: Duration = Duration::from_secs(1);

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting sketchbook");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_title("sketchbook"),
        ..Default::default()
    };

    eframe::run_native(
        "sketchbook",
        options,
        Box::new(|cc| Ok(Box::new(SketchApp::new(cc)))),
    )
}

/// Main application state
struct SketchApp {
    settings: AppSettings,
    sketch: Box<dyn Sketch>,
    frame_loop: FrameLoop,
    view: SketchView,

    settings_dirty: bool,
    last_save: Instant,
}

impl SketchApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();
        let sketch = settings.restore(settings.selected_sketch);
        log::info!("Showing {}", sketch.kind().name());

        Self {
            settings,
            sketch,
            frame_loop: FrameLoop::new(),
            view: SketchView::new(),
            settings_dirty: false,
            last_save: Instant::now(),
        }
    }

    /// Swap in another sketch, stashing the current one's configuration
    fn select(&mut self, kind: SketchKind) {
        if kind == self.sketch.kind() {
            return;
        }

        self.settings.store(self.sketch.as_ref());
        self.sketch = self.settings.restore(kind);
        self.settings.selected_sketch = kind;
        self.view.clear_trail();
        self.settings_dirty = true;
        log::info!("Showing {}", kind.name());
    }

    /// Reset the current sketch to its default configuration
    fn reset_sketch(&mut self) {
        let kind = self.sketch.kind();
        self.sketch = kind.create();
        self.settings.store(self.sketch.as_ref());
        self.view.clear_trail();
        self.settings_dirty = true;
    }

    /// Write settings if something changed and the last write is old enough
    fn save_if_due(&mut self) {
        if self.settings_dirty && self.last_save.elapsed() >= SAVE_INTERVAL {
            self.settings.store(self.sketch.as_ref());
            self.settings.save();
            self.settings_dirty = false;
            self.last_save = Instant::now();
        }
    }
}

impl eframe::App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("sketchbook");
                ui.separator();

                let mut selected = self.sketch.kind();
                egui::ComboBox::from_id_salt("sketch_select")
                    .selected_text(selected.name())
                    .show_ui(ui, |ui| {
                        for kind in SketchKind::all() {
                            ui.selectable_value(&mut selected, *kind, kind.name());
                        }
                    });
                if selected != self.sketch.kind() {
                    self.select(selected);
                }

                ui.separator();

                let button_text = if self.frame_loop.is_running() {
                    "⏸ Pause"
                } else {
                    "▶ Play"
                };
                if ui.button(button_text).clicked() {
                    if self.frame_loop.is_running() {
                        self.frame_loop.stop();
                    } else {
                        self.frame_loop.start();
                    }
                }

                ui.separator();
                if ui
                    .toggle_value(&mut self.settings.show_settings, "⚙ Settings")
                    .changed()
                {
                    self.settings_dirty = true;
                }

                ui.separator();
                ui.label(format!("Frame {}", self.frame_loop.frames()));
            });
        });

        // Settings panel
        if self.settings.show_settings {
            egui::SidePanel::left("settings_panel")
                .min_width(240.0)
                .show(ctx, |ui| {
                    ui.heading(self.sketch.kind().name());
                    ui.separator();

                    egui::ScrollArea::vertical().show(ui, |ui| {
                        if render::param_controls(ui, self.sketch.as_mut()) {
                            self.settings_dirty = true;
                        }

                        ui.separator();
                        if ui.button("Reset to defaults").clicked() {
                            self.reset_sketch();
                        }
                    });
                });
        }

        // Main sketch display
        let dt = ctx.input(|i| i.stable_dt) as f64;
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let sketch = self.sketch.as_mut();
                let frame_loop = &mut self.frame_loop;
                self.view
                    .show(ui, |width, height| frame_loop.step(sketch, dt, width, height));
            });

        self.save_if_due();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.store(self.sketch.as_ref());
        self.settings.save();
    }
}
