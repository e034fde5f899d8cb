//! Parameter panel
//!
//! Builds egui controls from a sketch's `ParamSpec` table: sliders for
//! numbers, checkboxes for toggles and combo boxes for choices.

use eframe::egui;

use crate::sketches::{ParamKind, ParamSpec, ParamValue, Sketch};

/// Show every parameter of `sketch`; returns true if any value changed
pub fn param_controls(ui: &mut egui::Ui, sketch: &mut dyn Sketch) -> bool {
    let mut changed = false;

    for spec in sketch.params() {
        let current = match sketch.param(spec.key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Cannot read {}: {}", spec.key, e);
                continue;
            }
        };

        if let Some(value) = control(ui, spec, current) {
            match sketch.set_param(spec.key, value) {
                Ok(()) => changed = true,
                Err(e) => log::warn!("Rejected {}: {}", spec.key, e),
            }
        }
    }

    changed
}

/// Draw one control; returns the new value if the user changed it
fn control(ui: &mut egui::Ui, spec: &ParamSpec, current: ParamValue) -> Option<ParamValue> {
    match (spec.kind, current) {
        (ParamKind::Float { min, max, step }, ParamValue::Float(mut value)) => ui
            .add(
                egui::Slider::new(&mut value, min..=max)
                    .text(spec.label)
                    .step_by(step),
            )
            .changed()
            .then_some(ParamValue::Float(value)),

        (ParamKind::Int { min, max }, ParamValue::Int(mut value)) => ui
            .add(egui::Slider::new(&mut value, min..=max).text(spec.label))
            .changed()
            .then_some(ParamValue::Int(value)),

        (ParamKind::Toggle, ParamValue::Bool(mut value)) => ui
            .checkbox(&mut value, spec.label)
            .changed()
            .then_some(ParamValue::Bool(value)),

        (ParamKind::Choice(options), ParamValue::Choice(selected)) => {
            let mut picked = None;
            egui::ComboBox::from_label(spec.label)
                .selected_text(selected.as_str())
                .show_ui(ui, |ui| {
                    for option in options {
                        if ui.selectable_label(selected == *option, *option).clicked()
                            && selected != *option
                        {
                            picked = Some(ParamValue::Choice(option.to_string()));
                        }
                    }
                });
            picked
        }

        (_, value) => {
            log::warn!("Parameter {} has unexpected value {:?}", spec.key, value);
            None
        }
    }
}
