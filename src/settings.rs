use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sketches::{Sketch, SketchKind};

/// Returns the path to the settings file: `~/.config/sketchbook/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sketchbook");
    path.push("settings.json");
    path
}

/// Persisted application settings.
///
/// Serialized as JSON to the platform config directory. Each sketch's
/// configuration is stored under its key as plain JSON, so a sketch that
/// gains a parameter still loads older files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub selected_sketch: SketchKind,
    pub show_settings: bool,
    pub sketches: BTreeMap<String, Value>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            selected_sketch: SketchKind::default(),
            show_settings: true,
            sketches: BTreeMap::new(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Failed to write settings: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Remember the current configuration of `sketch`
    pub fn store(&mut self, sketch: &dyn Sketch) {
        match sketch.config() {
            Ok(config) => {
                self.sketches.insert(sketch.kind().key().to_string(), config);
            }
            Err(e) => log::warn!("Failed to capture {} settings: {}", sketch.kind().name(), e),
        }
    }

    /// Build a sketch of `kind`, restoring its stored configuration if any
    pub fn restore(&self, kind: SketchKind) -> Box<dyn Sketch> {
        let mut sketch = kind.create();
        if let Some(config) = self.sketches.get(kind.key()) {
            if let Err(e) = sketch.load_config(config.clone()) {
                log::warn!("Ignoring stored {} settings: {}", kind.name(), e);
                sketch = kind.create();
            }
        }
        sketch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketches::ParamValue;

    #[test]
    fn test_store_and_restore() {
        let mut settings = AppSettings::default();
        let mut sketch = SketchKind::Waves.create();
        sketch.set_param("wave_count", ParamValue::Int(3)).unwrap();
        settings.store(sketch.as_ref());

        let restored = settings.restore(SketchKind::Waves);
        assert_eq!(restored.param("wave_count").unwrap(), ParamValue::Int(3));
    }

    #[test]
    fn test_restore_without_entry_uses_defaults() {
        let settings = AppSettings::default();
        let sketch = settings.restore(SketchKind::Rectangles);
        assert_eq!(sketch.kind(), SketchKind::Rectangles);
    }

    #[test]
    fn test_bad_entry_falls_back() {
        let mut settings = AppSettings::default();
        settings
            .sketches
            .insert("waves".into(), serde_json::json!({ "wave_count": "many" }));

        let sketch = settings.restore(SketchKind::Waves);
        assert_eq!(
            sketch.param("wave_count").unwrap(),
            SketchKind::Waves.create().param("wave_count").unwrap()
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = AppSettings {
            selected_sketch: SketchKind::Grid,
            show_settings: false,
            ..Default::default()
        };
        settings.store(SketchKind::Grid.create().as_ref());

        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_missing_fields_default() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AppSettings::default());
    }
}
