//! Tunable parameters
//!
//! Each sketch keeps its configuration in a plain serde struct. The panel
//! sees that struct as a flat map of named values described by a static
//! table of `ParamSpec`s; reads and writes go through the struct's JSON
//! form, so a sketch only has to list its parameters.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParamError {
    #[error("Unknown parameter: {0}")]
    Unknown(String),

    #[error("Parameter {key} expects {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Unknown choice {value:?} for parameter {key}")]
    UnknownChoice { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Control shown for a parameter
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamKind {
    Float { min: f64, max: f64, step: f64 },
    Int { min: i64, max: i64 },
    Toggle,
    Choice(&'static [&'static str]),
}

impl ParamKind {
    fn expects(&self) -> &'static str {
        match self {
            ParamKind::Float { .. } => "a number",
            ParamKind::Int { .. } => "an integer",
            ParamKind::Toggle => "a boolean",
            ParamKind::Choice(_) => "a choice",
        }
    }
}

/// Describes one tunable parameter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    /// Field name in the configuration struct
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub const fn float(key: &'static str, label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Float { min, max, step },
        }
    }

    pub const fn int(key: &'static str, label: &'static str, min: i64, max: i64) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Int { min, max },
        }
    }

    pub const fn toggle(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Toggle,
        }
    }

    pub const fn choice(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Choice(options),
        }
    }
}

/// A parameter value as the panel sees it
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Choice(String),
}

fn find<'a>(specs: &'a [ParamSpec], key: &str) -> Result<&'a ParamSpec, ParamError> {
    specs
        .iter()
        .find(|spec| spec.key == key)
        .ok_or_else(|| ParamError::Unknown(key.to_string()))
}

/// Read one parameter from a configuration struct
pub fn read<C: Serialize>(specs: &[ParamSpec], config: &C, key: &str) -> Result<ParamValue, ParamError> {
    let spec = find(specs, key)?;
    let json = serde_json::to_value(config)?;
    let field = json
        .get(key)
        .ok_or_else(|| ParamError::Unknown(key.to_string()))?;

    let value = match spec.kind {
        ParamKind::Float { .. } => field.as_f64().map(ParamValue::Float),
        ParamKind::Int { .. } => field.as_i64().map(ParamValue::Int),
        ParamKind::Toggle => field.as_bool().map(ParamValue::Bool),
        ParamKind::Choice(_) => field.as_str().map(|s| ParamValue::Choice(s.to_string())),
    };

    value.ok_or_else(|| ParamError::TypeMismatch {
        key: key.to_string(),
        expected: spec.kind.expects(),
    })
}

/// Write one parameter into a configuration struct
///
/// Integers and floats convert into each other (floats round); anything
/// else must match the parameter's kind. On error the struct is unchanged.
pub fn write<C: Serialize + DeserializeOwned>(
    specs: &[ParamSpec],
    config: &mut C,
    key: &str,
    value: ParamValue,
) -> Result<(), ParamError> {
    let spec = find(specs, key)?;
    let mismatch = || ParamError::TypeMismatch {
        key: key.to_string(),
        expected: spec.kind.expects(),
    };

    let coerced = match (spec.kind, value) {
        (ParamKind::Float { .. }, ParamValue::Float(v)) => Value::from(v),
        (ParamKind::Float { .. }, ParamValue::Int(v)) => Value::from(v as f64),
        (ParamKind::Int { .. }, ParamValue::Int(v)) => Value::from(v),
        (ParamKind::Int { .. }, ParamValue::Float(v)) => Value::from(v.round() as i64),
        (ParamKind::Toggle, ParamValue::Bool(b)) => Value::from(b),
        (ParamKind::Choice(options), ParamValue::Choice(choice)) => {
            if !options.contains(&choice.as_str()) {
                return Err(ParamError::UnknownChoice {
                    key: key.to_string(),
                    value: choice,
                });
            }
            Value::from(choice)
        }
        _ => return Err(mismatch()),
    };

    let mut json = serde_json::to_value(&*config)?;
    json.as_object_mut().ok_or_else(mismatch)?.insert(key.to_string(), coerced);
    *config = serde_json::from_value(json)?;
    Ok(())
}

/// Build a configuration from stored JSON; missing fields take defaults
pub fn load<C: DeserializeOwned>(json: Value) -> Result<C, ParamError> {
    Ok(serde_json::from_value(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Demo {
        speed: f64,
        count: u32,
        fill: bool,
        mode: String,
    }

    impl Default for Demo {
        fn default() -> Self {
            Self {
                speed: 0.02,
                count: 5,
                fill: true,
                mode: "wave".to_string(),
            }
        }
    }

    const PARAMS: &[ParamSpec] = &[
        ParamSpec::float("speed", "Speed", 0.001, 0.1, 0.001),
        ParamSpec::int("count", "Count", 1, 20),
        ParamSpec::toggle("fill", "Fill"),
        ParamSpec::choice("mode", "Mode", &["wave", "spiral"]),
    ];

    #[test]
    fn test_read() {
        let demo = Demo::default();
        assert_eq!(read(PARAMS, &demo, "speed").unwrap(), ParamValue::Float(0.02));
        assert_eq!(read(PARAMS, &demo, "count").unwrap(), ParamValue::Int(5));
        assert_eq!(read(PARAMS, &demo, "fill").unwrap(), ParamValue::Bool(true));
        assert_eq!(
            read(PARAMS, &demo, "mode").unwrap(),
            ParamValue::Choice("wave".to_string())
        );
    }

    #[test]
    fn test_write_and_coerce() {
        let mut demo = Demo::default();
        write(PARAMS, &mut demo, "speed", ParamValue::Float(0.05)).unwrap();
        write(PARAMS, &mut demo, "count", ParamValue::Float(7.6)).unwrap();
        write(PARAMS, &mut demo, "mode", ParamValue::Choice("spiral".to_string())).unwrap();

        assert_eq!(demo.speed, 0.05);
        assert_eq!(demo.count, 8);
        assert_eq!(demo.mode, "spiral");
    }

    #[test]
    fn test_write_errors_leave_config_unchanged() {
        let mut demo = Demo::default();

        assert!(matches!(
            write(PARAMS, &mut demo, "nope", ParamValue::Bool(true)),
            Err(ParamError::Unknown(_))
        ));
        assert!(matches!(
            write(PARAMS, &mut demo, "fill", ParamValue::Float(1.0)),
            Err(ParamError::TypeMismatch { .. })
        ));
        assert!(matches!(
            write(PARAMS, &mut demo, "mode", ParamValue::Choice("zigzag".to_string())),
            Err(ParamError::UnknownChoice { .. })
        ));
        assert!(matches!(
            write(PARAMS, &mut demo, "count", ParamValue::Int(-1)),
            Err(ParamError::Invalid(_))
        ));

        assert_eq!(demo, Demo::default());
    }

    #[test]
    fn test_load_partial() {
        let demo: Demo = load(serde_json::json!({ "count": 12 })).unwrap();
        assert_eq!(demo.count, 12);
        assert_eq!(demo.speed, 0.02);
    }
}
