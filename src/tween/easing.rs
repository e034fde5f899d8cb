//! Easing curves
//!
//! An easing maps normalized progress in `[0, 1]` to eased progress. Every
//! curve starts at 0 and ends at 1; back and elastic curves overshoot in
//! between. Curves are named the way animation presets usually name them,
//! e.g. `"power2.inOut"` or `"elastic.out"`.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Overshoot used by the back curves
const BACK_OVERSHOOT: f64 = 1.70158;
/// Period of `elastic.in` / `elastic.out`
const ELASTIC_PERIOD: f64 = 0.3;
/// Period of `elastic.inOut`
const ELASTIC_IN_OUT_PERIOD: f64 = 0.45;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown easing: {0}")]
pub struct ParseEasingError(pub String);

/// Named easing curves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Easing {
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "power1.in")]
    Power1In,
    #[serde(rename = "power1.out")]
    Power1Out,
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    #[serde(rename = "power2.in")]
    Power2In,
    #[serde(rename = "power2.out")]
    Power2Out,
    #[default]
    #[serde(rename = "power2.inOut")]
    Power2InOut,
    #[serde(rename = "power3.in")]
    Power3In,
    #[serde(rename = "power3.out")]
    Power3Out,
    #[serde(rename = "power3.inOut")]
    Power3InOut,
    #[serde(rename = "sine.in")]
    SineIn,
    #[serde(rename = "sine.out")]
    SineOut,
    #[serde(rename = "sine.inOut")]
    SineInOut,
    #[serde(rename = "back.in")]
    BackIn,
    #[serde(rename = "back.out")]
    BackOut,
    #[serde(rename = "back.inOut")]
    BackInOut,
    #[serde(rename = "elastic.in")]
    ElasticIn,
    #[serde(rename = "elastic.out")]
    ElasticOut,
    #[serde(rename = "elastic.inOut")]
    ElasticInOut,
    #[serde(rename = "bounce.in")]
    BounceIn,
    #[serde(rename = "bounce.out")]
    BounceOut,
    #[serde(rename = "bounce.inOut")]
    BounceInOut,
}

impl Easing {
    /// Get all easing curves
    pub fn all() -> &'static [Easing] {
        &[
            Easing::Linear,
            Easing::Power1In,
            Easing::Power1Out,
            Easing::Power1InOut,
            Easing::Power2In,
            Easing::Power2Out,
            Easing::Power2InOut,
            Easing::Power3In,
            Easing::Power3Out,
            Easing::Power3InOut,
            Easing::SineIn,
            Easing::SineOut,
            Easing::SineInOut,
            Easing::BackIn,
            Easing::BackOut,
            Easing::BackInOut,
            Easing::ElasticIn,
            Easing::ElasticOut,
            Easing::ElasticInOut,
            Easing::BounceIn,
            Easing::BounceOut,
            Easing::BounceInOut,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Power1In => "power1.in",
            Easing::Power1Out => "power1.out",
            Easing::Power1InOut => "power1.inOut",
            Easing::Power2In => "power2.in",
            Easing::Power2Out => "power2.out",
            Easing::Power2InOut => "power2.inOut",
            Easing::Power3In => "power3.in",
            Easing::Power3Out => "power3.out",
            Easing::Power3InOut => "power3.inOut",
            Easing::SineIn => "sine.in",
            Easing::SineOut => "sine.out",
            Easing::SineInOut => "sine.inOut",
            Easing::BackIn => "back.in",
            Easing::BackOut => "back.out",
            Easing::BackInOut => "back.inOut",
            Easing::ElasticIn => "elastic.in",
            Easing::ElasticOut => "elastic.out",
            Easing::ElasticInOut => "elastic.inOut",
            Easing::BounceIn => "bounce.in",
            Easing::BounceOut => "bounce.out",
            Easing::BounceInOut => "bounce.inOut",
        }
    }

    /// Map progress (clamped to 0.0..=1.0) to eased progress
    pub fn apply(&self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,

            Easing::Power1In => power_in(p, 2),
            Easing::Power1Out => out_from_in(p, |q| power_in(q, 2)),
            Easing::Power1InOut => in_out_from_in(p, |q| power_in(q, 2)),
            Easing::Power2In => power_in(p, 3),
            Easing::Power2Out => out_from_in(p, |q| power_in(q, 3)),
            Easing::Power2InOut => in_out_from_in(p, |q| power_in(q, 3)),
            Easing::Power3In => power_in(p, 4),
            Easing::Power3Out => out_from_in(p, |q| power_in(q, 4)),
            Easing::Power3InOut => in_out_from_in(p, |q| power_in(q, 4)),

            Easing::SineIn => 1.0 - (p * PI / 2.0).cos(),
            Easing::SineOut => (p * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * p).cos() - 1.0) / 2.0,

            Easing::BackIn => back_in(p),
            Easing::BackOut => out_from_in(p, back_in),
            Easing::BackInOut => in_out_from_in(p, back_in),

            Easing::ElasticIn => 1.0 - elastic_out(1.0 - p, ELASTIC_PERIOD),
            Easing::ElasticOut => elastic_out(p, ELASTIC_PERIOD),
            Easing::ElasticInOut => {
                in_out_from_out(p, |q| elastic_out(q, ELASTIC_IN_OUT_PERIOD))
            }

            Easing::BounceIn => 1.0 - bounce_out(1.0 - p),
            Easing::BounceOut => bounce_out(p),
            Easing::BounceInOut => in_out_from_out(p, bounce_out),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "none" is an alias some presets use for linear
        if s == "none" {
            return Ok(Easing::Linear);
        }
        Easing::all()
            .iter()
            .copied()
            .find(|easing| easing.name() == s)
            .ok_or_else(|| ParseEasingError(s.to_string()))
    }
}

fn power_in(p: f64, exponent: i32) -> f64 {
    p.powi(exponent)
}

fn out_from_in(p: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    1.0 - ease_in(1.0 - p)
}

fn in_out_from_in(p: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    if p < 0.5 {
        ease_in(p * 2.0) / 2.0
    } else {
        1.0 - ease_in((1.0 - p) * 2.0) / 2.0
    }
}

fn in_out_from_out(p: f64, ease_out: impl Fn(f64) -> f64) -> f64 {
    if p < 0.5 {
        (1.0 - ease_out(1.0 - p * 2.0)) / 2.0
    } else {
        0.5 + ease_out((p - 0.5) * 2.0) / 2.0
    }
}

fn back_in(p: f64) -> f64 {
    p * p * ((BACK_OVERSHOOT + 1.0) * p - BACK_OVERSHOOT)
}

fn elastic_out(p: f64, period: f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    // Amplitude 1, so the phase shift is a quarter period
    let shift = period / 4.0;
    2f64.powf(-10.0 * p) * ((p - shift) * TAU / period).sin() + 1.0
}

fn bounce_out(p: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if p < 1.0 / D1 {
        N1 * p * p
    } else if p < 2.0 / D1 {
        let p = p - 1.5 / D1;
        N1 * p * p + 0.75
    } else if p < 2.5 / D1 {
        let p = p - 2.25 / D1;
        N1 * p * p + 0.9375
    } else {
        let p = p - 2.625 / D1;
        N1 * p * p + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in Easing::all() {
            assert!(easing.apply(0.0).abs() < 1e-9, "{} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{} at 1", easing);
        }
    }

    #[test]
    fn test_in_out_midpoint() {
        for easing in [
            Easing::Power1InOut,
            Easing::Power2InOut,
            Easing::Power3InOut,
            Easing::SineInOut,
            Easing::BackInOut,
            Easing::ElasticInOut,
            Easing::BounceInOut,
        ] {
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-9, "{}", easing);
        }
    }

    #[test]
    fn test_power_curves() {
        assert!((Easing::Power2In.apply(0.5) - 0.125).abs() < 1e-9);
        assert!((Easing::Power1Out.apply(0.5) - 0.75).abs() < 1e-9);
        assert!((Easing::Power2InOut.apply(0.25) - 0.0625).abs() < 1e-9);
    }

    #[test]
    fn test_back_overshoots() {
        // back.in dips below zero before heading to 1
        assert!(Easing::BackIn.apply(0.2) < 0.0);
        assert!(Easing::BackOut.apply(0.8) > 1.0);
    }

    #[test]
    fn test_elastic_out_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::ElasticOut.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_bounce_stays_in_range() {
        for i in 0..=100 {
            let v = Easing::BounceOut.apply(i as f64 / 100.0);
            assert!((0.0..=1.0 + 1e-9).contains(&v));
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("elastic.out".parse::<Easing>(), Ok(Easing::ElasticOut));
        assert_eq!("none".parse::<Easing>(), Ok(Easing::Linear));
        assert_eq!(
            "wobble".parse::<Easing>(),
            Err(ParseEasingError("wobble".to_string()))
        );
        for easing in Easing::all() {
            assert_eq!(easing.name().parse::<Easing>().as_ref(), Ok(easing));
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Easing::BackInOut).unwrap();
        assert_eq!(json, "\"back.inOut\"");
        let easing: Easing = serde_json::from_str("\"bounce.out\"").unwrap();
        assert_eq!(easing, Easing::BounceOut);
    }
}
