//! Emitter configuration
//!
//! Three ways in, one validated shape out:
//! - build an [`EmitterConfig`] directly (`Default` plus struct update),
//! - deserialize it with serde; unknown keys are rejected,
//! - apply a loosely-typed option bag with [`EmitterConfig::from_options`].

use serde::Deserialize;

use crate::color::Rgba;
use crate::error::{EmitterError, Result};
use crate::range::RangedAttribute;
use crate::value::Value;

pub const DEFAULT_MAX_PARTICLES: usize = 1000;

/// Keys accepted by [`EmitterConfig::set_option`].
pub const OPTION_KEYS: [&str; 14] = [
    "angular_velocity",
    "center_x",
    "center_y",
    "color",
    "fade",
    "friction",
    "gravity",
    "interval",
    "max_particles",
    "offset",
    "scale",
    "speed",
    "time_to_live",
    "zoom",
];

// CHANGE: Per-emitter settings struct with documented defaults
// REASON: Same externalized-configuration shape as the simulator settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitterConfig {
    /// Radians per second
    pub angular_velocity: RangedAttribute,
    /// Spawn offset, as a fraction of the bound image width (or directly
    /// in pixels when no image size is bound)
    pub center_x: RangedAttribute,
    pub center_y: RangedAttribute,
    pub color: Rgba,
    /// Alpha units (0-255) lost per second
    pub fade: RangedAttribute,
    /// Speed lost per second
    pub friction: RangedAttribute,
    /// Downward acceleration given to every particle, pixels per second
    /// squared
    pub gravity: f32,
    /// Seconds between automatic emissions; only the low bound throttles
    pub interval: RangedAttribute,
    pub max_particles: usize,
    /// Spawn distance from the emitter along the particle's angle, pixels
    pub offset: RangedAttribute,
    pub scale: RangedAttribute,
    /// Pixels per second
    pub speed: RangedAttribute,
    /// Seconds
    pub time_to_live: RangedAttribute,
    /// Scale change per second
    pub zoom: RangedAttribute,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            angular_velocity: RangedAttribute::fixed(0.0),
            center_x: RangedAttribute::fixed(0.5),
            center_y: RangedAttribute::fixed(0.5),
            color: Rgba::WHITE,
            fade: RangedAttribute::fixed(0.0),
            friction: RangedAttribute::fixed(0.0),
            gravity: 0.0,
            interval: RangedAttribute::fixed(f32::INFINITY),
            max_particles: DEFAULT_MAX_PARTICLES,
            offset: RangedAttribute::fixed(0.0),
            scale: RangedAttribute::fixed(1.0),
            speed: RangedAttribute::fixed(0.0),
            time_to_live: RangedAttribute::fixed(f32::INFINITY),
            zoom: RangedAttribute::fixed(0.0),
        }
    }
}

impl EmitterConfig {
    /// Defaults overridden by each `(key, value)` pair in order.
    pub fn from_options(options: &[(&str, Value<'_>)]) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in options {
            config.set_option(key, value)?;
        }
        Ok(config)
    }

    /// Set one option by name.
    ///
    /// Unknown keys are `InvalidArgument`; values of the wrong shape are
    /// `TypeMismatch`. The config is unchanged on error.
    pub fn set_option(&mut self, key: &str, value: &Value<'_>) -> Result<()> {
        match key {
            "color" => self.color = Rgba::from_value(value)?,
            "gravity" => self.gravity = value.expect_number("numeric gravity")?,
            "max_particles" => self.max_particles = parse_max_particles(value)?,
            _ => {
                let slot = self.ranged_mut(key).ok_or_else(|| {
                    tracing::warn!(key, "unrecognized emitter option");
                    EmitterError::InvalidArgument("unrecognized option key")
                })?;
                *slot = RangedAttribute::from_value(value)?;
            }
        }
        Ok(())
    }

    /// Ranged attribute by option name.
    pub fn ranged(&self, key: &str) -> Option<RangedAttribute> {
        let attr = match key {
            "angular_velocity" => self.angular_velocity,
            "center_x" => self.center_x,
            "center_y" => self.center_y,
            "fade" => self.fade,
            "friction" => self.friction,
            "interval" => self.interval,
            "offset" => self.offset,
            "scale" => self.scale,
            "speed" => self.speed,
            "time_to_live" => self.time_to_live,
            "zoom" => self.zoom,
            _ => return None,
        };
        Some(attr)
    }

    fn ranged_mut(&mut self, key: &str) -> Option<&mut RangedAttribute> {
        let slot = match key {
            "angular_velocity" => &mut self.angular_velocity,
            "center_x" => &mut self.center_x,
            "center_y" => &mut self.center_y,
            "fade" => &mut self.fade,
            "friction" => &mut self.friction,
            "interval" => &mut self.interval,
            "offset" => &mut self.offset,
            "scale" => &mut self.scale,
            "speed" => &mut self.speed,
            "time_to_live" => &mut self.time_to_live,
            "zoom" => &mut self.zoom,
            _ => return None,
        };
        Some(slot)
    }

    /// Check the config fits a pool of `capacity` particles.
    pub fn validate(&self, capacity: usize) -> Result<()> {
        if self.max_particles == 0 {
            return Err(EmitterError::InvalidArgument("max_particles must be > 0"));
        }
        if self.max_particles > capacity {
            return Err(EmitterError::InvalidArgument(
                "max_particles exceeds the pool's storage capacity",
            ));
        }
        Ok(())
    }
}

fn parse_max_particles(value: &Value<'_>) -> Result<usize> {
    let raw = value
        .as_integer()
        .ok_or(EmitterError::type_mismatch("integer max_particles"))?;
    match usize::try_from(raw) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(EmitterError::InvalidArgument("max_particles must be > 0")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EmitterConfig::default();
        assert_eq!(config.max_particles, 1000);
        assert_eq!(config.color, Rgba::WHITE);
        assert_eq!(config.center_x.bounds(), [0.5, 0.5]);
        assert_eq!(config.scale.bounds(), [1.0, 1.0]);
        assert_eq!(config.interval.bounds(), [f32::INFINITY, f32::INFINITY]);
        assert_eq!(config.time_to_live.bounds(), [f32::INFINITY, f32::INFINITY]);
        assert_eq!(config.gravity, 0.0);
        for key in ["angular_velocity", "fade", "friction", "offset", "speed", "zoom"] {
            assert_eq!(config.ranged(key).unwrap().bounds(), [0.0, 0.0], "{key}");
        }
    }

    #[test]
    fn test_every_option_key_is_settable() {
        let channels = [Value::Integer(1); 4];
        for key in OPTION_KEYS {
            let value = match key {
                "color" => Value::List(&channels),
                "max_particles" => Value::Integer(5),
                _ => Value::Number(2.0),
            };
            let mut config = EmitterConfig::default();
            config.set_option(key, &value).unwrap();
        }
    }

    #[test]
    fn test_from_options() {
        let speed = [Value::Number(10.0), Value::Number(20.0)];
        let config = EmitterConfig::from_options(&[
            ("interval", Value::Number(0.001)),
            ("speed", Value::List(&speed)),
            ("max_particles", Value::Integer(64)),
            ("gravity", Value::Integer(98)),
            ("offset", Value::Number(4.0)),
        ])
        .unwrap();
        assert_eq!(config.gravity, 98.0);
        assert_eq!(config.offset.bounds(), [4.0, 4.0]);
        assert_eq!(config.interval.bounds(), [0.001, 0.001]);
        assert_eq!(config.speed.bounds(), [10.0, 20.0]);
        assert_eq!(config.max_particles, 64);
    }

    #[test]
    fn test_unknown_key_is_invalid_argument() {
        let err = EmitterConfig::from_options(&[("wobble", Value::Number(9.8))]).unwrap_err();
        assert_eq!(err, EmitterError::InvalidArgument("unrecognized option key"));
    }

    #[test]
    fn test_wrong_shapes_are_type_mismatches() {
        let mut config = EmitterConfig::default();
        assert!(config
            .set_option("speed", &Value::Text("fast"))
            .unwrap_err()
            .is_type_mismatch());
        assert!(config
            .set_option("max_particles", &Value::Number(10.0))
            .unwrap_err()
            .is_type_mismatch());
        assert!(config
            .set_option("color", &Value::Integer(0xffffffff))
            .unwrap_err()
            .is_type_mismatch());
        let span = [Value::Number(1.0), Value::Number(2.0)];
        assert!(config
            .set_option("gravity", &Value::List(&span))
            .unwrap_err()
            .is_type_mismatch());
        assert_eq!(config, EmitterConfig::default());
    }

    #[test]
    fn test_non_positive_max_particles() {
        let mut config = EmitterConfig::default();
        assert!(config
            .set_option("max_particles", &Value::Integer(0))
            .unwrap_err()
            .is_invalid_argument());
        assert!(config
            .set_option("max_particles", &Value::Integer(-3))
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_validate_against_capacity() {
        let config = EmitterConfig {
            max_particles: 300,
            ..Default::default()
        };
        assert!(config.validate(300).is_ok());
        assert!(config.validate(299).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: EmitterConfig = serde_json::from_str(
            r#"{ "interval": 0.05, "speed": [40, 80], "color": [255, 128, 0, 255], "max_particles": 250,
                "gravity": 9.5, "offset": [2, 6] }"#,
        )
        .unwrap();
        assert_eq!(config.interval.bounds(), [0.05, 0.05]);
        assert_eq!(config.speed.bounds(), [40.0, 80.0]);
        assert_eq!(config.color, Rgba::new(255, 128, 0, 255));
        assert_eq!(config.max_particles, 250);
        assert_eq!(config.gravity, 9.5);
        assert_eq!(config.offset.bounds(), [2.0, 6.0]);
        assert_eq!(config.time_to_live, RangedAttribute::fixed(f32::INFINITY));
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let result = serde_json::from_str::<EmitterConfig>(r#"{ "wobble": 1.0 }"#);
        assert!(result.is_err());
    }
}
