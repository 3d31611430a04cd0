//! 8-bit and normalized colors

use serde::Deserialize;

use crate::error::{EmitterError, Result};
use crate::value::Value;

/// 8-bit RGBA color, the form colors are configured and read back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `[r, g, b, a]` with integer channels in `0..=255`.
    pub fn from_value(value: &Value<'_>) -> Result<Self> {
        const EXPECTED: &str = "[r, g, b, a] with integer channels";

        let items = value
            .as_list()
            .filter(|items| items.len() == 4)
            .ok_or(EmitterError::type_mismatch(EXPECTED))?;

        let mut channels = [0u8; 4];
        for (channel, item) in channels.iter_mut().zip(items) {
            let raw = item
                .as_integer()
                .ok_or(EmitterError::type_mismatch(EXPECTED))?;
            *channel = u8::try_from(raw)
                .map_err(|_| EmitterError::InvalidArgument("color channels must be in 0..=255"))?;
        }
        Ok(channels.into())
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

/// Normalized color, 0.0..=1.0 per channel. Particles carry this form so
/// alpha can decay smoothly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorF {
    pub const WHITE: ColorF = ColorF::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn modulate(self, other: ColorF) -> Self {
        Self::new(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }

    /// Round back to 8-bit channels, clamping out-of-range values.
    pub fn to_rgba(self) -> Rgba {
        fn channel(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
        }
        Rgba::new(channel(self.r), channel(self.g), channel(self.b), channel(self.a))
    }
}

impl From<Rgba> for ColorF {
    fn from(c: Rgba) -> Self {
        Self::new(
            c.r as f32 / 255.0,
            c.g as f32 / 255.0,
            c.b as f32 / 255.0,
            c.a as f32 / 255.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_value() {
        let items = [
            Value::Integer(10),
            Value::Integer(20),
            Value::Integer(30),
            Value::Integer(255),
        ];
        assert_eq!(Rgba::from_value(&Value::List(&items)), Ok(Rgba::new(10, 20, 30, 255)));
    }

    #[test]
    fn test_rgba_from_value_rejects_bad_shapes() {
        let three = [Value::Integer(1), Value::Integer(2), Value::Integer(3)];
        assert!(Rgba::from_value(&Value::List(&three)).unwrap_err().is_type_mismatch());
        assert!(Rgba::from_value(&Value::Text("white")).unwrap_err().is_type_mismatch());

        let floats = [Value::Number(1.0); 4];
        assert!(Rgba::from_value(&Value::List(&floats)).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_rgba_from_value_rejects_out_of_range_channels() {
        let items = [
            Value::Integer(256),
            Value::Integer(0),
            Value::Integer(0),
            Value::Integer(0),
        ];
        assert!(Rgba::from_value(&Value::List(&items)).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_normalized_round_trip_for_white() {
        assert_eq!(ColorF::from(Rgba::WHITE), ColorF::WHITE);
        assert_eq!(ColorF::WHITE.to_rgba(), Rgba::WHITE);
    }

    #[test]
    fn test_modulate() {
        let half = ColorF::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!(ColorF::WHITE.modulate(half), half);
    }

    #[test]
    fn test_deserialize_from_array() {
        let c: Rgba = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(c, Rgba::new(1, 2, 3, 4));
    }
}
