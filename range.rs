//! Scalar attributes configured as a fixed number or a closed interval

use core::fmt;
use core::ops::RangeInclusive;

use rand::Rng;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};

use crate::error::{EmitterError, Result};
use crate::value::Value;

/// A value in `[low, high]`, sampled uniformly.
///
/// A bare scalar is stored as the degenerate interval `[v, v]`, so reading
/// an attribute always yields both bounds. Reversed bounds are swapped on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedAttribute {
    low: f32,
    high: f32,
}

impl RangedAttribute {
    pub const fn fixed(value: f32) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    pub fn new(low: f32, high: f32) -> Self {
        if low > high {
            tracing::warn!(low, high, "reversed range bounds, swapping");
            Self {
                low: high,
                high: low,
            }
        } else {
            Self { low, high }
        }
    }

    pub const fn low(&self) -> f32 {
        self.low
    }

    pub const fn high(&self) -> f32 {
        self.high
    }

    pub const fn bounds(&self) -> [f32; 2] {
        [self.low, self.high]
    }

    pub fn is_fixed(&self) -> bool {
        self.low == self.high
    }

    /// Draw a value from the interval.
    ///
    /// A degenerate interval returns `low` exactly and leaves the RNG
    /// untouched, which also keeps infinite fixed values (immortal
    /// particles, no auto-emission) free of `inf - inf` arithmetic.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.is_fixed() {
            return self.low;
        }
        let t: f32 = rng.gen();
        let value = self.low + t * (self.high - self.low);
        // Rounding can land one ulp past `high` for wide intervals.
        value.min(self.high)
    }

    /// Accepts a number or a two-element numeric list.
    pub fn from_value(value: &Value<'_>) -> Result<Self> {
        const EXPECTED: &str = "number or [low, high]";

        if let Some(n) = value.as_number() {
            return Ok(Self::fixed(n as f32));
        }
        match value.as_list() {
            Some([low, high]) => {
                let low = low.expect_number(EXPECTED)?;
                let high = high.expect_number(EXPECTED)?;
                Ok(Self::new(low, high))
            }
            _ => Err(EmitterError::type_mismatch(EXPECTED)),
        }
    }
}

impl Default for RangedAttribute {
    fn default() -> Self {
        Self::fixed(0.0)
    }
}

impl From<f32> for RangedAttribute {
    fn from(value: f32) -> Self {
        Self::fixed(value)
    }
}

impl From<[f32; 2]> for RangedAttribute {
    fn from([low, high]: [f32; 2]) -> Self {
        Self::new(low, high)
    }
}

impl From<RangeInclusive<f32>> for RangedAttribute {
    fn from(range: RangeInclusive<f32>) -> Self {
        let (low, high) = range.into_inner();
        Self::new(low, high)
    }
}

impl From<RangedAttribute> for RangeInclusive<f32> {
    fn from(attr: RangedAttribute) -> Self {
        attr.low..=attr.high
    }
}

impl<'de> Deserialize<'de> for RangedAttribute {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RangedVisitor;

        impl<'de> Visitor<'de> for RangedVisitor {
            type Value = RangedAttribute;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or a [low, high] pair")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> core::result::Result<Self::Value, E> {
                Ok(RangedAttribute::fixed(v as f32))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> core::result::Result<Self::Value, E> {
                Ok(RangedAttribute::fixed(v as f32))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> core::result::Result<Self::Value, E> {
                Ok(RangedAttribute::fixed(v as f32))
            }

            fn visit_seq<A>(self, mut seq: A) -> core::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let low: f32 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let high: f32 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &self));
                }
                Ok(RangedAttribute::new(low, high))
            }
        }

        deserializer.deserialize_any(RangedVisitor)
    }
}
