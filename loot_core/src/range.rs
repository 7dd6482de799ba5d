use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive integer interval
///
/// The type does not validate its bounds; parsers check `min`/`max` against
/// the rule of the field they are reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DynamicRange {
    pub min: i32,
    pub max: i32,
}

impl DynamicRange {
    /// Range returned when a range literal cannot be read
    pub const DEFAULT: DynamicRange = DynamicRange { min: 1, max: 1 };

    pub fn new(min: i32, max: i32) -> Self {
        DynamicRange { min, max }
    }

    /// Degenerate range holding a single value
    pub fn single(value: i32) -> Self {
        DynamicRange {
            min: value,
            max: value,
        }
    }
}

impl Default for DynamicRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for DynamicRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{};{}]", self.min, self.max)
    }
}

/// Amount, level or amplifier: either a fixed value or a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Fixed(i32),
    Range(DynamicRange),
}

impl Quantity {
    /// Parse a scalar as a fixed value or a `[min;max]` range literal.
    ///
    /// A plain integer gives `Fixed`. Otherwise leading `[` and trailing `]`
    /// are stripped and the rest must be exactly two integers separated by
    /// `;`. Anything else gives [`DynamicRange::DEFAULT`]; this is not an
    /// error, callers validate the bounds they care about.
    pub fn parse(raw: &str) -> Quantity {
        if let Ok(value) = raw.parse::<i32>() {
            return Quantity::Fixed(value);
        }

        let inner = raw.trim_start_matches('[').trim_end_matches(']');
        let mut parts = inner.split(';');
        let range = match (parts.next(), parts.next(), parts.next()) {
            (Some(min), Some(max), None) => match (min.parse(), max.parse()) {
                (Ok(min), Ok(max)) => DynamicRange::new(min, max),
                _ => DynamicRange::DEFAULT,
            },
            _ => DynamicRange::DEFAULT,
        };

        Quantity::Range(range)
    }

    /// View as an inclusive range; a fixed `n` is `[n;n]`
    pub fn as_range(&self) -> DynamicRange {
        match self {
            Quantity::Fixed(v) => DynamicRange::single(*v),
            Quantity::Range(r) => *r,
        }
    }

    pub fn min(&self) -> i32 {
        self.as_range().min
    }

    pub fn max(&self) -> i32 {
        self.as_range().max
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Quantity::Fixed(value)
    }
}

impl From<DynamicRange> for Quantity {
    fn from(range: DynamicRange) -> Self {
        Quantity::Range(range)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Fixed(v) => write!(f, "{}", v),
            Quantity::Range(r) => write!(f, "{}", r),
        }
    }
}
