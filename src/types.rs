use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, FIELD_COUNT, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MONTHS_PER_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// The six editable calendar fields, ordered from most to least significant.
///
/// The discriminants are load-bearing: bound alignment walks them downward
/// and cascades walk them upward, so `Year < Month < ... < Second` must hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[display(fmt = "year")]
    Year = 0,
    #[display(fmt = "month")]
    Month = 1,
    #[display(fmt = "day")]
    Day = 2,
    #[display(fmt = "hour")]
    Hour = 3,
    #[display(fmt = "minute")]
    Minute = 4,
    #[display(fmt = "second")]
    Second = 5,
}

impl Field {
    /// All fields in significance order.
    pub const ALL: [Self; FIELD_COUNT] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// Position of this field in significance order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Fields strictly less significant than this one, in cascade order.
    pub fn subordinates(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().skip(self.index() + 1)
    }
}

/// Whether field values are read from and composed into the timestamp as
/// local wall-clock components or UTC components.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    #[display(fmt = "local")]
    Local,
    #[display(fmt = "utc")]
    Utc,
}

/// One field's current value together with its resolved legal range.
///
/// `min`/`max` are cached at update time so callers can render range
/// indicators without re-resolving; `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldState {
    pub value: i64,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl FieldState {
    pub(crate) const fn unbounded(value: i64) -> Self {
        Self {
            value,
            min: None,
            max: None,
        }
    }

    /// True when `value` lies inside the cached range.
    pub fn in_range(&self) -> bool {
        self.min.is_none_or(|min| self.value >= min) && self.max.is_none_or(|max| self.value <= max)
    }
}

/// A raw field input as received from the surrounding binding layer,
/// before it has been checked for an integer reading.
#[derive(Debug, Clone, PartialEq, From, Display)]
pub enum FieldValue {
    #[display(fmt = "{_0}")]
    Int(i64),
    #[display(fmt = "{_0}")]
    Float(f64),
    #[display(fmt = "{_0}")]
    Text(String),
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl FieldValue {
    /// Integer reading of this input, if it has one.
    ///
    /// Whole-valued finite floats coerce, and so do strings holding an
    /// optionally signed decimal integer (surrounding whitespace ignored).
    /// Everything else has no reading.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) => {
                let whole = value.is_finite() && value.fract() == 0.0;
                if whole && (i64::MIN as f64..=i64::MAX as f64).contains(value) {
                    Some(*value as i64)
                } else {
                    None
                }
            }
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

/// Raised by [`DateFields::set_field`]/[`DateFields::set_fields`] when a
/// supplied value has no integer reading. The whole batch is aborted;
/// no field is updated.
///
/// [`DateFields::set_field`]: crate::DateFields::set_field
/// [`DateFields::set_fields`]: crate::DateFields::set_fields
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Expected int {field}. Received {value}.")]
pub struct InvalidFieldValue {
    /// Field the rejected value was supplied for.
    pub field: Field,
    /// The offending raw input.
    pub value: FieldValue,
}

// --- calendar helpers ---

/// Gregorian leap-year rule.
pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` (0-indexed) of `year`.
pub const fn days_in_month(year: i64, month: i64) -> i64 {
    let month = month.rem_euclid(MONTHS_PER_YEAR);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
