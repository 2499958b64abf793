//! Per-field legal-range resolution.
//!
//! A bound timestamp only constrains a field while every strictly more
//! significant field sits exactly on the bound's own value for it. Until
//! then the field falls back to its catalog default; the day default is the
//! one moving target, following the current year/month pair.

use crate::DateFields;
use crate::consts::{
    DAY_MIN, HOUR_MAX, HOUR_MIN, MINUTE_MAX, MINUTE_MIN, MONTH_MAX, MONTH_MIN, SECOND_MAX,
    SECOND_MIN,
};
use crate::timestamp::Timestamp;
use crate::types::{Field, days_in_month};

/// True when every field more significant than `field` is pinned to the
/// floor bound. Vacuously true for the year.
///
/// The comparison direction matters: settled values sit at or above the
/// floor, so `bound >= state` holds exactly on the pinned prefix.
pub(crate) fn at_min_bound(state: &DateFields, bound: Timestamp, field: Field) -> bool {
    Field::ALL[..field.index()]
        .iter()
        .all(|&above| bound.part(above, state.mode()) >= state.field(above).value)
}

/// True when every field more significant than `field` is pinned to the
/// ceiling bound. Vacuously true for the year.
pub(crate) fn at_max_bound(state: &DateFields, bound: Timestamp, field: Field) -> bool {
    Field::ALL[..field.index()]
        .iter()
        .all(|&above| bound.part(above, state.mode()) <= state.field(above).value)
}

/// Currently-legal minimum for `field`; `None` means unbounded below.
pub(crate) fn resolve_min(state: &DateFields, field: Field) -> Option<i64> {
    if let Some(bound) = state.min_bound() {
        if at_min_bound(state, bound, field) {
            return Some(bound.part(field, state.mode()));
        }
    }

    match field {
        Field::Year => None,
        Field::Month => Some(MONTH_MIN),
        Field::Day => Some(DAY_MIN),
        Field::Hour => Some(HOUR_MIN),
        Field::Minute => Some(MINUTE_MIN),
        Field::Second => Some(SECOND_MIN),
    }
}

/// Currently-legal maximum for `field`; `None` means unbounded above.
pub(crate) fn resolve_max(state: &DateFields, field: Field) -> Option<i64> {
    if let Some(bound) = state.max_bound() {
        if at_max_bound(state, bound, field) {
            return Some(bound.part(field, state.mode()));
        }
    }

    match field {
        Field::Year => None,
        Field::Month => Some(MONTH_MAX),
        Field::Day => Some(days_in_month(
            state.field(Field::Year).value,
            state.field(Field::Month).value,
        )),
        Field::Hour => Some(HOUR_MAX),
        Field::Minute => Some(MINUTE_MAX),
        Field::Second => Some(SECOND_MAX),
    }
}

/// Resolved `(min, max)` for `field`, from the current values of every more
/// significant field.
pub(crate) fn resolve(state: &DateFields, field: Field) -> (Option<i64>, Option<i64>) {
    (resolve_min(state, field), resolve_max(state, field))
}
