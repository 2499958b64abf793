mod consts;
mod prelude;
mod range;
mod timestamp;
mod types;

pub use consts::*;
pub use timestamp::Timestamp;
pub use types::{Field, FieldState, FieldValue, InvalidFieldValue, Mode, days_in_month, is_leap_year};

use crate::timestamp::compose;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External inputs for [`DateFields::new`] and
/// [`DateFields::reconcile_external`]: the composite value, the optional
/// inclusive `[min, max]` window constraining it, and the calendar mode.
///
/// Bound values are trusted; the engine does not check `min <= max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub value: Option<Timestamp>,
    pub min: Option<Timestamp>,
    pub max: Option<Timestamp>,
    pub mode: Mode,
}

/// A partial batch of raw field edits for [`DateFields::set_fields`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldEdits {
    slots: [Option<FieldValue>; FIELD_COUNT],
}

impl FieldEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw value for `field`, replacing any earlier edit of it.
    pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.slots[field.index()] = Some(value.into());
        self
    }

    pub fn year(self, value: impl Into<FieldValue>) -> Self {
        self.with(Field::Year, value)
    }

    pub fn month(self, value: impl Into<FieldValue>) -> Self {
        self.with(Field::Month, value)
    }

    pub fn day(self, value: impl Into<FieldValue>) -> Self {
        self.with(Field::Day, value)
    }

    pub fn hour(self, value: impl Into<FieldValue>) -> Self {
        self.with(Field::Hour, value)
    }

    pub fn minute(self, value: impl Into<FieldValue>) -> Self {
        self.with(Field::Minute, value)
    }

    pub fn second(self, value: impl Into<FieldValue>) -> Self {
        self.with(Field::Second, value)
    }

    /// True when no field has an edit queued.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub(crate) fn get(&self, field: Field) -> Option<&FieldValue> {
        self.slots[field.index()].as_ref()
    }
}

/// A calendar timestamp decomposed into six independently editable fields,
/// kept consistent with an optional `[min, max]` window on the composite.
///
/// Every operation is a pure transition: it takes the current state by
/// reference and hands back the next one, leaving the input untouched. A
/// no-op edit reports `changed == false` and returns the state unaltered,
/// so callers can skip notification and downstream work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateFields {
    fields: [FieldState; FIELD_COUNT],
    value: Timestamp,
    mode: Mode,
    min: Option<Timestamp>,
    max: Option<Timestamp>,
    /// Composite last supplied by the caller, kept for prop-sync change
    /// detection. Local edits move `value` but never this.
    external_value: Timestamp,
}

impl DateFields {
    /// Builds a settled state from external inputs. A missing value
    /// defaults to [`Timestamp::EPOCH`].
    pub fn new(options: Options) -> Self {
        let value = options.value.unwrap_or(Timestamp::EPOCH);
        let fields = value.parts(options.mode).map(FieldState::unbounded);

        let mut state = Self {
            fields,
            value,
            mode: options.mode,
            min: options.min,
            max: options.max,
            external_value: value,
        };
        state.settle_all();
        state
    }

    /// Applies one edit to `field` and cascades every less significant
    /// field, re-resolving its range against the new ancestors.
    ///
    /// Returns the next state and whether anything changed. When nothing
    /// changed the returned state is identical to `self` and the composite
    /// was not recomputed.
    ///
    /// # Errors
    /// Returns [`InvalidFieldValue`] if `value` has no integer reading;
    /// the state is left untouched.
    pub fn set_field(
        &self,
        field: Field,
        value: impl Into<FieldValue>,
    ) -> Result<(Self, bool), InvalidFieldValue> {
        let raw = value.into();
        let Some(proposed) = raw.as_int() else {
            return Err(InvalidFieldValue { field, value: raw });
        };

        let mut next = *self;
        let mut changed = next.update_field(field, proposed);
        for subordinate in field.subordinates() {
            let current = next.fields[subordinate.index()].value;
            changed |= next.update_field(subordinate, current);
        }
        if changed {
            next.refresh_value();
        }
        Ok((next, changed))
    }

    /// Applies a batch of edits as one transition, walking fields in
    /// significance order. Fields following the first explicit edit are
    /// re-resolved even when no value was supplied for them; fields before
    /// it are left untouched.
    ///
    /// # Errors
    /// Returns [`InvalidFieldValue`] for the first supplied value with no
    /// integer reading. The whole batch is rejected; no field is updated.
    pub fn set_fields(&self, edits: &FieldEdits) -> Result<(Self, bool), InvalidFieldValue> {
        let mut plan: Vec<(Field, Option<i64>)> = Vec::with_capacity(FIELD_COUNT);
        let mut explicit = false;

        for field in Field::ALL {
            match edits.get(field) {
                Some(raw) => {
                    let Some(proposed) = raw.as_int() else {
                        return Err(InvalidFieldValue {
                            field,
                            value: raw.clone(),
                        });
                    };
                    explicit = true;
                    plan.push((field, Some(proposed)));
                }
                None if explicit => plan.push((field, None)),
                None => {}
            }
        }

        let mut next = *self;
        let mut changed = false;
        for (field, proposed) in plan {
            let proposed = proposed.unwrap_or(next.fields[field.index()].value);
            changed |= next.update_field(field, proposed);
        }
        if changed {
            next.refresh_value();
        }
        Ok((next, changed))
    }

    /// Folds externally supplied inputs into the state.
    ///
    /// Each input is compared against the last recorded externals: the
    /// composite and bounds at one-second granularity (an absent side
    /// comparing equal to anything), the mode by identity. Returns `None`
    /// when nothing differs, so a pending local edit is never overwritten
    /// by a no-op refresh; otherwise records the new externals, re-derives
    /// all six fields, and returns the settled state.
    pub fn reconcile_external(&self, next: Options) -> Option<Self> {
        let new_value = !Timestamp::loosely_equal(next.value, Some(self.external_value));
        let new_min = !Timestamp::loosely_equal(next.min, self.min);
        let new_max = !Timestamp::loosely_equal(next.max, self.max);
        let new_mode = next.mode != self.mode;

        if !new_value && !new_min && !new_max && !new_mode {
            return None;
        }

        let mut state = *self;
        state.mode = next.mode;
        if new_min {
            state.min = next.min;
        }
        if new_max {
            state.max = next.max;
        }

        let source = if new_value {
            let value = next.value.unwrap_or(self.value);
            state.external_value = value;
            value
        } else {
            self.value
        };

        let parts = source.parts(state.mode);
        for field in Field::ALL {
            state.update_field(field, parts[field.index()]);
        }
        state.refresh_value();

        Some(state)
    }

    /// The cached composite; never recomputed on read.
    #[inline]
    pub const fn value(&self) -> Timestamp {
        self.value
    }

    #[inline]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub const fn min_bound(&self) -> Option<Timestamp> {
        self.min
    }

    #[inline]
    pub const fn max_bound(&self) -> Option<Timestamp> {
        self.max
    }

    /// One field's value and cached range.
    #[inline]
    pub const fn field(&self, field: Field) -> FieldState {
        self.fields[field.index()]
    }

    /// All six slots in significance order.
    #[inline]
    pub const fn fields(&self) -> &[FieldState; FIELD_COUNT] {
        &self.fields
    }

    /// Clamps `proposed` into `field`'s freshly resolved range and stores
    /// the value with that range. Returns false when the stored slot is
    /// already identical, leaving the state untouched.
    fn update_field(&mut self, field: Field, proposed: i64) -> bool {
        let (min, max) = range::resolve(self, field);

        let mut value = proposed;
        if let Some(max) = max {
            value = value.min(max);
        }
        if let Some(min) = min {
            value = value.max(min);
        }

        let slot = FieldState { value, min, max };
        if slot == self.fields[field.index()] {
            return false;
        }
        self.fields[field.index()] = slot;
        true
    }

    /// Re-resolves every field against its current value, then refreshes
    /// the composite. Used when bounds or mode may have shifted wholesale.
    fn settle_all(&mut self) {
        let mut changed = false;
        for field in Field::ALL {
            let current = self.fields[field.index()].value;
            changed |= self.update_field(field, current);
        }
        if changed {
            self.refresh_value();
        }
    }

    /// Recomposes from the fields, keeping the old composite when the
    /// result lands in the same second (sub-second millis survive no-ops).
    fn refresh_value(&mut self) {
        let next = compose(&self.fields, self.mode);
        if !next.same_second(self.value) {
            self.value = next;
        }
    }
}

impl fmt::Display for DateFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.field(Field::Year).value,
            self.field(Field::Month).value + 1,
            self.field(Field::Day).value,
            self.field(Field::Hour).value,
            self.field(Field::Minute).value,
            self.field(Field::Second).value,
        )
    }
}

impl<'de> Deserialize<'de> for DateFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Snapshot {
            value: Timestamp,
            mode: Mode,
            min: Option<Timestamp>,
            max: Option<Timestamp>,
        }

        // Field slots are derived state; rebuild them from the composite
        // instead of trusting them.
        let snapshot = Snapshot::deserialize(deserializer)?;
        Ok(Self::new(Options {
            value: Some(snapshot.value),
            min: snapshot.min,
            max: snapshot.max,
            mode: snapshot.mode,
        }))
    }
}
