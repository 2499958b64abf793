use crate::consts::{
    FIELD_COUNT, MAX_COMPOSE_YEAR, MAX_EPOCH_MS, MILLIS_PER_SECOND, MIN_COMPOSE_YEAR, MIN_EPOCH_MS,
    MONTHS_PER_YEAR,
};
use crate::prelude::*;
use crate::types::{Field, FieldState, Mode};
use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike,
    Utc,
};
use serde::{Deserialize, Serialize};

/// A point in time as milliseconds since the Unix epoch.
///
/// Calendar conversions clamp into chrono's representable window, so every
/// operation on a `Timestamp` is total.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    From,
    Into,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The canonical zero timestamp, 1970-01-01T00:00:00Z.
    pub const EPOCH: Self = Self(0);

    /// Wraps an epoch-millisecond value.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the epoch.
    #[inline]
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// This instant floored to whole seconds since the epoch.
    #[inline]
    pub const fn floor_seconds(self) -> i64 {
        self.0.div_euclid(MILLIS_PER_SECOND)
    }

    /// Change-detection equality: two instants are the same iff they floor
    /// to the same second.
    pub const fn same_second(self, other: Self) -> bool {
        self.floor_seconds() == other.floor_seconds()
    }

    /// Second-granularity equality over optional instants. An absent side
    /// compares equal to anything.
    pub(crate) fn loosely_equal(a: Option<Self>, b: Option<Self>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => a.same_second(b),
            _ => true,
        }
    }

    fn to_utc(self) -> DateTime<Utc> {
        let millis = self.0.clamp(MIN_EPOCH_MS, MAX_EPOCH_MS);
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Extracts one calendar field from this instant.
    pub fn part(self, field: Field, mode: Mode) -> i64 {
        match mode {
            Mode::Utc => part_of(&self.to_utc(), field),
            Mode::Local => part_of(&self.to_utc().with_timezone(&Local), field),
        }
    }

    /// Extracts all six calendar fields of this instant in significance order.
    pub fn parts(self, mode: Mode) -> [i64; FIELD_COUNT] {
        match mode {
            Mode::Utc => parts_of(&self.to_utc()),
            Mode::Local => parts_of(&self.to_utc().with_timezone(&Local)),
        }
    }
}

fn part_of<Tz: TimeZone>(instant: &DateTime<Tz>, field: Field) -> i64 {
    match field {
        Field::Year => instant.year().into(),
        Field::Month => instant.month0().into(),
        Field::Day => instant.day().into(),
        Field::Hour => instant.hour().into(),
        Field::Minute => instant.minute().into(),
        Field::Second => instant.second().into(),
    }
}

fn parts_of<Tz: TimeZone>(instant: &DateTime<Tz>) -> [i64; FIELD_COUNT] {
    [
        instant.year().into(),
        instant.month0().into(),
        instant.day().into(),
        instant.hour().into(),
        instant.minute().into(),
        instant.second().into(),
    ]
}

fn to_calendar_unit(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Rebuilds the composite instant from six settled field values.
///
/// Fields arriving here have already been clamped by the updater; only the
/// year needs guarding against the calendar backend's limits.
pub(crate) fn compose(fields: &[FieldState; FIELD_COUNT], mode: Mode) -> Timestamp {
    let [year, month, day, hour, minute, second] = fields.map(|slot| slot.value);

    let year = i32::try_from(year.clamp(MIN_COMPOSE_YEAR, MAX_COMPOSE_YEAR)).unwrap_or(0);
    let month = to_calendar_unit(month.rem_euclid(MONTHS_PER_YEAR));

    let naive = NaiveDate::from_ymd_opt(year, month + 1, to_calendar_unit(day))
        .and_then(|date| {
            date.and_hms_opt(
                to_calendar_unit(hour),
                to_calendar_unit(minute),
                to_calendar_unit(second),
            )
        })
        .unwrap_or_else(|| DateTime::UNIX_EPOCH.naive_utc());

    match mode {
        Mode::Utc => Timestamp(Utc.from_utc_datetime(&naive).timestamp_millis()),
        Mode::Local => Timestamp(resolve_local(naive).timestamp_millis()),
    }
}

fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant,
        // DST overlap: the earlier reading wins.
        LocalResult::Ambiguous(earliest, _) => earliest,
        // DST gap: this wall-clock time does not exist; push past it.
        LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive).with_timezone(&Local)),
    }
}
