/// Number of editable calendar fields (year through second).
pub const FIELD_COUNT: usize = 6;

/// Months per year; months are 0-indexed throughout this crate.
pub const MONTHS_PER_YEAR: i64 = 12;

/// First month index (January).
pub const MONTH_MIN: i64 = 0;
/// Last month index (December).
pub const MONTH_MAX: i64 = 11;
/// First day of a month, used for lower bounds.
pub const DAY_MIN: i64 = 1;
/// First hour of a day.
pub const HOUR_MIN: i64 = 0;
/// Last hour of a day.
pub const HOUR_MAX: i64 = 23;
/// First minute of an hour.
pub const MINUTE_MIN: i64 = 0;
/// Last minute of an hour.
pub const MINUTE_MAX: i64 = 59;
/// First second of a minute.
pub const SECOND_MIN: i64 = 0;
/// Last second of a minute.
pub const SECOND_MAX: i64 = 59;

/// Month index for February (0-indexed).
pub const FEBRUARY: i64 = 1;

/// Days in February for leap years.
pub const FEBRUARY_DAYS_LEAP: i64 = 29;

/// Maximum days in each month, indexed by 0-indexed month.
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [i64; 12] = [
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Milliseconds per second, the granularity at which composites compare equal.
pub const MILLIS_PER_SECOND: i64 = 1000;

/// Smallest year the compositor will hand to the calendar backend.
/// chrono's proleptic Gregorian calendar covers roughly ±262,000 years.
pub(crate) const MIN_COMPOSE_YEAR: i64 = -262_000;
/// Largest year the compositor will hand to the calendar backend.
pub(crate) const MAX_COMPOSE_YEAR: i64 = 262_000;

/// Smallest epoch-millisecond value extraction will convert as-is.
pub(crate) const MIN_EPOCH_MS: i64 = -8_210_000_000_000_000;
/// Largest epoch-millisecond value extraction will convert as-is.
pub(crate) const MAX_EPOCH_MS: i64 = 8_210_000_000_000_000;
