//! Calendar instant → Julian Date → sidereal time.
//!
//! Low-order approximations only: the GMST polynomial below is the classic
//! Meeus expression (Astronomical Algorithms, eq. 12.4). No leap-second,
//! UT1 or nutation corrections are applied; all angles are in degrees.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date for a Gregorian calendar date.
///
/// `day` carries the fractional day (e.g. 1.5 = noon on the first).
/// Months 1 and 2 are counted as months 13 and 14 of the previous year.
/// Fields are not range checked; out-of-range values pass straight
/// through the formula.
pub fn julian_date_from_calendar(year: i32, month: i32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Julian Date of a UTC instant, including the fractional day.
pub fn julian_date(instant: &DateTime<Utc>) -> f64 {
    let seconds = instant.second() as f64 + instant.nanosecond() as f64 * 1e-9;
    let day_fraction =
        (instant.hour() as f64 + instant.minute() as f64 / 60.0 + seconds / 3600.0) / 24.0;
    julian_date_from_calendar(
        instant.year(),
        instant.month() as i32,
        instant.day() as f64 + day_fraction,
    )
}

/// Julian centuries elapsed since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Greenwich Mean Sidereal Time for a Julian Date, degrees in [0, 360).
pub fn gmst_from_julian_date(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let gmst = 280.460_618_37
        + 360.985_647_366_29 * (jd - J2000_JD)
        + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(gmst)
}

/// Greenwich Mean Sidereal Time at a UTC instant, degrees in [0, 360).
pub fn greenwich_mean_sidereal_time(instant: &DateTime<Utc>) -> f64 {
    gmst_from_julian_date(julian_date(instant))
}

/// Local Sidereal Time for an observer at `longitude_deg` (east positive),
/// degrees in [0, 360).
pub fn local_sidereal_time(longitude_deg: f64, instant: &DateTime<Utc>) -> f64 {
    normalize_degrees(greenwich_mean_sidereal_time(instant) + longitude_deg)
}

/// Wrap an angle into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
