use chrono::{Datelike, NaiveDate};

use crate::types::SolarPosition;

pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const J2000_JULIAN_DAY: i64 = 2_451_545;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn normalize_hour(hour: f64) -> f64 {
    hour.rem_euclid(24.0)
}

pub fn sin_deg(deg: f64) -> f64 {
    deg_to_rad(deg).sin()
}

pub fn cos_deg(deg: f64) -> f64 {
    deg_to_rad(deg).cos()
}

pub fn tan_deg(deg: f64) -> f64 {
    deg_to_rad(deg).tan()
}

pub fn julian_day(year: i32, month: u32, day: u32) -> i64 {
    let a = (14 - month as i64) / 12;
    let y = year as i64 + 4800 - a;
    let m = month as i64 + 12 * a - 3;
    day as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
}

pub fn days_since_j2000(date: NaiveDate) -> f64 {
    (julian_day(date.year(), date.month(), date.day()) - J2000_JULIAN_DAY) as f64
}

pub fn mean_anomaly(d: f64) -> f64 {
    normalize_angle(357.529 + 0.98560028 * d)
}

pub fn mean_longitude(d: f64) -> f64 {
    normalize_angle(280.459 + 0.98564736 * d)
}

pub fn ecliptic_longitude(q: f64, g: f64) -> f64 {
    normalize_angle(q + 1.915 * sin_deg(g) + 0.020 * sin_deg(2.0 * g))
}

pub fn obliquity(d: f64) -> f64 {
    23.439 - 0.00000036 * d
}

pub fn right_ascension(e: f64, l: f64) -> f64 {
    let ra = rad_to_deg((cos_deg(e) * sin_deg(l)).atan2(cos_deg(l))) / DEGREES_PER_HOUR;
    normalize_hour(ra)
}

pub fn wrap_hours(hours: f64) -> f64 {
    (hours + 12.0).rem_euclid(24.0) - 12.0
}

pub fn solar_position(date: NaiveDate) -> SolarPosition {
    let d = days_since_j2000(date);
    let g = mean_anomaly(d);
    let q = mean_longitude(d);
    let l = ecliptic_longitude(q, g);
    let e = obliquity(d);

    let ra = right_ascension(e, l);
    let declination = (sin_deg(e) * sin_deg(l)).asin();
    let equation_of_time = wrap_hours(q / DEGREES_PER_HOUR - ra);

    SolarPosition {
        declination,
        equation_of_time,
    }
}
