use chrono::NaiveDate;

use crate::angles::{self, DEGREES_PER_HOUR};
use crate::types::{CalculationConfig, Location, PrayerTimes};

pub const HORIZON_DEPRESSION: f64 = 0.833;

pub fn solar_noon(equation_of_time: f64) -> f64 {
    12.0 - equation_of_time
}

pub fn hour_angle(depression: f64, latitude: f64, declination: f64) -> Option<f64> {
    let num = -angles::sin_deg(depression) - angles::sin_deg(latitude) * declination.sin();
    let den = angles::cos_deg(latitude) * declination.cos();
    if den.abs() < 1e-12 {
        return None;
    }
    let cos_h = num / den;
    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }
    Some(angles::rad_to_deg(cos_h.acos()) / DEGREES_PER_HOUR)
}

pub fn asr_altitude(shadow_factor: f64, latitude: f64, declination: f64) -> f64 {
    let noon_zenith = (latitude - angles::rad_to_deg(declination)).abs();
    angles::rad_to_deg((1.0 / (shadow_factor + angles::tan_deg(noon_zenith))).atan())
}

pub fn utc_offset_hours(longitude: f64) -> f64 {
    longitude / DEGREES_PER_HOUR
}

pub fn prayer_times(
    date: NaiveDate,
    location: &Location,
    config: &CalculationConfig,
) -> PrayerTimes {
    let pos = angles::solar_position(date);
    let lat = location.latitude;
    let decl = pos.declination;
    let noon = solar_noon(pos.equation_of_time);

    let before_noon = |depression: f64| hour_angle(depression, lat, decl).map(|h| noon - h);
    let after_noon = |depression: f64| hour_angle(depression, lat, decl).map(|h| noon + h);

    let asr_depression = -asr_altitude(config.asr_shadow_factor, lat, decl);

    let local = PrayerTimes {
        fajr: before_noon(config.fajr_angle),
        sunrise: before_noon(HORIZON_DEPRESSION),
        dhuhr: Some(noon),
        asr: after_noon(asr_depression),
        maghrib: after_noon(HORIZON_DEPRESSION),
        isha: after_noon(config.isha_angle),
    };

    let times = to_utc(&local, location.longitude);
    for (prayer, t) in times.iter() {
        if t.is_none() {
            log::debug!("{} unsolvable on {} at latitude {:.2}", prayer, date, lat);
        }
    }
    times
}

fn to_utc(local: &PrayerTimes, longitude: f64) -> PrayerTimes {
    let offset = utc_offset_hours(longitude);
    let shift = |t: Option<f64>| t.map(|h| h - offset);
    PrayerTimes {
        fajr: shift(local.fajr),
        sunrise: shift(local.sunrise),
        dhuhr: shift(local.dhuhr),
        asr: shift(local.asr),
        maghrib: shift(local.maghrib),
        isha: shift(local.isha),
    }
}
