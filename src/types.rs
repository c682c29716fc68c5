use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, city: Option<String>) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::InvalidLatitude { value: latitude });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::InvalidLongitude { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
            city,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationConfig {
    pub fajr_angle: f64,
    pub isha_angle: f64,
    pub asr_shadow_factor: f64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            fajr_angle: 15.0,
            isha_angle: 15.0,
            asr_shadow_factor: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Radians.
    pub declination: f64,
    /// Hours.
    pub equation_of_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub fajr: Option<f64>,
    pub sunrise: Option<f64>,
    pub dhuhr: Option<f64>,
    pub asr: Option<f64>,
    pub maghrib: Option<f64>,
    pub isha: Option<f64>,
}

impl PrayerTimes {
    pub fn get(&self, prayer: Prayer) -> Option<f64> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, Option<f64>)> + '_ {
        Prayer::ALL.iter().map(move |&p| (p, self.get(p)))
    }

    pub fn is_complete(&self) -> bool {
        self.iter().all(|(_, t)| t.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub version: u32,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub location: Location,
    pub config: CalculationConfig,
    pub prayer_times: PrayerTimes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextEvent {
    pub prayer: Prayer,
    pub tomorrow: bool,
    pub minutes_remaining: i64,
}
