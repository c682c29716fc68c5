pub mod angles;
pub mod cache;
pub mod error;
pub mod next_event;
pub mod prayer_times;
pub mod schedule;
pub mod types;

pub use angles::{
    deg_to_rad, julian_day, normalize_angle, normalize_hour, rad_to_deg, solar_position,
    DEGREES_PER_HOUR,
};

pub use cache::{
    CacheBackend, CacheStore, FileBackend, MemoryBackend, CACHE_VERSION, FRESHNESS_WINDOW_MS,
};

pub use error::{CacheError, LocationError};

pub use next_event::{format_countdown, hours_to_hm, next_event, next_event_at, utc_hours};

pub use prayer_times::{asr_altitude, hour_angle, prayer_times, solar_noon, HORIZON_DEPRESSION};

pub use schedule::{next_prayer, resolve_schedule, LocationProvider, Schedule};

pub use types::{
    CacheEntry, CalculationConfig, Location, NextEvent, Prayer, PrayerTimes, SolarPosition,
};
