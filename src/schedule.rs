use chrono::{DateTime, Utc};

use crate::cache::{CacheBackend, CacheStore, CACHE_VERSION, FRESHNESS_WINDOW_MS};
use crate::next_event::next_event_at;
use crate::prayer_times::prayer_times;
use crate::types::{CacheEntry, CalculationConfig, Location, NextEvent, PrayerTimes};

pub trait LocationProvider {
    fn locate(&self) -> Option<Location>;
}

impl<F> LocationProvider for F
where
    F: Fn() -> Option<Location>,
{
    fn locate(&self) -> Option<Location> {
        self()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub location: Location,
    pub prayer_times: PrayerTimes,
    pub from_cache: bool,
}

pub fn resolve_schedule<B, P>(
    store: &CacheStore<B>,
    provider: &P,
    config: &CalculationConfig,
    now: DateTime<Utc>,
) -> Option<Schedule>
where
    B: CacheBackend,
    P: LocationProvider + ?Sized,
{
    let now_ms = now.timestamp_millis();
    match store.get_at(CACHE_VERSION, FRESHNESS_WINDOW_MS, now_ms) {
        Some(entry) if entry.config == *config => {
            return Some(Schedule {
                location: entry.location,
                prayer_times: entry.prayer_times,
                from_cache: true,
            });
        }
        Some(_) => log::debug!("cache miss: calculation config changed"),
        None => {}
    }

    let location = provider.locate()?;
    let times = prayer_times(now.date_naive(), &location, config);
    log::info!(
        "computed prayer times for {} ({:.4}, {:.4})",
        location.city.as_deref().unwrap_or("unknown"),
        location.latitude,
        location.longitude
    );

    let entry = CacheEntry {
        version: CACHE_VERSION,
        timestamp: now_ms,
        location,
        config: *config,
        prayer_times: times,
    };
    store.put(&entry);

    Some(Schedule {
        location: entry.location,
        prayer_times: entry.prayer_times,
        from_cache: false,
    })
}

pub fn next_prayer<B, P>(
    store: &CacheStore<B>,
    provider: &P,
    config: &CalculationConfig,
    now: DateTime<Utc>,
) -> Option<(Schedule, Option<NextEvent>)>
where
    B: CacheBackend,
    P: LocationProvider + ?Sized,
{
    let schedule = resolve_schedule(store, provider, config, now)?;
    let next = next_event_at(&schedule.prayer_times, &now);
    Some((schedule, next))
}
