use std::cell::Cell;

use chrono::{DateTime, Duration, TimeZone, Utc};

use prayer_clock::cache::{
    CacheBackend, CacheStore, MemoryBackend, CACHE_VERSION, FRESHNESS_WINDOW_MS,
};
use prayer_clock::next_event::next_event_at;
use prayer_clock::prayer_times::prayer_times;
use prayer_clock::schedule::*;
use prayer_clock::types::{CacheEntry, CalculationConfig, Location};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 21, 18, 0, 0).unwrap()
}

fn seattle() -> Location {
    Location::new(47.6, -122.3, Some("Seattle".to_string())).unwrap()
}

// ── Cache hit / miss ──

#[test]
fn test_miss_locates_and_computes() {
    let store = CacheStore::new(MemoryBackend::new());
    let calls = Cell::new(0);
    let provider = || {
        calls.set(calls.get() + 1);
        Some(seattle())
    };
    let config = CalculationConfig::default();

    let schedule = resolve_schedule(&store, &provider, &config, now()).unwrap();
    assert_eq!(calls.get(), 1);
    assert!(!schedule.from_cache);
    assert_eq!(schedule.location, seattle());
    assert_eq!(
        schedule.prayer_times,
        prayer_times(now().date_naive(), &seattle(), &config)
    );
}

#[test]
fn test_second_call_within_hour_uses_cache() {
    let store = CacheStore::new(MemoryBackend::new());
    let calls = Cell::new(0);
    let provider = || {
        calls.set(calls.get() + 1);
        Some(seattle())
    };
    let config = CalculationConfig::default();

    let first = resolve_schedule(&store, &provider, &config, now()).unwrap();
    let second =
        resolve_schedule(&store, &provider, &config, now() + Duration::minutes(59)).unwrap();
    assert_eq!(calls.get(), 1);
    assert!(second.from_cache);
    assert_eq!(second.prayer_times, first.prayer_times);
    assert_eq!(second.location, first.location);
}

#[test]
fn test_recomputes_after_an_hour() {
    let store = CacheStore::new(MemoryBackend::new());
    let calls = Cell::new(0);
    let provider = || {
        calls.set(calls.get() + 1);
        Some(seattle())
    };
    let config = CalculationConfig::default();

    resolve_schedule(&store, &provider, &config, now()).unwrap();
    let later = now() + Duration::milliseconds(3_600_001);
    let schedule = resolve_schedule(&store, &provider, &config, later).unwrap();
    assert_eq!(calls.get(), 2);
    assert!(!schedule.from_cache);

    let stored = store.get_at(CACHE_VERSION, i64::MAX, 0).unwrap();
    assert_eq!(stored.timestamp, later.timestamp_millis());
}

#[test]
fn test_stale_version_is_replaced() {
    let stale = CacheEntry {
        version: CACHE_VERSION + 7,
        timestamp: now().timestamp_millis(),
        location: Location::new(0.0, 0.0, None).unwrap(),
        config: CalculationConfig::default(),
        prayer_times: Default::default(),
    };
    let store = CacheStore::new(MemoryBackend::with_bytes(serde_json::to_vec(&stale).unwrap()));
    let provider = || Some(seattle());

    let schedule =
        resolve_schedule(&store, &provider, &CalculationConfig::default(), now()).unwrap();
    assert!(!schedule.from_cache);
    assert_eq!(schedule.location, seattle());

    let bytes = store.backend().read().unwrap().unwrap();
    let rewritten: CacheEntry = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(rewritten.version, CACHE_VERSION);
}

#[test]
fn test_config_change_recomputes() {
    let store = CacheStore::new(MemoryBackend::new());
    let calls = Cell::new(0);
    let provider = || {
        calls.set(calls.get() + 1);
        Some(seattle())
    };
    let standard = CalculationConfig::default();
    let steep = CalculationConfig {
        fajr_angle: 18.0,
        isha_angle: 18.0,
        ..standard
    };

    resolve_schedule(&store, &provider, &standard, now()).unwrap();
    let schedule = resolve_schedule(&store, &provider, &steep, now()).unwrap();
    assert_eq!(calls.get(), 2);
    assert!(!schedule.from_cache);
    assert_eq!(
        schedule.prayer_times,
        prayer_times(now().date_naive(), &seattle(), &steep)
    );

    let stored = store.get_at(CACHE_VERSION, FRESHNESS_WINDOW_MS, now().timestamp_millis());
    assert_eq!(stored.unwrap().config, steep);

    let again = resolve_schedule(&store, &provider, &steep, now()).unwrap();
    assert_eq!(calls.get(), 2);
    assert!(again.from_cache);
}

// ── Missing location ──

#[test]
fn test_no_location_and_no_cache_is_none() {
    let store = CacheStore::new(MemoryBackend::new());
    let provider = || -> Option<Location> { None };
    assert_eq!(
        resolve_schedule(&store, &provider, &CalculationConfig::default(), now()),
        None
    );
}

#[test]
fn test_cache_hit_does_not_need_location() {
    let store = CacheStore::new(MemoryBackend::new());
    let config = CalculationConfig::default();
    resolve_schedule(&store, &|| Some(seattle()), &config, now()).unwrap();

    let offline = || -> Option<Location> { None };
    let schedule = resolve_schedule(&store, &offline, &config, now()).unwrap();
    assert!(schedule.from_cache);
}

// ── Next prayer ──

#[test]
fn test_next_prayer_matches_selector() {
    let store = CacheStore::new(MemoryBackend::new());
    let provider = || Some(seattle());
    let (schedule, next) =
        next_prayer(&store, &provider, &CalculationConfig::default(), now()).unwrap();
    assert_eq!(next, next_event_at(&schedule.prayer_times, &now()));
    assert!(next.is_some());
}
