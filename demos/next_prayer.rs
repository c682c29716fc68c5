use chrono::Utc;

use prayer_clock::cache::{CacheStore, FileBackend};
use prayer_clock::next_event::hours_to_hm;
use prayer_clock::schedule::next_prayer;
use prayer_clock::types::{CalculationConfig, Location};

fn main() {
    env_logger::init();

    let cache_path = std::env::temp_dir().join("prayer_clock").join("cache.json");
    let store = CacheStore::new(FileBackend::new(cache_path));
    let config = CalculationConfig::default();

    let seattle = || Location::new(47.6, -122.3, Some("Seattle".to_string())).ok();

    let Some((schedule, next)) = next_prayer(&store, &seattle, &config, Utc::now()) else {
        println!("No location available");
        return;
    };

    println!("=== Prayer Times (UTC) ===");
    println!(
        "Location: {} ({:.1}°, {:.1}°){}",
        schedule.location.city.as_deref().unwrap_or("unknown"),
        schedule.location.latitude,
        schedule.location.longitude,
        if schedule.from_cache { " [cached]" } else { "" }
    );
    for (prayer, t) in schedule.prayer_times.iter() {
        match t {
            Some(h) => {
                let (hh, mm) = hours_to_hm(h);
                println!("{:<8} {:02}:{:02}", prayer, hh, mm);
            }
            None => println!("{:<8} --:--", prayer),
        }
    }
    println!();
    match next {
        Some(event) => println!("{}", event),
        None => println!("No upcoming prayer"),
    }
}
