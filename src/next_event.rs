use std::fmt;

use chrono::{DateTime, Timelike, Utc};

use crate::angles::normalize_hour;
use crate::types::{NextEvent, Prayer, PrayerTimes};

pub const MINUTES_PER_DAY: i64 = 1440;

pub fn utc_hours(now: &DateTime<Utc>) -> f64 {
    now.hour() as f64
        + now.minute() as f64 / 60.0
        + now.second() as f64 / 3600.0
        + now.nanosecond() as f64 / 3.6e12
}

fn minutes_between(from: f64, to: f64) -> i64 {
    ((to - from) * 60.0).round() as i64
}

pub fn next_event(times: &PrayerTimes, now_hours: f64) -> Option<NextEvent> {
    let now = normalize_hour(now_hours);

    let upcoming = times.iter().find_map(|(prayer, t)| {
        let t = normalize_hour(t?);
        (t > now).then(|| NextEvent {
            prayer,
            tomorrow: false,
            minutes_remaining: minutes_between(now, t),
        })
    });
    if upcoming.is_some() {
        return upcoming;
    }

    let fajr = normalize_hour(times.fajr?);
    Some(NextEvent {
        prayer: Prayer::Fajr,
        tomorrow: true,
        // Strictly under a day, even when now sits on Fajr.
        minutes_remaining: minutes_between(now, fajr + 24.0).min(MINUTES_PER_DAY - 1),
    })
}

pub fn next_event_at(times: &PrayerTimes, now: &DateTime<Utc>) -> Option<NextEvent> {
    next_event(times, utc_hours(now))
}

pub fn hours_to_hm(hours: f64) -> (u32, u32) {
    let total_minutes = (normalize_hour(hours) * 60.0).round() as u32 % MINUTES_PER_DAY as u32;
    (total_minutes / 60, total_minutes % 60)
}

pub fn format_countdown(minutes: i64) -> String {
    let minutes = minutes.max(0);
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }
}

impl fmt::Display for NextEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tomorrow {
            write!(f, "{} (tomorrow)", self.prayer)?;
        } else {
            write!(f, "{}", self.prayer)?;
        }
        write!(f, " in {}", format_countdown(self.minutes_remaining))
    }
}
