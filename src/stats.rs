use crate::config::DayBoundary;
use crate::models::WaterLog;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistorySummary {
    pub total_mugs: u64,
    pub days_logged: usize,
    pub average_per_day: u64,
}

/// Sum of mugs logged on `today`, judged in `boundary`.
pub fn today_total(logs: &[WaterLog], today: NaiveDate, boundary: DayBoundary) -> u64 {
    logs.iter()
        .filter(|log| log_day(&log.date, boundary) == Some(today))
        .map(|log| u64::from(log.mugs))
        .sum()
}

/// Calendar day of a backend timestamp in `boundary`. Strings that are not
/// full timestamps fall back to their leading `YYYY-MM-DD`.
pub fn log_day(date: &str, boundary: DayBoundary) -> Option<NaiveDate> {
    log_local(date, boundary)
        .map(|local| local.date())
        .or_else(|| {
            date.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

/// Wall-clock time of a backend timestamp as seen in `boundary`.
///
/// Zoned timestamps are converted into the boundary. Timestamps without a
/// zone are already wall-clock times and are taken as written; a bare date
/// reads as midnight.
pub fn log_local(date: &str, boundary: DayBoundary) -> Option<NaiveDateTime> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(date) {
        return Some(boundary.localize(instant.with_timezone(&Utc)).naive_local());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
}

/// Stable sort, newest first. Entries with unreadable dates go last and keep
/// their relative order.
pub fn sort_newest_first(logs: &mut [WaterLog], boundary: DayBoundary) {
    logs.sort_by_cached_key(|log| std::cmp::Reverse(log_local(&log.date, boundary)));
}

pub fn summarize(logs: &[WaterLog]) -> HistorySummary {
    let total_mugs: u64 = logs.iter().map(|log| u64::from(log.mugs)).sum();
    let days_logged = logs.len();
    HistorySummary {
        total_mugs,
        days_logged,
        average_per_day: rounded_average(total_mugs, days_logged as u64),
    }
}

// Half rounds up.
fn rounded_average(total: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    (total * 2 + count) / (count * 2)
}
