//! 12-hour clock parsing and display formatting

use std::sync::OnceLock;

use regex::Regex;

/// Canonical weekday iteration order (Monday first). Keeping this order
/// fixed is what keeps range compression correct.
pub(crate) const DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

fn clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2}):(\d{2})").expect("valid clock regex"))
}

/// Parse a `"H:MM AM/PM"` display time into a 24-hour integer hour.
///
/// The leading `H:MM` is taken via regex and the meridiem detected
/// case-insensitively anywhere in the string; `12 AM` maps to 0 and
/// `12 PM` stays 12. Returns `None` for strings with no clock at all or
/// an out-of-range hour — callers skip such events rather than guessing.
pub fn parse_12_hour(raw: &str) -> Option<u32> {
    let caps = clock_re().captures(raw)?;
    let mut hour: u32 = caps[1].parse().ok()?;

    let lowered = raw.to_lowercase();
    if lowered.contains("pm") && hour != 12 {
        hour += 12;
    } else if lowered.contains("am") && hour == 12 {
        hour = 0;
    }

    if hour > 23 {
        return None;
    }
    Some(hour)
}

/// Format an hour-of-day for display.
///
/// Wraps mod 24 so a range ending at hour 24 renders as `"12:00 AM"`.
pub fn format_hour(hour: u32) -> String {
    match hour % 24 {
        0 => "12:00 AM".to_string(),
        h @ 1..=11 => format!("{}:00 AM", h),
        12 => "12:00 PM".to_string(),
        h => format!("{}:00 PM", h - 12),
    }
}

/// Compress sorted hour keys into contiguous display ranges.
///
/// Input hours are ascending (the resolver's fixed iteration order
/// guarantees it). Each maximal run `[start, end]` of consecutive hours
/// renders as `format_hour(start) - format_hour(end + 1)`: an hour key
/// "18" denotes the 18:00-19:00 window, so the displayed end is one
/// hour past the last qualifying hour.
pub fn group_consecutive_hours(hours: &[String]) -> Vec<String> {
    let parsed: Vec<u32> = hours.iter().filter_map(|h| h.parse().ok()).collect();
    if parsed.is_empty() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut start = parsed[0];
    let mut end = parsed[0];

    for &hour in &parsed[1..] {
        if hour == end + 1 {
            end = hour;
        } else {
            ranges.push(format!("{} - {}", format_hour(start), format_hour(end + 1)));
            start = hour;
            end = hour;
        }
    }
    ranges.push(format!("{} - {}", format_hour(start), format_hour(end + 1)));

    ranges
}
