//! Intersection of member grids minus scheduled events

use tracing::warn;

use super::time::{format_hour, group_consecutive_hours, parse_12_hour, DAYS};
use super::types::{DayAvailability, MemberProfile, TimeSlot, UpcomingEvent};

/// Whether an existing event occupies the given day/hour slot.
///
/// An event blocks `hour` iff `start_hour <= hour < end_hour`; a missing
/// end time means a single-hour event. Events whose start time fails to
/// parse are skipped (not defaulted to midnight, which would falsely
/// block the 12 AM slot).
pub fn is_slot_scheduled(day: &str, hour: u32, events: &[UpcomingEvent]) -> bool {
    for event in events {
        let Some(scheduled) = &event.scheduled_time else {
            continue;
        };
        if !scheduled.day.eq_ignore_ascii_case(day) {
            continue;
        }

        let Some(start_raw) = scheduled.start_time.as_deref() else {
            continue;
        };
        let Some(start) = parse_12_hour(start_raw) else {
            warn!(
                event = event.name.as_deref().unwrap_or("unnamed"),
                start_time = start_raw,
                "skipping event with unparseable start time"
            );
            continue;
        };

        let end = match scheduled.end_time.as_deref() {
            Some(end_raw) => parse_12_hour(end_raw).unwrap_or_else(|| {
                warn!(
                    event = event.name.as_deref().unwrap_or("unnamed"),
                    end_time = end_raw,
                    "unparseable end time, assuming single-hour event"
                );
                start + 1
            }),
            None => start + 1,
        };

        if start <= hour && hour < end {
            return true;
        }
    }
    false
}

/// Find the hours where every member is simultaneously free.
///
/// Iterates days Monday-first and hours ascending. A slot qualifies only
/// if no event occupies it and *every* member's grid marks it free; a
/// missing day or hour key is unavailable (missing data never counts as
/// free, so one member with an empty grid blanks the whole result).
/// Days without qualifying hours are omitted.
///
/// Callers must supply at least one member; the empty-members boundary
/// check belongs to them.
pub fn find_common_availability(
    members: &[MemberProfile],
    events: &[UpcomingEvent],
) -> Vec<DayAvailability> {
    let mut result = Vec::new();

    for day in DAYS {
        let mut hours: Vec<String> = Vec::new();

        for hour in 0..24u32 {
            if is_slot_scheduled(day, hour, events) {
                continue;
            }

            let key = format!("{:02}", hour);
            let all_free = !members.is_empty()
                && members.iter().all(|member| {
                    member
                        .availability
                        .get(day)
                        .and_then(|grid| grid.get(&key))
                        .copied()
                        .unwrap_or(false)
                });

            if all_free {
                hours.push(key);
            }
        }

        if hours.is_empty() {
            continue;
        }

        let time_slots: Vec<TimeSlot> = hours
            .iter()
            .map(|key| {
                let hour: u32 = key.parse().unwrap_or(0);
                let start_time = format_hour(hour);
                let end_time = format_hour(hour + 1);
                TimeSlot {
                    hour: key.clone(),
                    time_range: format!("{} - {}", start_time, end_time),
                    start_time,
                    end_time,
                    is_selected: false,
                }
            })
            .collect();

        result.push(DayAvailability {
            day: display_day(day),
            time_ranges: group_consecutive_hours(&hours),
            hour_count: hours.len(),
            total_slots: 24,
            available_slots: hours,
            time_slots,
        });
    }

    result
}

/// "monday" -> "Monday"
fn display_day(day: &str) -> String {
    let mut chars = day.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
