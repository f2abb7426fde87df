//! Availability types
//!
//! Grids are sparse maps: lowercase weekday name -> two-digit hour key
//! ("00".."23") -> free/busy. A missing day or hour key means
//! unavailable; missing data never counts as free.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Weekly availability grid for one member.
pub type AvailabilityGrid = HashMap<String, HashMap<String, bool>>;

/// A party member's profile as supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberProfile {
    #[serde(default)]
    pub name: Option<String>,
    /// day -> hour -> free; owned by the member, mutated only through
    /// profile updates
    #[serde(default)]
    pub availability: AvailabilityGrid,
}

/// When an event occupies the calendar.
///
/// Times are 12-hour display strings (`"6:00 PM"`); a missing end time
/// means a single-hour event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTime {
    pub day: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// An upcoming party event that blocks availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<ScheduledTime>,
}

/// One qualifying single-hour slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Two-digit hour key ("14" denotes the 14:00-15:00 window)
    pub hour: String,
    /// `"2:00 PM - 3:00 PM"`
    pub time_range: String,
    pub start_time: String,
    pub end_time: String,
    /// Selection state for the scheduling UI; always false from the resolver
    pub is_selected: bool,
}

/// All qualifying slots for one weekday.
///
/// `available_slots` carries the raw hour keys, `hour_count` the number
/// of qualifying hours, and `total_slots` the 24 slots considered per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    /// Capitalized weekday name ("Monday")
    pub day: String,
    pub time_slots: Vec<TimeSlot>,
    /// Contiguous hours compressed for display ("9:00 AM - 12:00 PM")
    pub time_ranges: Vec<String>,
    pub available_slots: Vec<String>,
    pub hour_count: usize,
    pub total_slots: usize,
}
