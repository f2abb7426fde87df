//! Common Availability Resolver
//!
//! Given every party member's weekly hourly availability grid and the
//! party's already-scheduled events, computes the hours where all
//! members are simultaneously free, grouped into human-readable
//! contiguous ranges. Pure and synchronous: identical inputs always
//! produce identical outputs.

mod resolve;
pub mod time;
mod types;

pub use resolve::{find_common_availability, is_slot_scheduled};
pub use time::{format_hour, group_consecutive_hours, parse_12_hour};
pub use types::{AvailabilityGrid, DayAvailability, MemberProfile, ScheduledTime, TimeSlot, UpcomingEvent};
