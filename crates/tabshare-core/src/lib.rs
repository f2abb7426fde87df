//! Tabshare Core Library
//!
//! Shared functionality for the Tabshare group-expense tool:
//! - Receipt reconciliation engine (vision model output -> billable breakdown)
//! - Common availability resolver for party scheduling
//! - Pluggable vision-language backends (OpenAI-compatible servers, mock)
//! - Prompt library for customizable extraction prompts
//! - Per-member bill splitting over reconciled receipts
//! - PayPal settlement client
//!
//! The reconciliation engine and the availability resolver are pure,
//! synchronous transformations with no I/O of their own; all network
//! suspension lives in the vision and PayPal clients.

pub mod availability;
pub mod billing;
pub mod error;
pub mod paypal;
pub mod prompts;
pub mod receipt;
pub mod vision;

pub use availability::{
    find_common_availability, AvailabilityGrid, DayAvailability, MemberProfile, ScheduledTime,
    TimeSlot, UpcomingEvent,
};
pub use billing::{split_amounts, MemberAmount, SubItemRef};
pub use error::{Error, Result};
pub use paypal::{OrderCaptured, OrderCreated, PayPalClient};
pub use prompts::{Prompt, PromptId, PromptLibrary};
pub use receipt::{analyze_response, reconcile, LineItem, RawReceipt, ReceiptAnalysis, SubItem};
pub use vision::{MockBackend, OpenAICompatibleBackend, VisionBackend, VisionClient};
