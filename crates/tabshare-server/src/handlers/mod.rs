//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod availability;
pub mod billing;
pub mod health;
pub mod payments;
pub mod receipts;

// Re-export all handlers for use in router
pub use availability::*;
pub use billing::*;
pub use health::*;
pub use payments::*;
pub use receipts::*;
