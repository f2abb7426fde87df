//! Receipt Reconciliation Engine
//!
//! Turns a vision model's raw completion text into a mathematically
//! consistent, per-person billable breakdown:
//!
//! 1. `extract` — greedy brace-match JSON extraction from the completion
//! 2. `merge` — fold "+ Onion" style modifier lines into their parent item
//! 3. `reconcile` — normalize monetary noise, derive per-unit price/tax,
//!    fan each line item out into one sub-item per unit of quantity, and
//!    cross-check item sums against the stated subtotal/total
//!
//! Malformed business input never raises past this module's boundary:
//! unparseable amounts degrade to 0, unparseable quantities to 1, and a
//! completion with no JSON at all yields a sentinel all-`"N/A"` analysis
//! that preserves the raw text for manual inspection.

mod extract;
mod merge;
pub mod money;
mod raw;
mod reconcile;

pub use extract::extract_receipt_json;
pub use merge::merge_modifier_lines;
pub use raw::{RawLineItem, RawReceipt};
pub use reconcile::{
    analyze_response, reconcile, reconcile_line_item, resolve_tax_rate, LineItem, ReceiptAnalysis,
    SubItem,
};

/// Sentinel for fields the vision model could not extract.
///
/// Deliberately a string (not `None`) so downstream consumers and stored
/// documents can distinguish "not extractable" from "never attempted".
pub const NOT_AVAILABLE: &str = "N/A";
