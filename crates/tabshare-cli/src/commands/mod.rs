//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Vision extraction over a receipt image
//! - `availability` - Common availability resolution
//! - `prompts` - Prompt library management commands
//! - `reconcile` - Reconciliation of saved model responses
//! - `serve` - Web server command

pub mod analyze;
pub mod availability;
pub mod prompts;
pub mod reconcile;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use availability::*;
pub use prompts::*;
pub use reconcile::*;
pub use serve::*;
