//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod progress;
pub mod store;
pub mod sync_logger;
pub mod tracker;
