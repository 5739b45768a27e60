//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`SyncParams`]: retry policy, estimation scale and tracker search limits
//! - [`BehaviorConfig`]: boundary timeout for the close operation

pub mod behavior;
pub mod sync_params;

pub use behavior::BehaviorConfig;
pub use sync_params::{RetryPolicy, SyncParams};
