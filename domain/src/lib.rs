//! Domain layer for pointing-quorum
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consensus Engine
//!
//! - **Scale**: the Fibonacci-like set of permissible story-point values
//! - **Consensus**: mean of the numeric votes, snapped onto the scale
//!
//! ## Sessions
//!
//! - **Session**: a voting round over tracker issues, open until closed once
//! - **Close report**: the per-issue outcome of synchronizing estimates

pub mod core;
pub mod estimation;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{
    error::{DomainError, require_field},
    ids::{IssueKey, SessionId},
};
pub use estimation::{
    ConsensusResult, DEFAULT_SCALE_CEILING, Estimation, EstimationScale, SkipReason,
    compute_consensus, generate_scale, round_for_display, snap_to_scale,
};
pub use session::{
    entities::{Credential, Issue, SessionState, TrackerConnection, VotingSession},
    sync_result::{CloseReport, IssueSyncResult, IssueSyncStatus},
    vote::{Vote, VoterIdentity},
};
