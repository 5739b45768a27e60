//! Application layer for pointing-quorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BehaviorConfig, RetryPolicy, SyncParams};
pub use ports::{
    progress::{NoSyncProgress, SyncProgressNotifier},
    store::{EstimationStore, IssueStore, SessionStore, StoreError, VoteStore, VoteWrite},
    sync_logger::{NoSyncAuditLogger, SyncAuditLogger, SyncEvent},
    tracker::{TrackerClient, TrackerError, TrackerIssue},
};
pub use use_cases::close_session::{CloseSessionError, CloseSessionInput, CloseSessionUseCase};
pub use use_cases::create_session::{
    CreateSessionError, CreateSessionInput, CreateSessionOutput, CreateSessionUseCase,
};
pub use use_cases::external_update::{UpdateConfirmation, UpdateError, attempt_external_update};
pub use use_cases::remove_issue::{RemoveIssueError, RemoveIssueInput, RemoveIssueUseCase};
pub use use_cases::submit_vote::{SubmitVoteError, SubmitVoteInput, SubmitVoteUseCase};
pub use use_cases::view_session::{
    IssueView, SessionSummary, SessionView, ViewSessionError, ViewSessionUseCase,
};
