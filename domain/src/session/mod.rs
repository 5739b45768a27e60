//! Voting session domain.
//!
//! - [`entities::VotingSession`]: a voting round bound to a tracker query
//! - [`entities::Issue`]: a tracker work item imported into a session
//! - [`vote::Vote`]: one voter's estimation for one issue
//! - [`sync_result::CloseReport`]: per-issue outcome of a close attempt

pub mod entities;
pub mod sync_result;
pub mod vote;
