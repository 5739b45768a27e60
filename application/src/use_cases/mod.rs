//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod close_session;
pub mod create_session;
pub mod external_update;
pub mod remove_issue;
pub(crate) mod shared;
pub mod submit_vote;
#[cfg(test)]
pub(crate) mod test_support;
pub mod view_session;
