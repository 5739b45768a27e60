//! Core domain concepts shared across all subdomains.
//!
//! - [`ids::SessionId`] / [`ids::IssueKey`]: validated identifiers
//! - [`error::DomainError`]: domain-level validation errors

pub mod error;
pub mod ids;
