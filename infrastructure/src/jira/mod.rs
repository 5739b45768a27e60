//! Jira adapter for the tracker port
//!
//! - Search: `GET {base}/rest/api/2/search?jql=..&maxResults=..&fields=..`
//! - Write:  `PUT {base}/rest/api/2/issue/{key}` with `{"fields": {<field>: value}}`
//!
//! Requests authenticate with `Authorization: Bearer <token>`; any 2xx
//! answer counts as success.

mod client;
mod types;

pub use client::JiraTrackerClient;
