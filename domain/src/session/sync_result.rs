//! Per-issue synchronization records and the session close report
//!
//! These are derived fresh on every close attempt and never persisted.

use crate::core::ids::{IssueKey, SessionId};
use crate::estimation::{ConsensusResult, SkipReason, round_for_display};
use serde::{Deserialize, Serialize, Serializer};

/// Final status of one issue during a close attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSyncStatus {
    /// Nothing to write (no votes or no numeric votes)
    Skipped,
    /// The tracker confirmed the write
    Success,
    /// The tracker did not confirm success after all retries
    Failed,
    /// Unexpected failure
    Error,
}

impl IssueSyncStatus {
    /// `Failed` and `Error` block the session from closing
    pub fn blocks_close(&self) -> bool {
        matches!(self, IssueSyncStatus::Failed | IssueSyncStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSyncStatus::Skipped => "skipped",
            IssueSyncStatus::Success => "success",
            IssueSyncStatus::Failed => "failed",
            IssueSyncStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for IssueSyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn serialize_display_average<S: Serializer>(
    average: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match average {
        Some(avg) => serializer.serialize_some(&round_for_display(*avg)),
        None => serializer.serialize_none(),
    }
}

/// Result record for one issue
///
/// `average` keeps full precision in memory and is rounded to two decimals
/// only when serialized or displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSyncResult {
    pub issue_key: IssueKey,
    pub status: IssueSyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_display_average"
    )]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elected_value: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributing_vote_count: Option<usize>,
}

impl IssueSyncResult {
    fn bare(issue_key: IssueKey, status: IssueSyncStatus, reason: Option<String>) -> Self {
        Self {
            issue_key,
            status,
            reason,
            average: None,
            elected_value: None,
            contributing_vote_count: None,
        }
    }

    pub fn skipped(issue_key: IssueKey, reason: SkipReason) -> Self {
        Self::bare(
            issue_key,
            IssueSyncStatus::Skipped,
            Some(reason.as_str().to_string()),
        )
    }

    pub fn success(issue_key: IssueKey, consensus: &ConsensusResult) -> Self {
        Self::bare(issue_key, IssueSyncStatus::Success, None).with_consensus(consensus)
    }

    pub fn failed(issue_key: IssueKey, consensus: &ConsensusResult, error: impl Into<String>) -> Self {
        Self::bare(issue_key, IssueSyncStatus::Failed, Some(error.into())).with_consensus(consensus)
    }

    pub fn error(issue_key: IssueKey, message: impl Into<String>) -> Self {
        Self::bare(issue_key, IssueSyncStatus::Error, Some(message.into()))
    }

    /// Attach the consensus figures that were (or would have been) written
    pub fn with_consensus(mut self, consensus: &ConsensusResult) -> Self {
        if let ConsensusResult::Elected {
            average,
            elected,
            vote_count,
        } = consensus
        {
            self.average = Some(*average);
            self.elected_value = Some(*elected);
            self.contributing_vote_count = Some(*vote_count);
        }
        self
    }

    /// Average rounded to two decimals
    pub fn display_average(&self) -> Option<f64> {
        self.average.map(round_for_display)
    }
}

/// Aggregated outcome of one close attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseReport {
    pub session_id: SessionId,
    /// True iff no issue ended `failed` or `error`
    pub can_close: bool,
    /// True once the open -> closed transition has been persisted
    #[serde(default)]
    pub closed: bool,
    /// Per-issue records in stored issue order
    pub results: Vec<IssueSyncResult>,
}

impl CloseReport {
    pub fn from_results(session_id: SessionId, results: Vec<IssueSyncResult>) -> Self {
        let can_close = !results.iter().any(|r| r.status.blocks_close());
        Self {
            session_id,
            can_close,
            closed: false,
            results,
        }
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn count(&self, status: IssueSyncStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Records that prevented the session from closing
    pub fn blocking(&self) -> impl Iterator<Item = &IssueSyncResult> {
        self.results.iter().filter(|r| r.status.blocks_close())
    }

    /// One-line summary, e.g. "2 success, 1 skipped, 1 failed, 0 error"
    pub fn summary(&self) -> String {
        format!(
            "{} success, {} skipped, {} failed, {} error",
            self.count(IssueSyncStatus::Success),
            self.count(IssueSyncStatus::Skipped),
            self.count(IssueSyncStatus::Failed),
            self.count(IssueSyncStatus::Error),
        )
    }
}
