//! Consensus computation over one issue's votes

use super::scale::EstimationScale;
use super::value::Estimation;
use serde::{Deserialize, Serialize};

/// Why an issue produced no consensus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Nobody voted on the issue
    NoVotes,
    /// Votes exist but none of them are numeric
    NoNumericVotes,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoVotes => "No votes",
            SkipReason::NoNumericVotes => "No valid numeric votes",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the consensus step for a single issue
///
/// # Example
///
/// ```
/// use pointing_domain::estimation::{compute_consensus, ConsensusResult, Estimation, EstimationScale};
///
/// let votes = vec![Estimation::new("3"), Estimation::new("5"), Estimation::new("?")];
/// let result = compute_consensus(&votes, &EstimationScale::default());
///
/// assert_eq!(result.elected(), Some(5)); // 4.0 is a tie between 3 and 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConsensusResult {
    Skipped {
        reason: SkipReason,
    },
    Elected {
        /// Unrounded arithmetic mean of the numeric votes
        average: f64,
        /// Scale value the average snapped to
        elected: u64,
        /// Number of numeric votes that contributed
        vote_count: usize,
    },
}

impl ConsensusResult {
    pub fn is_skipped(&self) -> bool {
        matches!(self, ConsensusResult::Skipped { .. })
    }

    pub fn elected(&self) -> Option<u64> {
        match self {
            ConsensusResult::Elected { elected, .. } => Some(*elected),
            ConsensusResult::Skipped { .. } => None,
        }
    }

    pub fn average(&self) -> Option<f64> {
        match self {
            ConsensusResult::Elected { average, .. } => Some(*average),
            ConsensusResult::Skipped { .. } => None,
        }
    }

    pub fn vote_count(&self) -> Option<usize> {
        match self {
            ConsensusResult::Elected { vote_count, .. } => Some(*vote_count),
            ConsensusResult::Skipped { .. } => None,
        }
    }
}

/// Compute the consensus for one issue.
///
/// Non-numeric votes are ignored. The mean of the numeric votes is snapped
/// onto `scale` without any intermediate rounding.
pub fn compute_consensus<'a, I>(votes: I, scale: &EstimationScale) -> ConsensusResult
where
    I: IntoIterator<Item = &'a Estimation>,
{
    let mut total_votes = 0usize;
    let mut numeric: Vec<f64> = Vec::new();
    for vote in votes {
        total_votes += 1;
        if let Some(value) = vote.numeric() {
            numeric.push(value);
        }
    }

    if total_votes == 0 {
        return ConsensusResult::Skipped {
            reason: SkipReason::NoVotes,
        };
    }
    if numeric.is_empty() {
        return ConsensusResult::Skipped {
            reason: SkipReason::NoNumericVotes,
        };
    }

    let average = numeric.iter().sum::<f64>() / numeric.len() as f64;
    ConsensusResult::Elected {
        average,
        elected: scale.snap(average),
        vote_count: numeric.len(),
    }
}

/// Round an average to two decimals for display
pub fn round_for_display(average: f64) -> f64 {
    (average * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes(raw: &[&str]) -> Vec<Estimation> {
        raw.iter().map(|v| Estimation::new(*v)).collect()
    }

    #[test]
    fn test_no_votes() {
        let result = compute_consensus(&votes(&[]), &EstimationScale::default());
        assert_eq!(
            result,
            ConsensusResult::Skipped {
                reason: SkipReason::NoVotes
            }
        );
        assert_eq!(SkipReason::NoVotes.to_string(), "No votes");
    }

    #[test]
    fn test_only_non_numeric_votes() {
        let result = compute_consensus(&votes(&["?", "abc"]), &EstimationScale::default());
        assert_eq!(
            result,
            ConsensusResult::Skipped {
                reason: SkipReason::NoNumericVotes
            }
        );
        assert_eq!(
            SkipReason::NoNumericVotes.to_string(),
            "No valid numeric votes"
        );
    }

    #[test]
    fn test_tie_between_three_and_five() {
        let result = compute_consensus(&votes(&["3", "5", "?"]), &EstimationScale::default());
        assert_eq!(
            result,
            ConsensusResult::Elected {
                average: 4.0,
                elected: 5,
                vote_count: 2,
            }
        );
    }

    #[test]
    fn test_display_rounding_does_not_change_election() {
        // mean = 2.4966..., displays as 2.5 but still snaps to 2
        let result = compute_consensus(
            &votes(&["2", "2", "3.49"]),
            &EstimationScale::default(),
        );
        assert_eq!(result.elected(), Some(2));
        assert_eq!(round_for_display(result.average().unwrap()), 2.5);
    }

    #[test]
    fn test_unanimous_vote() {
        let result = compute_consensus(&votes(&["8", "8", "8"]), &EstimationScale::default());
        assert_eq!(result.elected(), Some(8));
        assert_eq!(result.vote_count(), Some(3));
    }

    #[test]
    fn test_custom_scale() {
        let scale = EstimationScale::generate(10);
        let result = compute_consensus(&votes(&["40"]), &scale);
        assert_eq!(result.elected(), Some(13));
    }

    #[test]
    fn test_serialized_shape() {
        let result = ConsensusResult::Skipped {
            reason: SkipReason::NoVotes,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert_eq!(json["reason"], "no_votes");
    }
}
