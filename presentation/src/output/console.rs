//! Console output formatter for sessions and close reports

use colored::Colorize;
use pointing_application::{CreateSessionOutput, SessionView, VoteWrite};
use pointing_domain::{
    CloseReport, ConsensusResult, EstimationScale, IssueSyncResult, IssueSyncStatus,
    SessionState, round_for_display,
};
use serde::Serialize;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_created(output: &CreateSessionOutput) -> String {
        format!(
            "{} session {} with {} issues\n",
            "Created".green().bold(),
            output.session_id.as_str().bold(),
            output.issues_count
        )
    }

    pub fn format_vote(issue: &str, written: VoteWrite) -> String {
        match written {
            VoteWrite::Created => format!("{} vote on {}\n", "Recorded".green(), issue),
            VoteWrite::Updated => format!("{} vote on {}\n", "Updated".yellow(), issue),
        }
    }

    pub fn format_scale(scale: &EstimationScale) -> String {
        let values: Vec<String> = scale.values().iter().map(u64::to_string).collect();
        format!("{} {}\n", "Scale:".cyan().bold(), values.join(", "))
    }

    /// Format a session snapshot
    pub fn format_session(view: &SessionView) -> String {
        let mut output = String::new();
        let session = &view.session;

        output.push_str(&Self::header("Voting Session"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Session:".cyan().bold(), session.id));
        output.push_str(&format!("{} {}\n", "Tracker:".cyan().bold(), session.tracker_url));
        output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), session.query));
        output.push_str(&format!("{} {}\n", "Creator:".cyan().bold(), session.creator));
        let state = match session.state {
            SessionState::Open => "open".green(),
            SessionState::Closed => "closed".dimmed(),
        };
        output.push_str(&format!("{} {}\n", "State:".cyan().bold(), state));

        output.push_str(&Self::section_header(&format!(
            "Issues ({}, {} votes)",
            view.issues.len(),
            view.vote_count()
        )));
        for item in &view.issues {
            output.push_str(&format!(
                "\n{} {}\n",
                format!("── {} ──", item.issue.key).yellow().bold(),
                item.issue.title
            ));
            output.push_str(&format!("  {}\n", item.issue.url.dimmed()));
            if let Some(points) = item.issue.current_story_points {
                output.push_str(&format!("  Current points: {}\n", points));
            }
            for vote in &item.votes {
                output.push_str(&format!("  * {}: {}\n", vote.voter, vote.estimation));
            }
            output.push_str(&format!("  {}\n", Self::preview_line(&item.preview)));
        }

        output.push_str(&Self::footer());
        output
    }

    fn preview_line(preview: &ConsensusResult) -> String {
        match preview {
            ConsensusResult::Skipped { reason } => {
                format!("{} {}", "Preview:".dimmed(), reason)
            }
            ConsensusResult::Elected {
                average,
                elected,
                vote_count,
            } => format!(
                "{} average {:.2} from {} votes -> {}",
                "Preview:".dimmed(),
                round_for_display(*average),
                vote_count,
                elected.to_string().bold()
            ),
        }
    }

    /// Format the outcome of a close attempt
    pub fn format_close_report(report: &CloseReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Close Report"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Session:".cyan().bold(),
            report.session_id
        ));

        output.push_str(&Self::section_header("Issues"));
        for result in &report.results {
            output.push_str(&Self::result_line(result));
        }

        output.push_str(&format!("\n{} {}\n", "Summary:".cyan().bold(), report.summary()));
        if report.closed {
            output.push_str(&format!("{}\n", "Session closed.".green().bold()));
        } else {
            output.push_str(&format!(
                "{}\n",
                "Session stays open. Values already written to the tracker were kept; run close again once the failures are fixed."
                    .red()
                    .bold()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    fn result_line(result: &IssueSyncResult) -> String {
        let status = match result.status {
            IssueSyncStatus::Success => "success".green(),
            IssueSyncStatus::Skipped => "skipped".dimmed(),
            IssueSyncStatus::Failed => "failed".red(),
            IssueSyncStatus::Error => "error".red().bold(),
        };

        let mut line = format!("  {:<12} {}", result.issue_key.as_str(), status);
        if let (Some(average), Some(elected)) = (result.display_average(), result.elected_value) {
            line.push_str(&format!(" (average {:.2} -> {})", average, elected));
        }
        if let Some(reason) = &result.reason {
            line.push_str(&format!(": {}", reason));
        }
        line.push('\n');
        line
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
