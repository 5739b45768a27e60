//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for pointing-quorum
#[derive(Parser, Debug)]
#[command(name = "pointing-quorum")]
#[command(author, version, about = "Story-point voting sessions synced to Jira")]
#[command(long_about = r#"
Pointing Quorum runs story-point voting sessions over Jira issues.

A session imports the issues matching a JQL query. Participants vote an
estimation per issue; closing the session averages the numeric votes,
snaps the average onto the Fibonacci scale and writes the result into the
story points field of every issue. The session only closes when every
write succeeded.

Configuration files are loaded from (in priority order):
1. POINTING_* environment variables (e.g. POINTING_TRACKER__TOKEN)
2. --config <path>       Explicit config file
3. ./pointing.toml       Project-level config
4. ~/.config/pointing-quorum/config.toml   Global config

Example:
  pointing-quorum create --query "project = PROJ AND sprint in openSprints()" --guest alice
  pointing-quorum vote <SESSION> PROJ-12 5 --guest bob
  pointing-quorum close <SESSION> --guest alice
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

/// Who is acting: a registered user id or a guest name
#[derive(Args, Debug, Clone, Default)]
#[group(required = true, multiple = false)]
pub struct Requester {
    /// Act as a registered user
    #[arg(long, value_name = "ID")]
    pub user: Option<u64>,

    /// Act as a guest with this display name
    #[arg(long, value_name = "NAME")]
    pub guest: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a session from a JQL query
    Create {
        /// JQL query selecting the issues to estimate
        #[arg(long)]
        query: String,

        /// Jira base URL (defaults to tracker.base_url)
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Jira API token (defaults to tracker.token)
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,

        #[command(flatten)]
        creator: Requester,
    },

    /// Submit or change a vote
    Vote {
        session: String,
        issue: String,
        /// Estimation, e.g. 5 or "?"
        estimation: String,

        #[command(flatten)]
        voter: Requester,
    },

    /// Show a session with votes and a consensus preview
    Show { session: String },

    /// Write consensus values to Jira and close the session
    Close {
        session: String,

        #[command(flatten)]
        requester: Requester,
    },

    /// Remove an issue and its votes from an open session
    RemoveIssue {
        session: String,
        issue: String,

        #[command(flatten)]
        requester: Requester,
    },

    /// Print the estimation scale
    Scale {
        /// Generate up to the first value >= this ceiling
        #[arg(long)]
        ceiling: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_close_as_guest() {
        let cli = Cli::try_parse_from([
            "pointing-quorum",
            "close",
            "2c0f3c1e-6b0e-4bb8-9a0e-0e4e0f7f1a11",
            "--guest",
            "alice",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Text);
        match cli.command {
            Command::Close { requester, .. } => {
                assert_eq!(requester.guest.as_deref(), Some("alice"));
                assert!(requester.user.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_requester_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["pointing-quorum", "close", "abc"]).is_err());
        assert!(
            Cli::try_parse_from([
                "pointing-quorum",
                "close",
                "abc",
                "--user",
                "1",
                "--guest",
                "x"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_vote_keeps_raw_estimation() {
        let cli = Cli::try_parse_from([
            "pointing-quorum",
            "--output",
            "json",
            "vote",
            "abc",
            "PROJ-1",
            "?",
            "--user",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Command::Vote { estimation, voter, .. } => {
                assert_eq!(estimation, "?");
                assert_eq!(voter.user, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
