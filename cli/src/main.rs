//! CLI entrypoint for Pointing Quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use pointing_application::{
    CloseSessionInput, CloseSessionUseCase, CreateSessionInput, CreateSessionUseCase,
    RemoveIssueInput, RemoveIssueUseCase, SubmitVoteInput, SubmitVoteUseCase,
    SyncAuditLogger, ViewSessionUseCase, VoteWrite,
};
use pointing_domain::EstimationScale;
use pointing_infrastructure::{
    ConfigLoader, FileConfig, JiraTrackerClient, JsonlSyncLogger, LocalStore,
};
use pointing_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, Requester, SimpleProgress,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Exit code when a close was attempted but the session stayed open
const EXIT_CLOSE_BLOCKED: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(&cli, &config);
    info!("Starting Pointing Quorum");

    run(cli, config).await
}

/// Console logging chosen by `-v` (or `RUST_LOG`), plus an optional log file
fn init_logging(
    cli: &Cli,
    config: &FileConfig,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut guard = None;
    let file_layer = config.logging.file.as_ref().and_then(|path| {
        let name = path.file_name()?;
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => std::path::Path::new("."),
        };
        let appender = tracing_appender::rolling::daily(dir, name);
        let (writer, g) = tracing_appender::non_blocking(appender);
        guard = Some(g);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter()),
        )
    });

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();
    guard
}

async fn open_store(config: &FileConfig) -> Result<Arc<LocalStore>> {
    let path = config
        .storage
        .resolved_path()
        .ok_or_else(|| anyhow!("No storage path configured and no data directory available"))?;
    let store = LocalStore::open(&path)
        .await
        .with_context(|| format!("Failed to open session store {}", path.display()))?;
    Ok(Arc::new(store))
}

fn tracker(config: &FileConfig) -> Result<Arc<JiraTrackerClient>> {
    let client = JiraTrackerClient::from_config(&config.tracker)
        .context("Failed to create tracker client")?;
    Ok(Arc::new(client))
}

fn print(cli_output: OutputFormat, text: String, json: String) {
    match cli_output {
        OutputFormat::Text => print!("{}", text),
        OutputFormat::Json => println!("{}", json),
    }
}

async fn run(cli: Cli, config: FileConfig) -> Result<ExitCode> {
    let params = config.sync_params();

    match cli.command {
        Command::Scale { ceiling } => {
            let scale = EstimationScale::generate(ceiling.unwrap_or(params.scale_ceiling));
            print(
                cli.output,
                ConsoleFormatter::format_scale(&scale),
                ConsoleFormatter::format_json(&scale.values()),
            );
        }

        Command::Create {
            query,
            url,
            token,
            creator,
        } => {
            let input = CreateSessionInput {
                tracker_url: url.or_else(|| config.tracker.base_url.clone()),
                tracker_token: token.or_else(|| config.tracker.token.clone()),
                query: Some(query),
                user_id: creator.user,
                guest_name: creator.guest,
            };
            let use_case =
                CreateSessionUseCase::new(open_store(&config).await?, tracker(&config)?)
                    .with_params(params);
            let output = use_case.execute(input).await?;

            let json = serde_json::json!({
                "session_id": output.session_id,
                "issues_count": output.issues_count,
            });
            print(
                cli.output,
                ConsoleFormatter::format_created(&output),
                ConsoleFormatter::format_json(&json),
            );
        }

        Command::Vote {
            session,
            issue,
            estimation,
            voter,
        } => {
            let input = SubmitVoteInput {
                session_id: session,
                issue_key: issue.clone(),
                user_id: voter.user,
                guest_name: voter.guest,
                estimation: Some(estimation),
            };
            let written = SubmitVoteUseCase::new(open_store(&config).await?)
                .execute(input)
                .await?;

            let json = serde_json::json!({
                "issue_key": issue,
                "updated": written == VoteWrite::Updated,
            });
            print(
                cli.output,
                ConsoleFormatter::format_vote(&issue, written),
                ConsoleFormatter::format_json(&json),
            );
        }

        Command::Show { session } => {
            let view = ViewSessionUseCase::new(open_store(&config).await?)
                .with_params(params)
                .execute(&session)
                .await?;
            print(
                cli.output,
                ConsoleFormatter::format_session(&view),
                ConsoleFormatter::format_json(&view),
            );
        }

        Command::RemoveIssue {
            session,
            issue,
            requester,
        } => {
            let input = RemoveIssueInput {
                session_id: session,
                issue_key: issue.clone(),
                user_id: requester.user,
                guest_name: requester.guest,
            };
            let removed_votes = RemoveIssueUseCase::new(open_store(&config).await?)
                .execute(input)
                .await?;

            let json = serde_json::json!({
                "issue_key": issue,
                "removed_votes": removed_votes,
            });
            print(
                cli.output,
                format!("Removed {} ({} votes)\n", issue, removed_votes),
                ConsoleFormatter::format_json(&json),
            );
        }

        Command::Close { session, requester } => {
            return close(&cli.output, cli.quiet, &config, session, requester).await;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn close(
    output: &OutputFormat,
    quiet: bool,
    config: &FileConfig,
    session: String,
    requester: Requester,
) -> Result<ExitCode> {
    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling close");
                token.cancel();
            }
        });
    }

    let mut use_case = CloseSessionUseCase::new(open_store(config).await?, tracker(config)?)
        .with_params(config.sync_params())
        .with_cancellation(cancellation.clone());
    if let Some(path) = &config.logging.audit_log {
        if let Some(logger) = JsonlSyncLogger::new(path) {
            let logger: Arc<dyn SyncAuditLogger> = Arc::new(logger);
            use_case = use_case.with_audit_logger(logger);
        }
    }

    let input = CloseSessionInput {
        session_id: session,
        user_id: requester.user,
        guest_name: requester.guest,
    };

    let run = async {
        if quiet || *output == OutputFormat::Json {
            use_case.execute(input).await
        } else if std::io::stderr().is_terminal() {
            use_case
                .execute_with_progress(input, &ProgressReporter::new())
                .await
        } else {
            use_case.execute_with_progress(input, &SimpleProgress).await
        }
    };

    let report = match config.behavior().close_timeout {
        Some(limit) => match tokio::time::timeout(limit, run).await {
            Ok(result) => result?,
            Err(_) => {
                cancellation.cancel();
                bail!(
                    "Close timed out after {}s; run `show` to check whether the session was closed",
                    limit.as_secs()
                );
            }
        },
        None => run.await?,
    };

    print(
        *output,
        ConsoleFormatter::format_close_report(&report),
        ConsoleFormatter::format_json(&report),
    );

    if report.closed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_CLOSE_BLOCKED))
    }
}
