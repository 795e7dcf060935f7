#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod logging;
mod render;

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use student_records::{InMemoryAccessor, Snapshot, StudentRecordsModule};
use student_records_sdk::{IdentityProvider, QueryError, Response, StudentRecordsClient};

use crate::config::AppConfig;

/// Roster - policy-enforced natural-language queries over student records
#[derive(Parser)]
#[command(name = "roster-cli")]
#[command(about = "Roster - policy-enforced natural-language queries over student records")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data snapshot override (overrides config)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a natural-language question as an authenticated administrator
    Query {
        /// Administrator username
        #[arg(short, long)]
        user: String,

        /// Administrator password
        #[arg(short, long)]
        password: String,

        /// Reference time for relative windows (RFC 3339, default: now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,

        /// Also write the result rows to this file as JSON (needs export permission)
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,

        /// The question
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List configured administrators and their scopes
    Users,
    /// Show example queries, optionally matching a partial input
    Suggest { partial: Option<String> },
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML (if provided) -> 3) env (ROSTER__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data.snapshot = Some(data);
    }

    logging::init(&config.logging, cli.verbose)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => check_config(&config),
        Commands::Users => list_users(&config).await,
        Commands::Suggest { partial } => suggest(&config, partial.as_deref().unwrap_or("")),
        Commands::Query {
            user,
            password,
            now,
            json,
            export,
            text,
        } => {
            let request = QueryRequest {
                user,
                password,
                now: now.unwrap_or_else(Utc::now),
                json,
                export,
                text: text.join(" "),
            };
            run_query(&config, &request).await
        }
    }
}

struct QueryRequest {
    user: String,
    password: String,
    now: DateTime<Utc>,
    json: bool,
    export: Option<PathBuf>,
    text: String,
}

fn load_snapshot(config: &AppConfig) -> Result<Snapshot> {
    match &config.data.snapshot {
        Some(path) => Snapshot::load(path).context("failed to load data snapshot"),
        None => {
            tracing::warn!("no data snapshot configured; queries will return no rows");
            Ok(Snapshot::default())
        }
    }
}

fn build_module(config: &AppConfig, snapshot: Snapshot) -> Result<StudentRecordsModule> {
    let accessor = Arc::new(InMemoryAccessor::new(snapshot));
    StudentRecordsModule::init(&config.records, accessor).context("invalid module configuration")
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    let snapshot = load_snapshot(config)?;
    let rows = snapshot.student_records.len();
    let quizzes = snapshot.upcoming_quizzes.len();
    build_module(config, snapshot)?;

    println!("Configuration is valid");
    let identities = config.records.identities.len();
    println!("{identities} identities, {rows} student records, {quizzes} upcoming quizzes");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn list_users(config: &AppConfig) -> Result<()> {
    let module = build_module(config, Snapshot::default())?;
    let identities = module.identity_provider().identities().await;
    let mut out = std::io::stdout().lock();
    render::identities(&mut out, &identities)?;
    out.flush()?;
    Ok(())
}

fn suggest(config: &AppConfig, partial: &str) -> Result<()> {
    let module = build_module(config, Snapshot::default())?;
    for suggestion in module.client().suggestions(partial) {
        println!("{suggestion}");
    }
    Ok(())
}

async fn run_query(config: &AppConfig, request: &QueryRequest) -> Result<()> {
    let module = build_module(config, load_snapshot(config)?)?;

    let identity = module
        .identity_provider()
        .authenticate(&request.user, &request.password)
        .await
        .context("authentication failed")?;
    tracing::info!(user = identity.id(), level = %identity.access_level(), "authenticated");

    let client = module.client();
    let response = match client.query(&identity, &request.text, request.now).await {
        Ok(response) => response,
        Err(QueryError::DataUnavailable { filters, reason }) => {
            tracing::warn!(%reason, "data unavailable, retrying once");
            client
                .retry(&identity, &filters, request.now)
                .await
                .context("data unavailable; the query can be retried later")?
        }
        Err(e) => return Err(e).context("query failed"),
    };

    if let Some(path) = &request.export {
        if !response.export_allowed {
            anyhow::bail!("export is not permitted for {}", identity.id());
        }
        export_rows(&response, path)?;
        tracing::info!(path = %path.display(), rows = response.rows.len(), "exported rows");
    }

    print_response(&response, request.json)
}

fn export_rows(response: &Response, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &response.rows)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn print_response(response: &Response, json: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, response)?;
        writeln!(out)?;
    } else {
        render::response(&mut out, response)?;
    }
    out.flush()?;
    Ok(())
}
