use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::models::{Difficulty, Problem, upsert_problem};
use crate::remote::RemoteClient;
use crate::store::{ProblemStore, StoreError};

#[derive(Parser)]
#[command(name = "leettrack")]
#[command(about = "Track coding-interview practice problems from the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/data)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Run the HTTP proxy for the remote problem API
    Serve {
        /// Bind host (defaults to the configured proxy_host)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (defaults to the configured proxy_port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Quickly add a new problem record
    Add {
        /// Problem title
        title: String,
        /// Difficulty: Easy, Medium or Hard
        #[arg(long, default_value = "Easy")]
        difficulty: String,
        /// Canonical problem URL
        #[arg(long)]
        url: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Display number
        #[arg(long)]
        number: Option<String>,
    },
    /// Import a problem from the remote database
    Import {
        /// Problem number or slug (e.g. "1" or "two-sum")
        identifier: Option<String>,
        /// Import today's daily challenge instead
        #[arg(long, conflicts_with = "identifier")]
        daily: bool,
        /// Import a random problem instead
        #[arg(long, conflicts_with_all = ["identifier", "daily"])]
        random: bool,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Invalid difficulty: {0}")]
    DifficultyError(String),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Problem not found: {0}")]
    NotFound(String),
    #[error("Failed to start async runtime: {0}")]
    RuntimeError(String),
}

/// Handle the add command
pub fn handle_add(
    title: String,
    difficulty: String,
    url: Option<String>,
    tags: Option<String>,
    number: Option<String>,
    store: &dyn ProblemStore,
) -> Result<(), CliError> {
    let difficulty: Difficulty = difficulty.parse().map_err(CliError::DifficultyError)?;

    let mut problem = Problem::new(title, difficulty);
    problem.number = number;
    if let Some(url) = url {
        problem.url = url;
    }
    if let Some(tags) = tags {
        problem.set_tags_from_str(&tags);
    }

    let mut problems = store.load();
    let id = problem.id.clone();
    upsert_problem(&mut problems, problem);
    store.save(&problems)?;
    println!("Problem created successfully (ID: {})", id);

    Ok(())
}

/// Handle the import command
pub fn handle_import(
    identifier: Option<String>,
    daily: bool,
    random: bool,
    store: &dyn ProblemStore,
    client: &RemoteClient,
) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::RuntimeError(e.to_string()))?;

    let (detail, what) = if daily {
        (runtime.block_on(client.daily()), "daily challenge".to_string())
    } else if random {
        (runtime.block_on(client.random()), "random problem".to_string())
    } else if let Some(ref id) = identifier {
        (runtime.block_on(client.problem(id)), format!("'{}'", id))
    } else {
        return Err(CliError::InvalidArguments(
            "provide a problem identifier, --daily or --random".to_string(),
        ));
    };

    let Some(detail) = detail else {
        return Err(CliError::NotFound(what));
    };

    let record = detail.into_record();
    let summary = format!(
        "{}. {} ({})",
        record.number.as_deref().unwrap_or("?"),
        record.title,
        record.difficulty
    );

    let mut problems = store.load();
    upsert_problem(&mut problems, record);
    store.save(&problems)?;
    println!("Imported {}", summary);

    Ok(())
}
