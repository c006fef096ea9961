//! Session Driver Entry Point
//!
//! Starts a progress session for one user and runs a single command against
//! it. Uses `anyhow` for startup errors, but tracker and lexicon errors are
//! reported through `kernel::error::AppError`.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::App;
use lexicon::{InMemoryLexicon, LexiconConfig, PgLexiconRepository, SeedLexiconUseCase};
use progress::{InMemoryProgressStore, PgProgressStore, ProgressConfig};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "session")]
#[command(about = "Daily vocabulary challenges with coins and streaks")]
#[command(version)]
struct Cli {
    /// User to run the session for
    #[arg(short, long, env = "VOCAB_USER_ID", global = true)]
    user: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Use seeded in-memory stores instead of Postgres
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show streak, coins and today's completed challenges
    Status,

    /// Complete one of today's challenges
    Complete {
        /// Challenge id as listed by `daily`, e.g. 2024-05-01-word3-0
        challenge_id: String,
    },

    /// Show today's words, their challenges and the tip of the day
    Daily,

    /// Search the dictionary by word or definition
    Search {
        /// Case-insensitive search term
        term: Option<String>,

        /// Only show entries of this level (1-5)
        #[arg(short, long)]
        difficulty: Option<u8>,
    },

    /// Insert the starter word list into an empty store
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session=info,progress=info,lexicon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let progress_config = Arc::new(ProgressConfig::from_env()?);
    let lexicon_config = Arc::new(LexiconConfig::from_env()?);

    if cli.offline {
        let store = Arc::new(InMemoryProgressStore::new());
        let lexicon = Arc::new(InMemoryLexicon::new());
        SeedLexiconUseCase::new(lexicon.clone()).execute().await?;

        tracing::info!("Running offline with in-memory stores");

        let app = App::new(store, lexicon, progress_config, lexicon_config, cli.json);
        return app.run(cli.user.as_deref(), cli.command).await;
    }

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let app = App::new(
        Arc::new(PgProgressStore::new(pool.clone())),
        Arc::new(PgLexiconRepository::new(pool)),
        progress_config,
        lexicon_config,
        cli.json,
    );
    app.run(cli.user.as_deref(), cli.command).await
}
