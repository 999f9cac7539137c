use clap::Parser;
use dotenvy::dotenv;
use fintrack::cli::{self, Cli};
use fintrack::config;
use fintrack::core::engine::Ledger;
use fintrack::errors::Result;
use fintrack::store::{FileStore, session};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load the application configuration and open the store
    let app_config = config::load_app_configuration()?;
    debug!(data_dir = %app_config.data_dir.display(), "opened data directory");
    let store = FileStore::new(&app_config.data_dir);

    // 4. Load the session state, seeding the collection on first run
    let seed = session::FileSeed::new(&app_config.seed_path);
    let records = session::load_or_seed_records(&store, &seed, chrono::Utc::now()).await;
    let settings = session::load_settings(&store);
    let mut ledger = Ledger::new(records, settings);

    // 5. Run the requested command
    cli::dispatch(cli.command, &mut ledger, &store)
}
