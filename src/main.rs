use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use medisync_gateway::translator::{ChatTranslator, Translator};
use medisync_gateway::{Config, db, server};

/// Medisync - hospital front-desk gateway
#[derive(Parser)]
#[command(name = "medisync", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "MEDISYNC_PORT")]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the API server (default)
    Serve,
    /// Seed the demo dataset and exit
    Seed,
    /// Translate a line of text between two registered languages
    Translate {
        /// Text to translate
        text: String,
        /// Source language display name
        #[arg(short, long, default_value = "English")]
        from: String,
        /// Target language display name
        #[arg(short, long, default_value = "Hindi")]
        to: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,medisync_gateway=info",
        1 => "info,medisync_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.port)?;

    match cli.command {
        None | Some(Command::Serve) => {
            tracing::info!(port = config.port, "starting medisync gateway");
            server::run(config).await?;
        }
        Some(Command::Seed) => seed(&config)?,
        Some(Command::Translate { text, from, to }) => translate(&config, &text, &from, &to).await?,
    }

    Ok(())
}

/// Seed the demo dataset
fn seed(config: &Config) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.data_dir)?;
    let pool = db::init(config.db_path())?;
    db::seed::run(&pool)?;
    println!("Demo dataset seeded into {}", config.db_path().display());
    Ok(())
}

/// Translate one line of text from the command line
async fn translate(config: &Config, text: &str, from: &str, to: &str) -> anyhow::Result<()> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY not set"))?;

    let client = ChatTranslator::new(api_key, config.translation_model.clone())?;
    let translated = client.translate(text, to, from).await?;

    println!("{from} → {to}");
    println!("{translated}");
    Ok(())
}
