//! HLS playlist tool
//!
//! Parses master and media playlists, checks them against the version
//! compatibility rules, re-encodes them and lists the absolute URLs of the
//! resources they reference.

mod commands;
mod config;
mod config_file;
mod error;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::{LogFormat, ToolConfig};
use crate::error::Result;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "hls-playlist";

#[derive(Parser, Debug)]
#[command(name = "hls-playlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "hls-playlist.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a playlist and print its model as JSON
    Parse(InputArgs),
    /// Parse a playlist and check that it encodes again
    Validate(InputArgs),
    /// Parse a playlist and write the re-encoded text to stdout
    Encode(InputArgs),
    /// List the absolute URLs of every resource a playlist references
    Resolve {
        #[command(flatten)]
        input: InputArgs,
        /// Location of the playlist, used to resolve relative URIs
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Write a default configuration file
    InitConfig {
        /// Destination, defaults to the --config path
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Playlist file, or '-' for stdin
    pub input: PathBuf,

    /// Playlist kind
    #[arg(short, long, value_enum, default_value_t = KindArg::Auto)]
    pub kind: KindArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Master,
    Media,
    Auto,
}

fn main() {
    let cli = Cli::parse();

    let loaded = config_file::load_config(&cli.config);
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => ToolConfig::default(),
    };
    init_logging(&config);
    if let Err(e) = &loaded {
        tracing::warn!(
            "Failed to load config file {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
    }
    tracing::debug!("{} v{} configuration: {:?}", APP_NAME, VERSION, config);

    if let Err(e) = run(cli, &config) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &ToolConfig) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Parse(input) => commands::parse(&input, &mut stdout),
        Command::Validate(input) => commands::validate(&input, config, &mut stdout),
        Command::Encode(input) => commands::encode(&input, &mut stdout),
        Command::Resolve { input, base } => {
            let base = base.or_else(|| config.base_url.clone());
            commands::resolve(&input, base, &mut stdout)
        }
        Command::InitConfig { path } => {
            let path = path.unwrap_or(cli.config);
            config_file::generate_default_config(&path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}

/// Initialize logging with tracing
fn init_logging(config: &ToolConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_level.as_str().into());
    let layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };
    tracing_subscriber::registry().with(filter).with(layer).init();
}
