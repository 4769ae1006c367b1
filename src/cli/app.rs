//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::output::{Output, OutputFormat};
use super::target::Target;
use super::{document_cmd, key_cmd, section_cmd};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "inidata")]
#[command(author, version, about = "Read and edit INI-style data files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data file to operate on
    #[arg(long, short = 'F', global = true, env = "INIDATA_FILE")]
    pub file: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "INIDATA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Never create missing sections or keys on `key set`
    #[arg(long, global = true)]
    pub no_autocreate: bool,

    /// Enable debug logging to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read and write keys
    #[command(subcommand)]
    Key(key_cmd::KeyCommands),

    /// Manage sections
    #[command(subcommand)]
    Section(section_cmd::SectionCommands),

    /// Print the whole document
    Show,

    /// Show section and key counts
    Stats,

    /// Rewrite the file in canonical form
    Fmt {
        /// Only check; fail if the file is not already canonical
        #[arg(long)]
        check: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format);

    let path = cli
        .file
        .context("No data file given. Use --file or set INIDATA_FILE.")?;
    let target = Target::from_config(path, &config, cli.no_autocreate)?;
    debug!(path = %target.path().display(), "using data file");

    match cli.command {
        Commands::Key(cmd) => key_cmd::run(cmd, &target, &output)?,
        Commands::Section(cmd) => section_cmd::run(cmd, &target, &output)?,
        Commands::Show => document_cmd::show(&target, &output)?,
        Commands::Stats => document_cmd::stats(&target, &output)?,
        Commands::Fmt { check } => document_cmd::fmt(&target, &output, check)?,
    }

    debug!("command completed successfully");
    Ok(())
}

/// Installs the stderr subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "inidata=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
