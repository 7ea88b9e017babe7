//! `domain-lint` checks that JavaScript and TypeScript modules only import
//! from their own domain.
//!
//! ```bash
//! domain-lint init                      # write a starter domain-lint.toml
//! domain-lint check src/ --format pretty
//! RUST_LOG=debug domain-lint check      # trace domain resolution
//! ```
//!
//! Logs go to stderr so `--format json` output stays machine-readable.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Import boundary linter for JavaScript and TypeScript projects
#[derive(Parser)]
#[command(name = "domain-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every resolved domain (same as `RUST_LOG=debug`)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of searching for `domain-lint.toml`
    #[arg(short, long, global = true, env = "DOMAIN_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report imports that cross domain boundaries
    Check {
        /// Project root; domain prefixes and `tsconfig.json` are read relative to it
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Rule names or codes to run, comma-separated (e.g. `DL001`)
        #[arg(long)]
        rules: Option<String>,

        /// Glob of files to skip, repeatable
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Print the rules this build knows about
    ListRules,

    /// Write a commented `domain-lint.toml` into the current directory
    Init {
        /// Replace an existing `domain-lint.toml`
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Annotated source snippets.
    Pretty,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(&path, format, rules.as_deref(), exclude, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
