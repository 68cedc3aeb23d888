//! Treearbo CLI - Command-line interface for the treearbo tree notation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use treearbo_tree::TreePath;

mod commands;
mod config;

use config::Config;

/// Treearbo - parse, format and query indentation-based tree files
#[derive(Parser)]
#[command(name = "treearbo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a tree file and show its nodes
    Parse {
        /// Input file (`-` for stdin)
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a tree file in canonical form
    Fmt {
        /// Input file (`-` for stdin)
        file: PathBuf,
        /// Fail instead of printing when the file is not canonical
        #[arg(long)]
        check: bool,
    },

    /// Print the nodes found at a path
    Select {
        /// Input file (`-` for stdin)
        file: PathBuf,
        /// Path segments: a type label, an index, or `*` for every child
        segments: Vec<TreePath>,
    },

    /// Check tree files for syntax errors
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
    },

    /// Show information about this build
    Info,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    // Set up logging
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(config.filter(cli.verbose)))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Parse { file, json } => commands::parse::run(&file, json, &config),
        Commands::Fmt { file, check } => commands::fmt::run(&file, check, &config),
        Commands::Select { file, segments } => commands::select::run(&file, &segments, &config),
        Commands::Check { files } => commands::check::run(&files, &config),
        Commands::Info => commands::info::run(),
    }
}
