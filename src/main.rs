//! Rulesync CLI - Sync AI assistant rule files into project documentation

mod commands;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rulesync::output::{self, QUIET_ENV, Verbosity};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "rulesync")]
#[command(version)]
#[command(about = "Sync AI assistant rule files into project documentation")]
#[command(long_about = r#"
Rulesync scans rule directories (.cursor/rules, .code_review, ...), and
writes a generated summary into documentation files such as AGENTS.md and
CLAUDE.md, between marker lines. Everything outside the markers is kept.

Example usage:
  rulesync init
  rulesync sync
  rulesync sync --check
  rulesync scan cursor-rules --format json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress status lines (also RULESYNC_QUIET=1)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the project and its pipeline configuration live
#[derive(Args, Clone, Default)]
pub struct ProjectArgs {
    /// Project root (defaults to the nearest ancestor with a rules directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Directory containing plugins.yaml (defaults to <root>/.rulesync)
    #[arg(short, long)]
    pub plugins: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan rules and update every target document (default)
    Sync {
        #[command(flatten)]
        project: ProjectArgs,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Fail if any target document is out of date (implies --dry-run)
        #[arg(long)]
        check: bool,
    },

    /// List configured pipelines
    List {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Parse one pipeline's sources and print the rules found
    Scan {
        /// Pipeline name
        pipeline: String,

        #[command(flatten)]
        project: ProjectArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a default plugins.yaml
    Init {
        /// Project root (defaults to the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Overwrite an existing plugins.yaml
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    output::set_verbosity(Verbosity::resolve(
        cli.quiet,
        std::env::var(QUIET_ENV).ok().as_deref(),
    ));

    let command = cli.command.unwrap_or(Commands::Sync {
        project: ProjectArgs::default(),
        dry_run: false,
        check: false,
    });

    let result = match command {
        Commands::Sync {
            project,
            dry_run,
            check,
        } => commands::run_sync(&project, dry_run, check),
        Commands::List { project } => commands::run_list(&project),
        Commands::Scan {
            pipeline,
            project,
            format,
        } => commands::run_scan(&project, &pipeline, format),
        Commands::Init { root, force } => commands::run_init(root, force),
    };

    if let Err(e) = result {
        rulesync::ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
