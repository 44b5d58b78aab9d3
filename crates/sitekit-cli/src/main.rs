//! # sitekit CLI
//!
//! Builds a LESS + Jekyll site: compiles stylesheets, copies assets, runs
//! jekyll and watches the sources.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Resolve the project directory.
//! 4. Load configuration (defaults + files + env).
//! 5. Build the [`OutputManager`].
//! 6. Dispatch to the command handler; no command means `watch`.
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                           |
//! |------|-----------------------------------|
//! |  0   | Success                           |
//! |  1   | Internal / system error           |
//! |  2   | User / input error                |
//! |  3   | Resource not found                |
//! |  4   | Configuration error               |
//! |  5   | lessc or jekyll reported failure  |

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use sitekit_core::domain::TaskKind;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, WatchArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and must exit 0.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    let verbose = cli.global.verbose > 0;
    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Resolve the project directory ──────────────────────────────────
    let project_root = match resolve_project_root(cli.global.project_dir.as_deref()) {
        Ok(root) => root,
        Err(e) => return handle_error(e, verbose),
    };

    // ── 4. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_deref(), &project_root)
        .with_cli_context(|| "Failed to load configuration")
    {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(e, verbose),
    };

    // ── 5. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 6. Dispatch + 7. Error handling ──────────────────────────────────
    match run(cli, &config, &project_root, &output) {
        Ok(()) => {
            info!("sitekit completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// `-C` or the current directory, canonicalised so watcher paths (always
/// absolute) strip cleanly against it.
fn resolve_project_root(requested: Option<&Path>) -> CliResult<PathBuf> {
    let path = requested.unwrap_or(Path::new(".")).to_path_buf();
    std::fs::canonicalize(&path).map_err(|source| CliError::ProjectDirNotFound { path, source })
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: &AppConfig, project_root: &Path, output: &OutputManager) -> CliResult<()> {
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Watch(WatchArgs::default()));

    match command {
        Commands::LessBuild => {
            commands::task::execute(TaskKind::StyleBuild, config, project_root, output)
        }
        Commands::AssetsCopy => {
            commands::task::execute(TaskKind::AssetCopy, config, project_root, output)
        }
        Commands::JekyllBuild => {
            commands::task::execute(TaskKind::SiteBuild, config, project_root, output)
        }
        Commands::Watch(args) => commands::watch::execute(args, config, project_root, output),
        Commands::List(args) => commands::list::execute(args, config, project_root, output),
        Commands::Init(args) => commands::init::execute(args, project_root, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(
            cmd,
            config,
            cli.global.config.as_deref(),
            project_root,
            output,
        ),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives a redirected stdout.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
