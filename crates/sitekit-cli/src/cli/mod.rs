//! Argument definitions (clap derive). Names and help text live here; the
//! handlers in `crate::commands` never look at raw arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name    = "sitekit",
    bin_name = "sitekit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Build, copy and watch a LESS + Jekyll site",
    long_about = "sitekit compiles the site's LESS stylesheets, copies its static \
                  assets and runs jekyll into the output directory. With no \
                  command it watches the sources and rebuilds on change.",
    after_help = "EXAMPLES:\n\
        \x20 sitekit                  # watch (default)\n\
        \x20 sitekit jekyll-build     # clear output, generate, compile, copy\n\
        \x20 sitekit less-build -v\n\
        \x20 sitekit -C ~/src/blog assets-copy\n\
        \x20 sitekit completions bash > /usr/share/bash-completion/completions/sitekit",
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute. `watch` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile the LESS stylesheets.
    #[command(about = "Compile stylesheets into the output directory")]
    LessBuild,

    /// Copy scripts, images, fonts and articles.
    #[command(about = "Copy static assets into the output directory")]
    AssetsCopy,

    /// Full build.
    #[command(
        about = "Clear the output, run jekyll, then less-build and assets-copy",
        after_help = "The output directory is emptied first. Entries starting with '.'\n\
            (such as .git) are kept unless site.preserve_hidden = false."
    )]
    JekyllBuild,

    /// Watch the sources and re-run the matching task on change.
    #[command(
        about = "Watch and rebuild (default)",
        after_help = "EXAMPLES:\n\
            \x20 sitekit watch\n\
            \x20 sitekit watch --debounce-ms 500"
    )]
    Watch(WatchArgs),

    /// List the registered tasks.
    #[command(
        visible_alias = "ls",
        about = "List available tasks",
        after_help = "EXAMPLES:\n\
            \x20 sitekit list\n\
            \x20 sitekit list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 sitekit init           # ./sitekit.toml\n\
            \x20 sitekit init --global  # user-wide defaults"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sitekit completions bash > ~/.local/share/bash-completion/completions/sitekit\n\
            \x20 sitekit completions zsh  > ~/.zfunc/_sitekit\n\
            \x20 sitekit completions fish > ~/.config/fish/completions/sitekit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 sitekit config get site.output_dir\n\
            \x20 sitekit config list\n\
            \x20 sitekit config path"
    )]
    Config(ConfigCommands),
}

// ── watch ─────────────────────────────────────────────────────────────────────

/// Arguments for `sitekit watch`.
#[derive(Debug, Default, Args)]
pub struct WatchArgs {
    /// Override `watch.debounce_ms`.
    #[arg(
        long = "debounce-ms",
        value_name = "MS",
        help = "Milliseconds to coalesce file events"
    )]
    pub debounce_ms: Option<u64>,
}

// ── list / init / completions / config ───────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// How to print the task catalogue
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Names, descriptions and chained tasks
    Table,
    /// Bare names, one per line
    List,
    /// Serialised task info
    Json,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write the user-wide file instead of <project>/sitekit.toml
    #[arg(long)]
    pub global: bool,

    /// Replace a file that already exists
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value
    Get {
        /// Dotted key, e.g. `site.output_dir` or `styles.sheets.0.source`
        key: String,
    },
    /// Print the whole effective configuration
    List,
    /// Print the project configuration file that would be read
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn task_names_match_the_build_file() {
        for (arg, expected) in [
            ("less-build", "LessBuild"),
            ("assets-copy", "AssetsCopy"),
            ("jekyll-build", "JekyllBuild"),
            ("watch", "Watch"),
        ] {
            let cli = Cli::parse_from(["sitekit", arg]);
            let command = cli.command.expect("subcommand parsed");
            assert!(format!("{command:?}").starts_with(expected), "{arg}");
        }
    }

    #[test]
    fn no_command_means_watch() {
        let cli = Cli::parse_from(["sitekit"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_after_the_subcommand() {
        let cli = Cli::parse_from(["sitekit", "less-build", "-C", "/src/blog", "-vv"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(
            cli.global.project_dir.as_deref(),
            Some(std::path::Path::new("/src/blog"))
        );
    }

    #[test]
    fn debounce_override_parses() {
        let cli = Cli::parse_from(["sitekit", "watch", "--debounce-ms", "500"]);
        match cli.command {
            Some(Commands::Watch(args)) => assert_eq!(args.debounce_ms, Some(500)),
            other => panic!("expected watch, got {other:?}"),
        }
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["sitekit", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
