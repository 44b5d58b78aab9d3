//! `sitekit init` - write a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::InitArgs,
    config::{AppConfig, PROJECT_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the built-in defaults as TOML.
///
/// Without `--global` the file lands in the project directory.
pub fn execute(args: InitArgs, project_root: &Path, output: &OutputManager) -> CliResult<()> {
    let config_path = target_path(args.global, project_root)?;

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!("Configuration created at {}", config_path.display()))?;
    Ok(())
}

fn target_path(global: bool, project_root: &Path) -> CliResult<PathBuf> {
    if !global {
        return Ok(project_root.join(PROJECT_FILE));
    }
    AppConfig::global_config_path().ok_or_else(|| CliError::ConfigError {
        message: "No configuration directory for this platform".into(),
        source: None,
    })
}
