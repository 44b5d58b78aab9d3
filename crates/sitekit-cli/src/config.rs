//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`PathConfig`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `SITEKIT__<SECTION>__<KEY>`
//! 3. The `--config` file, or `<project>/sitekit.toml`
//! 4. The global file in the platform config directory
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use sitekit_core::domain::{DomainError, PathConfig, TaskKind};

/// File name looked up in the project directory.
pub const PROJECT_FILE: &str = "sitekit.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub styles: StylesConfig,
    pub assets: AssetsConfig,
    pub watch: WatchConfig,
    pub tools: ToolsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Generated site, relative to the project directory or absolute.
    pub output_dir: PathBuf,
    /// Keep `.git` and other dot-entries when clearing the output.
    pub preserve_hidden: bool,
    /// Globs whose changes trigger a full `jekyll-build`.
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylesConfig {
    pub include_paths: Vec<PathBuf>,
    pub strict_imports: bool,
    /// Globs whose changes trigger `less-build`.
    pub watch: Vec<String>,
    pub sheets: Vec<StyleSheet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub source: PathBuf,
    /// Relative to the output directory.
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Base directory for groups that do not set their own.
    pub cwd: PathBuf,
    /// Destination (under the output directory) for groups that do not set
    /// their own.
    pub destination: String,
    /// Globs whose changes trigger `assets-copy`.
    pub watch: Vec<String>,
    pub groups: Vec<AssetGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetGroup {
    pub name: String,
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Program and leading arguments, e.g. `["npx", "lessc"]`.
    pub preprocessor: Vec<String>,
    /// e.g. `["bundle", "exec", "jekyll"]`.
    pub generator: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

fn strings<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.into_iter().map(String::from).collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        let sheets = ["main", "blog", "resume"]
            .into_iter()
            .map(|name| StyleSheet {
                source: PathBuf::from(format!("_assets/less/{name}.less")),
                destination: format!("assets/css/{name}.css"),
            })
            .collect();

        let groups = ["articles", "js", "images", "font", "scala_is_faster_than_java"]
            .into_iter()
            .map(|name| AssetGroup {
                name: name.to_string(),
                patterns: vec![format!("{name}/**")],
                cwd: None,
                destination: None,
            })
            .collect();

        Self {
            site: SiteConfig {
                output_dir: PathBuf::from("../jto.github.io"),
                preserve_hidden: true,
                sources: strings(["*.html", "*.yml", "_posts/**", "_layouts/**", "_includes/**"]),
            },
            styles: StylesConfig {
                include_paths: vec![PathBuf::from("_assets/less")],
                strict_imports: true,
                watch: strings(["_assets/**/*.less"]),
                sheets,
            },
            assets: AssetsConfig {
                cwd: PathBuf::from("_assets"),
                destination: "assets".into(),
                watch: strings(["_assets/**"]),
                groups,
            },
            watch: WatchConfig { debounce_ms: 200 },
            tools: ToolsConfig {
                preprocessor: strings(["lessc"]),
                generator: strings(["jekyll"]),
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it, `<project_root>/sitekit.toml` is used if present.
    pub fn load(config_file: Option<&Path>, project_root: &Path) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(global) = Self::global_config_path() {
            builder = builder.add_source(
                File::from(global.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = match config_file {
            Some(path) => builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(true),
            ),
            None => builder.add_source(
                File::from(project_root.join(PROJECT_FILE).as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            ),
        };

        builder
            .add_source(
                Environment::with_prefix("SITEKIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the user-wide configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sitekit", "sitekit")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The file that `load` would read project settings from.
    pub fn active_config_path(config_file: Option<&Path>, project_root: &Path) -> PathBuf {
        match config_file {
            Some(path) => path.to_path_buf(),
            None => project_root.join(PROJECT_FILE),
        }
    }

    /// Translate into the core layout, rooted at `project_root`.
    ///
    /// Watch groups are declared styles, assets, site: a changed `.less`
    /// file under the asset tree therefore rebuilds styles only.
    pub fn path_config(&self, project_root: &Path) -> Result<PathConfig, DomainError> {
        let mut builder = PathConfig::builder()
            .project_root(project_root)
            .output_dir(&self.site.output_dir)
            .strict_imports(self.styles.strict_imports)
            .preserve_hidden(self.site.preserve_hidden);

        for sheet in &self.styles.sheets {
            builder = builder.style(&sheet.source, sheet.destination.clone());
        }
        for include in &self.styles.include_paths {
            builder = builder.include_path(include);
        }
        for group in &self.assets.groups {
            builder = builder.copy_group(
                group.name.clone(),
                group.cwd.as_ref().unwrap_or(&self.assets.cwd),
                group.patterns.clone(),
                group
                    .destination
                    .clone()
                    .unwrap_or_else(|| self.assets.destination.clone()),
            );
        }

        for (name, patterns, task) in [
            ("styles", &self.styles.watch, TaskKind::StyleBuild),
            ("assets", &self.assets.watch, TaskKind::AssetCopy),
            ("site", &self.site.sources, TaskKind::SiteBuild),
        ] {
            if !patterns.is_empty() {
                builder = builder.watch_group(name, patterns.clone(), task);
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_reproduce_the_blog_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.site.output_dir, PathBuf::from("../jto.github.io"));
        assert_eq!(cfg.styles.sheets.len(), 3);
        assert!(cfg.styles.strict_imports);
        let names: Vec<_> = cfg.assets.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            ["articles", "js", "images", "font", "scala_is_faster_than_java"]
        );
    }

    #[test]
    fn default_layout_builds() {
        let layout = AppConfig::default()
            .path_config(Path::new("/src/blog"))
            .unwrap();
        assert_eq!(layout.output_dir(), Path::new("/src/blog/../jto.github.io"));
        assert_eq!(layout.styles().len(), 3);
        assert_eq!(layout.copy_groups().len(), 5);
        let order: Vec<_> = layout.watch_groups().iter().map(|g| g.task).collect();
        assert_eq!(
            order,
            [TaskKind::StyleBuild, TaskKind::AssetCopy, TaskKind::SiteBuild]
        );
        assert_eq!(
            layout.copy_groups()[2].destination,
            PathBuf::from("/src/blog/../jto.github.io/assets")
        );
    }

    #[test]
    fn project_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_FILE),
            "[site]\noutput_dir = \"_site\"\npreserve_hidden = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(cfg.site.output_dir, PathBuf::from("_site"));
        assert!(!cfg.site.preserve_hidden);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.tools.generator, ["jekyll"]);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn invalid_glob_is_a_domain_error() {
        let mut cfg = AppConfig::default();
        cfg.assets.groups[0].patterns = vec!["articles/{a,b".into()];
        assert!(matches!(
            cfg.path_config(Path::new(".")),
            Err(DomainError::InvalidGlob { .. })
        ));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
