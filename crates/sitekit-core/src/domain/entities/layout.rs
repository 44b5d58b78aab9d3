//! The site's path layout: where sources live and where every artifact goes.
//!
//! A [`PathConfig`] is assembled once, through [`PathConfigBuilder`], and is
//! immutable afterwards. All the validation happens in
//! [`PathConfigBuilder::build`]; nothing here touches the filesystem, so a
//! layout pointing at missing directories builds fine and fails later in the
//! task that reads from them.

use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{common::RelativePath, task::TaskKind},
    error::DomainError,
    glob::GlobSet,
};

/// One stylesheet: a LESS entry point and the CSS file it compiles to.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleMapping {
    /// Absolute (project-root-joined) source file.
    pub source: PathBuf,
    /// Destination, already joined onto the output directory.
    pub destination: PathBuf,
}

/// A set of files copied verbatim, keeping their path relative to `cwd`.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyGroup {
    pub name: String,
    /// Base directory the globs are matched against.
    pub cwd: PathBuf,
    pub patterns: GlobSet,
    /// Destination root, already joined onto the output directory.
    pub destination: PathBuf,
}

/// Globs (relative to the project root) that re-trigger one task.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchGroup {
    pub name: String,
    pub patterns: GlobSet,
    pub task: TaskKind,
}

/// The resolved, read-only layout shared by every task.
#[derive(Debug, Clone)]
pub struct PathConfig {
    project_root: PathBuf,
    output_dir: PathBuf,
    styles: Vec<StyleMapping>,
    include_paths: Vec<PathBuf>,
    strict_imports: bool,
    copy_groups: Vec<CopyGroup>,
    watch_groups: Vec<WatchGroup>,
    preserve_hidden: bool,
}

impl PathConfig {
    pub fn builder() -> PathConfigBuilder {
        PathConfigBuilder::default()
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn styles(&self) -> &[StyleMapping] {
        &self.styles
    }

    pub fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }

    pub fn strict_imports(&self) -> bool {
        self.strict_imports
    }

    pub fn copy_groups(&self) -> &[CopyGroup] {
        &self.copy_groups
    }

    pub fn watch_groups(&self) -> &[WatchGroup] {
        &self.watch_groups
    }

    /// Keep dot-entries (`.git`, `.nojekyll`) when emptying the output.
    pub fn preserve_hidden(&self) -> bool {
        self.preserve_hidden
    }
}

struct RawCopyGroup {
    name: String,
    cwd: PathBuf,
    patterns: Vec<String>,
    destination: String,
}

struct RawWatchGroup {
    name: String,
    patterns: Vec<String>,
    task: TaskKind,
}

/// Collects raw layout values; [`build`](Self::build) validates them.
#[derive(Default)]
pub struct PathConfigBuilder {
    project_root: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    styles: Vec<(PathBuf, String)>,
    include_paths: Vec<PathBuf>,
    strict_imports: bool,
    copy_groups: Vec<RawCopyGroup>,
    watch_groups: Vec<RawWatchGroup>,
    preserve_hidden: bool,
}

impl PathConfigBuilder {
    /// Base for every relative source path and glob. Defaults to `.`.
    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// Output directory, relative to the project root or absolute.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// `destination` is relative to the output directory.
    pub fn style(mut self, source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        self.styles.push((source.into(), destination.into()));
        self
    }

    pub fn include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    pub fn strict_imports(mut self, strict: bool) -> Self {
        self.strict_imports = strict;
        self
    }

    pub fn copy_group<I, S>(
        mut self,
        name: impl Into<String>,
        cwd: impl Into<PathBuf>,
        patterns: I,
        destination: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.copy_groups.push(RawCopyGroup {
            name: name.into(),
            cwd: cwd.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            destination: destination.into(),
        });
        self
    }

    pub fn watch_group<I, S>(mut self, name: impl Into<String>, patterns: I, task: TaskKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watch_groups.push(RawWatchGroup {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            task,
        });
        self
    }

    pub fn preserve_hidden(mut self, preserve: bool) -> Self {
        self.preserve_hidden = preserve;
        self
    }

    pub fn build(self) -> Result<PathConfig, DomainError> {
        let project_root = self.project_root.unwrap_or_else(|| PathBuf::from("."));
        let output_dir = project_root.join(
            self.output_dir
                .ok_or(DomainError::MissingRequiredField { field: "output_dir" })?,
        );

        let styles = self
            .styles
            .into_iter()
            .map(|(source, destination)| {
                let destination = RelativePath::try_new(destination)?;
                if destination.is_empty() {
                    return Err(DomainError::MissingRequiredField {
                        field: "styles.destination",
                    });
                }
                Ok(StyleMapping {
                    source: project_root.join(source),
                    destination: destination.under(&output_dir),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let include_paths = self
            .include_paths
            .into_iter()
            .map(|p| project_root.join(p))
            .collect();

        let copy_groups = self
            .copy_groups
            .into_iter()
            .map(|raw| {
                Ok(CopyGroup {
                    patterns: GlobSet::new(&raw.name, raw.patterns)?,
                    cwd: project_root.join(raw.cwd),
                    destination: RelativePath::try_new(raw.destination)?.under(&output_dir),
                    name: raw.name,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let watch_groups = self
            .watch_groups
            .into_iter()
            .map(|raw| {
                if raw.task == TaskKind::Watch {
                    return Err(DomainError::InvalidWatchBinding {
                        group: raw.name,
                        task: raw.task.to_string(),
                    });
                }
                Ok(WatchGroup {
                    patterns: GlobSet::new(&raw.name, raw.patterns)?,
                    name: raw.name,
                    task: raw.task,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PathConfig {
            project_root,
            output_dir,
            styles,
            include_paths,
            strict_imports: self.strict_imports,
            copy_groups,
            watch_groups,
            preserve_hidden: self.preserve_hidden,
        })
    }
}
