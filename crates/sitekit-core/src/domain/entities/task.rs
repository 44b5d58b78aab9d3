//! The task catalogue: which names exist and what they depend on.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;

/// One of the four build tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    StyleBuild,
    AssetCopy,
    SiteBuild,
    Watch,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::StyleBuild,
        TaskKind::AssetCopy,
        TaskKind::SiteBuild,
        TaskKind::Watch,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::StyleBuild => "less-build",
            Self::AssetCopy => "assets-copy",
            Self::SiteBuild => "jekyll-build",
            Self::Watch => "watch",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::StyleBuild => "Compile LESS stylesheets into the output directory",
            Self::AssetCopy => "Copy scripts, images, fonts and articles into the output directory",
            Self::SiteBuild => "Clear the output directory, run jekyll, then less-build and assets-copy",
            Self::Watch => "Watch sources and re-run the matching task on change",
        }
    }

    /// The tasks this one chains into, in run order. Used for listing;
    /// `SiteBuildTask` runs the chain itself.
    pub const fn depends_on(self) -> &'static [TaskKind] {
        match self {
            Self::SiteBuild => &[TaskKind::StyleBuild, TaskKind::AssetCopy],
            _ => &[],
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| DomainError::UnknownTask { name: s.to_string() })
    }
}

/// Name → task mapping, in registration order.
///
/// Invariant: every name is unique.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    entries: Vec<(String, TaskKind)>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four tasks under their own names, plus `default` → `watch`.
    pub fn standard() -> Self {
        let entries = TaskKind::ALL
            .into_iter()
            .map(|kind| (kind.name(), kind))
            .chain([("default", TaskKind::Watch)]);
        match Self::from_entries(entries) {
            Ok(registry) => registry,
            Err(e) => unreachable!("built-in task names collide: {e}"),
        }
    }

    /// Registers each entry in order; the first repeated name fails.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, TaskKind)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (name, kind) in entries {
            registry.register(name, kind)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, name: impl Into<String>, kind: TaskKind) -> Result<(), DomainError> {
        let name = name.into();
        if self.entries.iter().any(|(n, _)| *n == name) {
            return Err(DomainError::DuplicateTask { name });
        }
        self.entries.push((name, kind));
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<TaskKind, DomainError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| DomainError::UnknownTask {
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TaskKind)> {
        self.entries.iter().map(|(n, k)| (n.as_str(), *k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_resolves_every_task_name() {
        let registry = TaskRegistry::standard();
        for kind in TaskKind::ALL {
            assert_eq!(registry.resolve(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn default_is_watch() {
        assert_eq!(
            TaskRegistry::standard().resolve("default").unwrap(),
            TaskKind::Watch
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = TaskRegistry::standard();
        let err = registry.register("less-build", TaskKind::AssetCopy).unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateTask {
                name: "less-build".into()
            }
        );
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn from_entries_rejects_a_repeated_name() {
        let err = TaskRegistry::from_entries([
            ("watch", TaskKind::Watch),
            ("default", TaskKind::Watch),
            ("watch", TaskKind::StyleBuild),
        ])
        .unwrap_err();
        assert_eq!(err, DomainError::DuplicateTask { name: "watch".into() });
    }

    #[test]
    fn standard_registry_goes_through_the_duplicate_check() {
        let mut registry = TaskRegistry::standard();
        assert_eq!(registry.len(), 5);
        assert!(registry.register("default", TaskKind::SiteBuild).is_err());
        assert_eq!(registry.resolve("default").unwrap(), TaskKind::Watch);
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(matches!(
            TaskRegistry::standard().resolve("deploy"),
            Err(DomainError::UnknownTask { .. })
        ));
    }

    #[test]
    fn site_build_chains_styles_then_assets() {
        assert_eq!(
            TaskKind::SiteBuild.depends_on(),
            &[TaskKind::StyleBuild, TaskKind::AssetCopy]
        );
        assert!(TaskKind::StyleBuild.depends_on().is_empty());
    }

    #[test]
    fn registration_order_is_kept() {
        let registry = TaskRegistry::standard();
        let names: Vec<_> = registry.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            ["less-build", "assets-copy", "jekyll-build", "watch", "default"]
        );
    }

    #[test]
    fn from_str_does_not_know_aliases() {
        assert_eq!("watch".parse::<TaskKind>().unwrap(), TaskKind::Watch);
        assert!("default".parse::<TaskKind>().is_err());
    }
}
