//! Compiled glob pattern sets.
//!
//! Patterns are always matched against paths *relative* to some base
//! directory (the project root for watch groups, a copy group's `cwd` for
//! asset copying). Matching is delegated to `wax`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use wax::{Glob, Pattern};

use crate::domain::error::DomainError;

/// An ordered, non-empty set of compiled globs.
///
/// A path matches the set when it matches any member.
#[derive(Clone)]
pub struct GlobSet {
    patterns: Vec<String>,
    globs: Arc<[Glob<'static>]>,
}

impl GlobSet {
    /// Compile `patterns` for the group called `group`.
    pub fn new<I, S>(group: &str, patterns: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if patterns.is_empty() {
            return Err(DomainError::EmptyPatternSet {
                group: group.to_string(),
            });
        }

        let globs = patterns
            .iter()
            .map(|pattern| {
                Glob::new(pattern)
                    .map(Glob::into_owned)
                    .map_err(|e| DomainError::InvalidGlob {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            globs: globs.into(),
        })
    }

    /// `true` if `relative` matches any pattern in the set.
    pub fn is_match(&self, relative: &Path) -> bool {
        self.globs.iter().any(|glob| glob.is_match(relative))
    }

    /// The source patterns, in declared order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl fmt::Debug for GlobSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlobSet").field(&self.patterns).finish()
    }
}

impl PartialEq for GlobSet {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> GlobSet {
        GlobSet::new("test", patterns.iter().copied()).unwrap()
    }

    #[test]
    fn single_star_stays_in_one_directory() {
        let s = set(&["js/*"]);
        assert!(s.is_match(Path::new("js/app.js")));
        assert!(!s.is_match(Path::new("js/vendor/jquery.js")));
    }

    #[test]
    fn tree_wildcard_descends() {
        let s = set(&["images/**"]);
        assert!(s.is_match(Path::new("images/x/y.png")));
        assert!(s.is_match(Path::new("images/top.png")));
        assert!(!s.is_match(Path::new("font/a.woff")));
    }

    #[test]
    fn tree_wildcard_matches_zero_directories() {
        let s = set(&["_assets/**/*.less"]);
        assert!(s.is_match(Path::new("_assets/main.less")));
        assert!(s.is_match(Path::new("_assets/less/blog.less")));
        assert!(!s.is_match(Path::new("_assets/js/app.js")));
    }

    #[test]
    fn any_member_matches() {
        let s = set(&["*.html", "*.yml"]);
        assert!(s.is_match(Path::new("index.html")));
        assert!(s.is_match(Path::new("_config.yml")));
        assert!(!s.is_match(Path::new("_posts/2014-01-01-hello.md")));
    }

    #[test]
    fn empty_set_is_rejected() {
        let err = GlobSet::new("styles", Vec::<String>::new()).unwrap_err();
        assert_eq!(
            err,
            DomainError::EmptyPatternSet {
                group: "styles".into()
            }
        );
    }

    #[test]
    fn malformed_pattern_is_rejected() {
        assert!(matches!(
            GlobSet::new("bad", ["images/{a,b"]),
            Err(DomainError::InvalidGlob { .. })
        ));
    }
}
