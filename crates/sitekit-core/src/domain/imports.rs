//! `@import` scanning for LESS sources.
//!
//! Only extraction lives here. Resolving an import against the filesystem
//! is done by the style task, which owns the include-path list.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static BLOCK_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment regex is valid"));

// `//` after `:` or a quote is part of a URL, not a comment.
static LINE_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)(^|[^:"'])//[^\n]*"#).expect("comment regex is valid"));

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import\s*(?:\(\s*([^)]*)\)\s*)?(?:url\(\s*)?["']([^"'\n]+)["']"#)
        .expect("import regex is valid")
});

/// One `@import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    pub path: String,
    pub options: Vec<String>,
}

impl ImportRef {
    fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|o| o == name)
    }

    /// Whether the preprocessor would need this file on disk.
    pub fn is_required(&self) -> bool {
        if self.has_option("optional") || self.has_option("css") {
            return false;
        }
        let p = self.path.as_str();
        if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("//") {
            return false;
        }
        // Interpolated paths cannot be resolved without evaluating the file.
        if p.contains("@{") {
            return false;
        }
        let is_css = Path::new(p)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("css"));
        !(is_css && !self.has_option("less"))
    }

    /// The file name to look for: a missing extension means `.less`.
    pub fn file_name(&self) -> PathBuf {
        let path = PathBuf::from(&self.path);
        if path.extension().is_some() {
            path
        } else {
            PathBuf::from(format!("{}.less", self.path))
        }
    }
}

/// Extract every `@import` from `source`, ignoring commented-out ones.
pub fn parse_imports(source: &str) -> Vec<ImportRef> {
    let without_blocks = BLOCK_COMMENTS.replace_all(source, "");
    let stripped = LINE_COMMENTS.replace_all(&without_blocks, "$1");
    IMPORT
        .captures_iter(&stripped)
        .map(|caps| ImportRef {
            path: caps[2].trim().to_string(),
            options: caps
                .get(1)
                .map(|m| {
                    m.as_str()
                        .split(',')
                        .map(|o| o.trim().to_ascii_lowercase())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}
