use std::path::Path;

use globset::GlobMatcher;
use wiki_sync_config::PatternList;

/// Return true if the path carries a Markdown extension (`.md`/`.markdown`,
/// any case).
pub fn is_markdown_path(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let lower = ext.to_string_lossy().to_ascii_lowercase();
            lower == "md" || lower == "markdown"
        }
        None => false,
    }
}

/// Compiled exclusion globs, matched against source-relative paths.
#[derive(Debug, Default)]
pub struct ExcludeSet {
    matchers: Vec<GlobMatcher>,
}

impl ExcludeSet {
    pub fn from_patterns(patterns: &PatternList) -> Self {
        ExcludeSet {
            matchers: patterns
                .iter()
                .map(|pattern| pattern.glob().compile_matcher())
                .collect(),
        }
    }

    pub fn is_match(&self, relative: &Path) -> bool {
        self.matchers.iter().any(|matcher| matcher.is_match(relative))
    }
}
