//! Sidebar and homepage assembly.
//!
//! Navigation is discovery-checked: an entry only makes it into the sidebar
//! when its declared source file actually exists (and is not excluded), so
//! the generated links always resolve to a mirrored document. Entries that
//! fail the check are reported back to the caller rather than silently
//! dropped.

use std::path::{Path, PathBuf};

use wiki_sync_config::NavigationSettings;

use crate::links::rewrite_links;
use crate::paths::ExcludeSet;
use crate::slug::{slug_for_path, title_for_path};

/// Rendered sidebar plus the entries that failed the discovery check.
#[derive(Debug)]
pub struct SidebarOutcome {
    pub rendered: String,
    pub missing: Vec<MissingEntry>,
}

/// A declared navigation entry with no matching source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingEntry {
    pub section: String,
    pub path: PathBuf,
}

/// Assemble the sidebar document from the configured section table.
///
/// Sections keep their declared order; each surviving entry renders as a
/// `- [title](slug)` line with the slug computed from the entry's relative
/// path. Sections whose entries all fail discovery still render their
/// heading, keeping the sidebar shape stable.
pub fn build_sidebar(
    settings: &NavigationSettings,
    source_root: &Path,
    exclude: &ExcludeSet,
) -> SidebarOutcome {
    let mut rendered = format!("# {}\n\n", settings.heading);
    let mut missing = Vec::new();

    for section in &settings.sections {
        rendered.push_str(&format!("## {}\n\n", section.title));
        for entry in &section.entries {
            if !entry_is_present(source_root, &entry.path, exclude) {
                missing.push(MissingEntry {
                    section: section.title.clone(),
                    path: entry.path.clone(),
                });
                continue;
            }

            let slug = slug_for_path(&entry.path);
            let title = entry
                .title
                .clone()
                .unwrap_or_else(|| title_for_path(&entry.path));
            rendered.push_str(&format!("- [{title}]({slug})\n"));
        }
        rendered.push('\n');
    }

    SidebarOutcome { rendered, missing }
}

/// Assemble the homepage body.
///
/// When the designated index document was read, its links are rewritten the
/// same way mirrored documents are; otherwise the configured fallback body
/// is used verbatim.
pub fn build_homepage(index_text: Option<&str>, settings: &NavigationSettings) -> String {
    match index_text {
        Some(text) => rewrite_links(text),
        None => settings.fallback_homepage.clone(),
    }
}

fn entry_is_present(source_root: &Path, relative: &Path, exclude: &ExcludeSet) -> bool {
    !exclude.is_match(relative) && source_root.join(relative).is_file()
}
