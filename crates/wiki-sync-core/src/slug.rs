//! Slug and title derivation from source-relative paths.
//!
//! A slug is the flat, extension-free identifier a wiki viewer uses to
//! cross-reference a page. Derivation is a pure function of the relative
//! path, so navigation entries and mirrored documents agree on the same
//! identifier without coordination. Distinct paths are expected to produce
//! distinct slugs; a tree containing both `a/b.md` and `a-b.md` would
//! collide, and nothing here prevents that.

use std::path::{Component, Path};

/// Derive the navigation slug for a source-relative path.
///
/// `core-concepts/agents.md` becomes `core-concepts-agents`.
pub fn slug_for_path(relative: &Path) -> String {
    let mut slug = String::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            if !slug.is_empty() {
                slug.push('-');
            }
            slug.push_str(&part.to_string_lossy());
        }
    }
    strip_markdown_extension(&slug).to_string()
}

/// Derive a display title from a path's file stem.
///
/// Hyphens and underscores become spaces and each word is capitalised:
/// `getting-started/quick-start.md` becomes `Quick Start`.
pub fn title_for_path(relative: &Path) -> String {
    let name = relative
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = strip_markdown_extension(&name);

    let mut title = String::new();
    for word in stem.split(['-', '_', ' ']).filter(|word| !word.is_empty()) {
        if !title.is_empty() {
            title.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            title.extend(first.to_uppercase());
            title.push_str(&chars.as_str().to_lowercase());
        }
    }
    title
}

fn strip_markdown_extension(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".markdown") {
        &name[..name.len() - ".markdown".len()]
    } else if lower.ends_with(".md") {
        &name[..name.len() - ".md".len()]
    } else {
        name
    }
}
