//! Directory synchronization: Clean → Populate → Navigate.
//!
//! Each run is a full regeneration. Clean removes everything under the wiki
//! root except the protected allowlist, Populate mirrors every qualifying
//! Markdown file through the rewrite/inject pipeline, and Navigate rewrites
//! the homepage and sidebar. The phases run strictly in that order with no
//! rollback: a run interrupted mid-Populate leaves the wiki root partially
//! regenerated. Callers must not overlap runs against the same wiki root.
//!
//! Source text is read fresh on every run and flows read → rewrite → inject
//! → write exactly once per file; generated output is never re-read, which
//! is what keeps the non-idempotent front-matter injection safe.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wiki_sync_config::Config;

use crate::error::{SyncError, SyncResult};
use crate::front_matter;
use crate::fs::atomic_write;
use crate::links::rewrite_links;
use crate::navigation::{build_homepage, build_sidebar, MissingEntry};
use crate::paths::{is_markdown_path, ExcludeSet};

/// Single-run synchronizer over a configured source and wiki root.
pub struct Synchronizer {
    config: Config,
    exclude: ExcludeSet,
}

/// What a run did, for reporting and assertions.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    /// Source-relative paths mirrored into the wiki root, in walk order.
    pub copied: Vec<PathBuf>,
    /// True when the source root was absent; the run stopped after Clean.
    pub source_missing: bool,
    /// Navigation entries omitted because their source file was not found.
    pub navigation_missing: Vec<MissingEntry>,
    /// True when the homepage was derived from the index document rather
    /// than the configured fallback body.
    pub homepage_from_index: bool,
    /// Names of the navigation files written during Navigate, in write order.
    pub written_navigation: Vec<String>,
}

impl Synchronizer {
    pub fn new(config: Config) -> Self {
        let exclude = ExcludeSet::from_patterns(&config.source.exclude);
        Synchronizer { config, exclude }
    }

    /// Run the full Clean → Populate → Navigate sequence.
    ///
    /// A missing source root is not an error: Clean has already happened,
    /// the condition is recorded on the outcome, and nothing is written.
    pub fn run(&self) -> SyncResult<SyncOutcome> {
        let mut outcome = SyncOutcome::default();

        self.clean()?;

        if !self.config.source.root.exists() {
            outcome.source_missing = true;
            return Ok(outcome);
        }

        self.populate(&mut outcome)?;
        self.navigate(&mut outcome)?;

        Ok(outcome)
    }

    /// Delete every entry under the wiki root not on the protected allowlist.
    fn clean(&self) -> SyncResult<()> {
        let root = &self.config.wiki.root;
        if !root.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(root).map_err(|source| SyncError::Clean {
            path: root.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| SyncError::Clean {
                path: root.clone(),
                source,
            })?;
            let name = entry.file_name();
            if self
                .config
                .wiki
                .protected
                .iter()
                .any(|protected| protected.as_str() == name)
            {
                continue;
            }

            let path = entry.path();
            let result = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            result.map_err(|source| SyncError::Clean { path, source })?;
        }

        Ok(())
    }

    /// Mirror every qualifying source file through rewrite + inject.
    fn populate(&self, outcome: &mut SyncOutcome) -> SyncResult<()> {
        let source_root = &self.config.source.root;

        for entry in WalkDir::new(source_root).sort_by_file_name() {
            let entry = entry.map_err(|source| SyncError::Walk {
                path: source_root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() || !is_markdown_path(entry.path()) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(source_root)
                .expect("walked entries live under the source root");
            if self.exclude.is_match(relative) {
                continue;
            }

            let text = read_utf8(entry.path())?;
            let converted = front_matter::inject(relative, &rewrite_links(&text));

            let destination = self.config.wiki.root.join(relative);
            atomic_write(&destination, &converted).map_err(|source| SyncError::Write {
                path: destination.clone(),
                source,
            })?;
            outcome.copied.push(relative.to_path_buf());
        }

        Ok(())
    }

    /// Write the homepage and sidebar into the wiki root.
    fn navigate(&self, outcome: &mut SyncOutcome) -> SyncResult<()> {
        let wiki = &self.config.wiki;

        let index_path = self.config.source.root.join(&wiki.index_file);
        let index_text = if index_path.is_file() {
            Some(read_utf8(&index_path)?)
        } else {
            None
        };
        outcome.homepage_from_index = index_text.is_some();

        let homepage = build_homepage(index_text.as_deref(), &self.config.navigation);
        self.write_navigation_file(&wiki.homepage_file, &homepage, outcome)?;

        let sidebar = build_sidebar(&self.config.navigation, &self.config.source.root, &self.exclude);
        self.write_navigation_file(&wiki.sidebar_file, &sidebar.rendered, outcome)?;
        outcome.navigation_missing = sidebar.missing;

        Ok(())
    }

    fn write_navigation_file(
        &self,
        name: &str,
        contents: &str,
        outcome: &mut SyncOutcome,
    ) -> SyncResult<()> {
        let path = self.config.wiki.root.join(name);
        atomic_write(&path, contents).map_err(|source| SyncError::Write { path, source })?;
        outcome.written_navigation.push(name.to_string());
        Ok(())
    }
}

fn read_utf8(path: &Path) -> SyncResult<String> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::InvalidData {
            SyncError::NonUtf8 {
                path: path.to_path_buf(),
            }
        } else {
            SyncError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
