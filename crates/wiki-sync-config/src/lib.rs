//! Configuration primitives and loader for wiki-sync.
//!
//! The loader resolves configuration from three layers, lowest precedence
//! first: built-in defaults → `.wiki-sync.toml` in the working directory →
//! an explicit override path. Parsed settings are normalised into typed
//! structures so the core crate never touches raw TOML.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::Glob;
use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".wiki-sync.toml";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub source: SourceSettings,
    pub wiki: WikiSettings,
    pub navigation: NavigationSettings,
}

/// Settings describing the documentation tree that feeds the sync.
#[derive(Clone, Debug)]
pub struct SourceSettings {
    /// Root of the Markdown documentation tree.
    pub root: PathBuf,
    /// Glob patterns (relative to the source root) excluded from the sync
    /// and from navigation discovery checks.
    pub exclude: PatternList,
}

/// Settings describing the generated wiki tree.
#[derive(Clone, Debug)]
pub struct WikiSettings {
    /// Root of the output tree; regenerated on every run.
    pub root: PathBuf,
    /// Entry names under the wiki root exempt from deletion during Clean.
    pub protected: Vec<String>,
    /// Filename of the generated homepage document.
    pub homepage_file: String,
    /// Filename of the generated sidebar document.
    pub sidebar_file: String,
    /// Source document (relative to the source root) promoted to homepage.
    pub index_file: String,
}

/// Settings governing sidebar and homepage assembly.
#[derive(Clone, Debug)]
pub struct NavigationSettings {
    /// Top-level heading of the generated sidebar.
    pub heading: String,
    /// Homepage body used when the index document does not exist.
    pub fallback_homepage: String,
    /// Ordered section table driving the sidebar.
    pub sections: Vec<SectionSettings>,
}

/// One sidebar section with its ordered entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionSettings {
    pub title: String,
    pub entries: Vec<EntrySettings>,
}

/// One navigation entry declared against a source-relative path.
///
/// When `title` is absent the display title is derived from the path's file
/// stem by the core crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntrySettings {
    pub title: Option<String>,
    pub path: PathBuf,
}

/// Glob pattern plus its original spelling.
#[derive(Clone, Debug)]
pub struct Pattern {
    original: String,
    glob: Glob,
}

impl Pattern {
    fn new(value: String) -> Result<Self, ConfigValidationError> {
        match Glob::new(&value) {
            Ok(glob) => Ok(Pattern {
                original: value,
                glob,
            }),
            Err(err) => Err(ConfigValidationError::new(format!(
                "invalid glob pattern '{value}': {err}"
            ))),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn glob(&self) -> &Glob {
        &self.glob
    }
}

/// Ordered list of glob patterns.
#[derive(Clone, Debug, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    fn new(patterns: Vec<Pattern>) -> Self {
        PatternList { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let mut raw = RawConfig::default();

        let local_config_path = working_dir.join(CONFIG_FILE_NAME);
        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            raw.merge(load_layer(&local_config_path, &working_dir)?);
        }

        if let Some(path) = override_path {
            raw.merge(load_layer(&path, &working_dir)?);
        }

        raw.finalize(&working_dir).map_err(ConfigError::Validation)
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn layer_base_dir(config_path: &Path, fallback: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf())
}

fn load_layer(path: &Path, fallback_base: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    let mut raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })?;
    // Roots declared by a layer resolve against that layer's directory.
    raw.resolve_roots(&layer_base_dir(path, fallback_base));
    Ok(raw)
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Single validation failure with optional field context.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(message: String) -> Self {
        ConfigValidationError {
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    wiki: Option<RawWiki>,
    #[serde(default)]
    navigation: Option<RawNavigation>,
}

impl RawConfig {
    fn resolve_roots(&mut self, base_dir: &Path) {
        if let Some(source) = &mut self.source {
            if let Some(root) = &mut source.root {
                *root = make_absolute(root, base_dir);
            }
        }
        if let Some(wiki) = &mut self.wiki {
            if let Some(root) = &mut wiki.root {
                *root = make_absolute(root, base_dir);
            }
        }
    }

    /// Overlay `other` on top of `self`, field by field.
    fn merge(&mut self, other: RawConfig) {
        if let Some(other_source) = other.source {
            match &mut self.source {
                Some(source) => source.merge(other_source),
                None => self.source = Some(other_source),
            }
        }
        if let Some(other_wiki) = other.wiki {
            match &mut self.wiki {
                Some(wiki) => wiki.merge(other_wiki),
                None => self.wiki = Some(other_wiki),
            }
        }
        if let Some(other_navigation) = other.navigation {
            match &mut self.navigation {
                Some(navigation) => navigation.merge(other_navigation),
                None => self.navigation = Some(other_navigation),
            }
        }
    }

    fn finalize(self, working_dir: &Path) -> Result<Config, ConfigValidationErrors> {
        let mut errors = Vec::new();

        let source = self.source.unwrap_or_default();
        let wiki = self.wiki.unwrap_or_default();
        let navigation = self.navigation.unwrap_or_default();

        let source_root = make_absolute(
            &source.root.unwrap_or_else(|| PathBuf::from("docs")),
            working_dir,
        );
        let exclude = compile_patterns(
            source.exclude.unwrap_or_default(),
            "source.exclude",
            &mut errors,
        );

        let wiki_root =
            make_absolute(&wiki.root.unwrap_or_else(|| PathBuf::from("wiki")), working_dir);
        let protected = wiki
            .protected
            .unwrap_or_else(|| vec![".git".to_string()]);
        for name in &protected {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                errors.push(
                    ConfigValidationError::new(format!(
                        "protected entry '{name}' must be a bare file name"
                    ))
                    .with_context("wiki.protected"),
                );
            }
        }

        let homepage_file = required_name(
            wiki.homepage_file.unwrap_or_else(|| "Home.md".to_string()),
            "wiki.homepage_file",
            &mut errors,
        );
        let sidebar_file = required_name(
            wiki.sidebar_file
                .unwrap_or_else(|| "_Sidebar.md".to_string()),
            "wiki.sidebar_file",
            &mut errors,
        );
        let index_file = required_name(
            wiki.index_file.unwrap_or_else(|| "index.md".to_string()),
            "wiki.index_file",
            &mut errors,
        );

        let heading = navigation
            .heading
            .unwrap_or_else(|| "Documentation Navigation".to_string());
        let fallback_homepage = navigation
            .fallback_homepage
            .unwrap_or_else(|| "Welcome to the documentation!".to_string());
        let sections = finalize_sections(navigation.sections.unwrap_or_default(), &mut errors);

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok(Config {
            source: SourceSettings {
                root: source_root,
                exclude: PatternList::new(exclude),
            },
            wiki: WikiSettings {
                root: wiki_root,
                protected,
                homepage_file,
                sidebar_file,
                index_file,
            },
            navigation: NavigationSettings {
                heading,
                fallback_homepage,
                sections,
            },
        })
    }
}

fn required_name(
    value: String,
    context: &str,
    errors: &mut Vec<ConfigValidationError>,
) -> String {
    if value.trim().is_empty() {
        errors.push(
            ConfigValidationError::new("value cannot be empty".to_string()).with_context(context),
        );
    }
    value
}

fn compile_patterns(
    values: Vec<String>,
    context: &str,
    errors: &mut Vec<ConfigValidationError>,
) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    for value in values {
        match Pattern::new(value) {
            Ok(pattern) => patterns.push(pattern),
            Err(err) => errors.push(err.with_context(context)),
        }
    }
    patterns
}

fn finalize_sections(
    raw: Vec<RawSection>,
    errors: &mut Vec<ConfigValidationError>,
) -> Vec<SectionSettings> {
    let mut sections = Vec::new();
    for (idx, section) in raw.into_iter().enumerate() {
        let context = format!("navigation.sections[{idx}]");
        if section.title.trim().is_empty() {
            errors.push(
                ConfigValidationError::new("section title cannot be empty".to_string())
                    .with_context(context.clone()),
            );
        }

        let mut entries = Vec::new();
        for entry in section.entries {
            if entry.path.as_os_str().is_empty() {
                errors.push(
                    ConfigValidationError::new("entry path cannot be empty".to_string())
                        .with_context(context.clone()),
                );
                continue;
            }
            if entry.path.is_absolute() {
                errors.push(
                    ConfigValidationError::new(format!(
                        "entry path '{}' must be relative to the source root",
                        entry.path.display()
                    ))
                    .with_context(context.clone()),
                );
                continue;
            }
            entries.push(EntrySettings {
                title: entry.title,
                path: entry.path,
            });
        }

        sections.push(SectionSettings {
            title: section.title,
            entries,
        });
    }
    sections
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    #[serde(default)]
    root: Option<PathBuf>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
}

impl RawSource {
    fn merge(&mut self, other: RawSource) {
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.exclude.is_some() {
            self.exclude = other.exclude;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawWiki {
    #[serde(default)]
    root: Option<PathBuf>,
    #[serde(default)]
    protected: Option<Vec<String>>,
    #[serde(default)]
    homepage_file: Option<String>,
    #[serde(default)]
    sidebar_file: Option<String>,
    #[serde(default)]
    index_file: Option<String>,
}

impl RawWiki {
    fn merge(&mut self, other: RawWiki) {
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.protected.is_some() {
            self.protected = other.protected;
        }
        if other.homepage_file.is_some() {
            self.homepage_file = other.homepage_file;
        }
        if other.sidebar_file.is_some() {
            self.sidebar_file = other.sidebar_file;
        }
        if other.index_file.is_some() {
            self.index_file = other.index_file;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawNavigation {
    #[serde(default)]
    heading: Option<String>,
    #[serde(default)]
    fallback_homepage: Option<String>,
    #[serde(default)]
    sections: Option<Vec<RawSection>>,
}

impl RawNavigation {
    fn merge(&mut self, other: RawNavigation) {
        if other.heading.is_some() {
            self.heading = other.heading;
        }
        if other.fallback_homepage.is_some() {
            self.fallback_homepage = other.fallback_homepage;
        }
        if other.sections.is_some() {
            self.sections = other.sections;
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSection {
    title: String,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    title: Option<String>,
    path: PathBuf,
}
