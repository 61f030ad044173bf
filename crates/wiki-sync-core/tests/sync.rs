use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wiki_sync_config::{Config, LoadOptions};
use wiki_sync_core::{SyncError, Synchronizer};

fn write_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    let mut file = fs::File::create(path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
}

fn load_config(dir: &TempDir) -> Config {
    let working_dir = fs::canonicalize(dir.path()).expect("canonicalize working dir");
    Config::load(LoadOptions::default().with_working_dir(working_dir)).expect("load config")
}

/// Collect every file under `root` as relative path → contents.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    let mut files = BTreeMap::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.expect("walk output tree");
        if entry.file_type().is_file() {
            let relative = entry
                .path()
                .strip_prefix(root)
                .expect("entry under root")
                .to_path_buf();
            let contents = fs::read_to_string(entry.path()).expect("read output file");
            files.insert(relative, contents);
        }
    }
    files
}

#[test]
fn mirrors_every_markdown_file_at_the_same_relative_path() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "docs/index.md", "# Home\n");
    write_file(&temp, "docs/guide.md", "# Guide\n");
    write_file(&temp, "docs/core-concepts/agents.md", "# Agents\n");
    write_file(&temp, "docs/notes.markdown", "# Notes\n");
    write_file(&temp, "docs/diagram.png", "not markdown");
    write_file(&temp, "docs/script.txt", "not markdown");

    let outcome = Synchronizer::new(load_config(&temp)).run().expect("sync run");

    assert_eq!(
        outcome.copied,
        vec![
            PathBuf::from("core-concepts/agents.md"),
            PathBuf::from("guide.md"),
            PathBuf::from("index.md"),
            PathBuf::from("notes.markdown"),
        ]
    );

    let wiki = temp.path().join("wiki");
    assert!(wiki.join("index.md").is_file());
    assert!(wiki.join("guide.md").is_file());
    assert!(wiki.join("core-concepts/agents.md").is_file());
    assert!(wiki.join("notes.markdown").is_file());
    assert!(!wiki.join("diagram.png").exists());
    assert!(!wiki.join("script.txt").exists());
}

#[test]
fn mirrored_files_are_rewritten_and_injected() {
    let temp = TempDir::new().expect("tempdir");
    write_file(
        &temp,
        "docs/guide.md",
        "# Guide\n\nSee [agents](./core-concepts/agents.md) and [home](../index.md).\n",
    );

    Synchronizer::new(load_config(&temp)).run().expect("sync run");

    let converted =
        fs::read_to_string(temp.path().join("wiki/guide.md")).expect("read converted file");
    assert_eq!(
        converted,
        "---\ntitle: guide\ndescription: Documentation for guide\n---\n\n\
         # Guide\n\nSee [agents](core-concepts/agents) and [home](/index).\n"
    );
}

#[test]
fn clean_preserves_protected_entries_and_removes_the_rest() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "docs/guide.md", "# Guide\n");
    write_file(&temp, "wiki/.git/HEAD", "ref: refs/heads/master\n");
    write_file(&temp, "wiki/stale.md", "# Stale\n");
    write_file(&temp, "wiki/stale-dir/page.md", "# Stale\n");

    Synchronizer::new(load_config(&temp)).run().expect("sync run");

    let wiki = temp.path().join("wiki");
    assert!(wiki.join(".git/HEAD").is_file(), "protected entry must survive");
    assert!(!wiki.join("stale.md").exists());
    assert!(!wiki.join("stale-dir").exists());
    assert!(wiki.join("guide.md").is_file());
}

#[test]
fn two_runs_produce_byte_identical_output() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "docs/index.md", "# Home\n\n[guide](./guide.md)\n");
    write_file(&temp, "docs/guide.md", "# Guide\n");
    write_file(
        &temp,
        ".wiki-sync.toml",
        r#"
        [[navigation.sections]]
        title = "Docs"
        entries = [{ path = "guide.md" }]
        "#,
    );

    Synchronizer::new(load_config(&temp)).run().expect("first run");
    let first = snapshot(&temp.path().join("wiki"));

    Synchronizer::new(load_config(&temp)).run().expect("second run");
    let second = snapshot(&temp.path().join("wiki"));

    assert_eq!(first, second);
}

#[test]
fn missing_source_root_cleans_but_writes_nothing() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "wiki/.git/HEAD", "ref: refs/heads/master\n");
    write_file(&temp, "wiki/stale.md", "# Stale\n");

    let outcome = Synchronizer::new(load_config(&temp)).run().expect("sync run");

    assert!(outcome.source_missing);
    assert!(outcome.copied.is_empty());
    assert!(outcome.written_navigation.is_empty());

    let wiki = temp.path().join("wiki");
    assert!(wiki.join(".git/HEAD").is_file());
    assert!(!wiki.join("stale.md").exists());
    let remaining = snapshot(&wiki);
    assert_eq!(remaining.len(), 1, "only the protected entry remains");
}

#[test]
fn navigation_files_are_written_after_populate() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "docs/index.md", "# Home\n\n[guide](./guide.md)\n");
    write_file(&temp, "docs/guide.md", "# Guide\n");
    write_file(
        &temp,
        ".wiki-sync.toml",
        r#"
        [navigation]
        heading = "Documentation Navigation"

        [[navigation.sections]]
        title = "Getting Started"
        entries = [
            { title = "Guide", path = "guide.md" },
            { path = "missing/page.md" },
        ]
        "#,
    );

    let outcome = Synchronizer::new(load_config(&temp)).run().expect("sync run");

    assert!(outcome.homepage_from_index);
    assert_eq!(
        outcome.written_navigation,
        vec!["Home.md".to_string(), "_Sidebar.md".to_string()]
    );

    let homepage =
        fs::read_to_string(temp.path().join("wiki/Home.md")).expect("read homepage");
    assert_eq!(homepage, "# Home\n\n[guide](guide)\n");

    let sidebar =
        fs::read_to_string(temp.path().join("wiki/_Sidebar.md")).expect("read sidebar");
    assert!(sidebar.contains("# Documentation Navigation"));
    assert!(sidebar.contains("- [Guide](guide)"));
    assert!(!sidebar.contains("missing"));

    assert_eq!(outcome.navigation_missing.len(), 1);
    assert_eq!(
        outcome.navigation_missing[0].path,
        PathBuf::from("missing/page.md")
    );
}

#[test]
fn homepage_falls_back_when_index_is_absent() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "docs/guide.md", "# Guide\n");
    write_file(
        &temp,
        ".wiki-sync.toml",
        r#"
        [navigation]
        fallback_homepage = "Documentation is being generated..."
        "#,
    );

    let outcome = Synchronizer::new(load_config(&temp)).run().expect("sync run");

    assert!(!outcome.homepage_from_index);
    let homepage =
        fs::read_to_string(temp.path().join("wiki/Home.md")).expect("read homepage");
    assert_eq!(homepage, "Documentation is being generated...");
}

#[test]
fn excluded_files_are_not_mirrored() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "docs/guide.md", "# Guide\n");
    write_file(&temp, "docs/drafts/wip.md", "# WIP\n");
    write_file(
        &temp,
        ".wiki-sync.toml",
        r#"
        [source]
        exclude = ["drafts/**"]
        "#,
    );

    let outcome = Synchronizer::new(load_config(&temp)).run().expect("sync run");

    assert_eq!(outcome.copied, vec![PathBuf::from("guide.md")]);
    assert!(!temp.path().join("wiki/drafts").exists());
}

#[test]
fn non_utf8_source_file_aborts_the_run() {
    let temp = TempDir::new().expect("tempdir");
    let docs = temp.path().join("docs");
    fs::create_dir_all(&docs).expect("create docs");
    fs::write(docs.join("broken.md"), [0xff, 0xfe, 0x00, 0x9f]).expect("write invalid bytes");

    let err = Synchronizer::new(load_config(&temp))
        .run()
        .expect_err("non-UTF-8 input must fail");

    match err {
        SyncError::NonUtf8 { path } => assert!(path.ends_with("broken.md")),
        other => panic!("expected NonUtf8 error, got {other}"),
    }
}

#[test]
fn protected_navigation_files_survive_clean_before_rewrite() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "docs/guide.md", "# Guide\n");
    write_file(&temp, "wiki/Home.md", "stale homepage\n");
    write_file(&temp, "wiki/_Sidebar.md", "stale sidebar\n");
    write_file(
        &temp,
        ".wiki-sync.toml",
        r#"
        [wiki]
        protected = [".git", "Home.md", "_Sidebar.md"]
        "#,
    );

    Synchronizer::new(load_config(&temp)).run().expect("sync run");

    // Protected from Clean, but Navigate still regenerates both files.
    let homepage =
        fs::read_to_string(temp.path().join("wiki/Home.md")).expect("read homepage");
    assert_ne!(homepage, "stale homepage\n");
}
