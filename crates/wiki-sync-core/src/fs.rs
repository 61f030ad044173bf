use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

/// Write `contents` to `path` via a temporary file in the same directory
/// followed by a rename, creating parent directories as needed. Readers
/// never observe partial content.
pub fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new(".").to_path_buf());
    fs::create_dir_all(&parent)?;

    let mut tmp = Builder::new().prefix(".wiki-sync").tempfile_in(&parent)?;
    tmp.as_file_mut().write_all(contents.as_bytes())?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map(|_| ()).map_err(|err| err.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("nested/deeper/page.md");

        atomic_write(&target, "contents").expect("atomic write");

        assert_eq!(fs::read_to_string(&target).expect("read back"), "contents");
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("page.md");
        fs::write(&target, "old").expect("seed file");

        atomic_write(&target, "new").expect("atomic write");

        assert_eq!(fs::read_to_string(&target).expect("read back"), "new");
    }
}
