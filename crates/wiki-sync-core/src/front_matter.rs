//! Front-matter injection for mirrored documents.

use std::path::Path;

/// Prepend a title/description front-matter block derived from the source
/// file's stem, followed by a blank line, to `body`.
///
/// Plain concatenation: injecting twice doubles the header. The synchronizer
/// upholds the fresh-read invariant — each source document is read once per
/// run and injected exactly once, and generated output is never fed back in.
pub fn inject(relative: &Path, body: &str) -> String {
    let stem = relative
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("---\ntitle: {stem}\ndescription: Documentation for {stem}\n---\n\n{body}")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn prepends_header_and_blank_line() {
        let converted = inject(Path::new("core-concepts/agents.md"), "# Agents\n");
        assert_eq!(
            converted,
            "---\ntitle: agents\ndescription: Documentation for agents\n---\n\n# Agents\n"
        );
    }

    #[test]
    fn stem_is_used_verbatim() {
        let converted = inject(Path::new("quick-start.md"), "body");
        assert!(converted.starts_with("---\ntitle: quick-start\n"));
    }

    #[test]
    fn double_injection_doubles_the_header() {
        let once = inject(Path::new("a.md"), "body");
        let twice = inject(Path::new("a.md"), &once);
        assert_eq!(twice.matches("---\ntitle: a\n").count(), 2);
    }
}
