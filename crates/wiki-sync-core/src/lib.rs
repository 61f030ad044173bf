//! Core pipeline for mirroring a Markdown documentation tree into a
//! wiki-formatted tree: slug derivation, inline-link rewriting, front-matter
//! injection, navigation assembly, and the directory synchronizer that
//! drives them.

mod error;
mod fs;
mod paths;

pub mod front_matter;
pub mod links;
pub mod navigation;
pub mod slug;
pub mod sync;

pub use error::{SyncError, SyncResult};
pub use navigation::{build_homepage, build_sidebar, MissingEntry, SidebarOutcome};
pub use paths::{is_markdown_path, ExcludeSet};
pub use sync::{SyncOutcome, Synchronizer};
