//! Source and output document types.
//!
//! This module handles:
//! - Splitting source text into lines
//! - Classified Micron output lines
//! - Mapping Markdown source paths to `.mu` output paths

mod types;

use std::path::{Path, PathBuf};

pub use types::{LineKind, MicronDocument, OutputLine, SourceDocument};

/// Extensions treated as Markdown sources.
const MARKDOWN_EXTENSIONS: &[&str] = &["md"];

/// Extension of generated Micron pages.
pub const MICRON_EXTENSION: &str = "mu";

/// Returns true if the file extension marks a Markdown source.
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
}

/// Mirror `source` (under `content_root`) into `out_root` as a `.mu` page.
///
/// Returns `None` when `source` does not live under `content_root`.
pub fn output_path(content_root: &Path, out_root: &Path, source: &Path) -> Option<PathBuf> {
    let relative = source.strip_prefix(content_root).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(out_root.join(relative).with_extension(MICRON_EXTENSION))
}
