//! Converting Markdown files and content trees to Micron pages.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::document::{self, LineKind, MicronDocument, SourceDocument};
use crate::perf;
use crate::transduce::{Profile, transduce_document};

/// One page written by a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPage {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Lines in the written page
    pub lines: usize,
    /// Read, transduce and write time
    pub elapsed: Duration,
}

/// Pages written by a conversion run, in conversion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    pub pages: Vec<ConvertedPage>,
}

impl ConvertReport {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.pages.iter().map(|page| page.elapsed).sum()
    }

    /// The page that took longest to convert.
    pub fn slowest(&self) -> Option<&ConvertedPage> {
        self.pages.iter().max_by_key(|page| page.elapsed)
    }
}

/// Transduce a whole document, joining output lines with `\n`.
pub fn convert_text(text: &str, profile: &Profile) -> String {
    transduce_document(&SourceDocument::from_text(text), profile).to_markup()
}

/// Convert one Markdown file and write the page to `output`.
///
/// # Errors
/// Returns an error if the source cannot be read or the page cannot be written.
pub fn convert_file(input: &Path, output: &Path, profile: &Profile) -> Result<ConvertedPage> {
    let start = Instant::now();
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let page = transduce_document(&SourceDocument::from_text(&source), profile);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(output, format!("{}\n", page.to_markup()))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let converted = ConvertedPage {
        source: input.to_path_buf(),
        output: output.to_path_buf(),
        lines: page.lines().len(),
        elapsed: start.elapsed(),
    };
    perf::log_event(
        "convert.file",
        format_args!(
            "{} -> {} lines={} headings={} code_blocks={} {:.3}ms",
            input.display(),
            output.display(),
            converted.lines,
            count_kind(&page, |kind| matches!(kind, LineKind::Heading(_))),
            count_kind(&page, |kind| kind == LineKind::CodeOpen),
            perf::millis(converted.elapsed),
        ),
    );
    Ok(converted)
}

fn count_kind(page: &MicronDocument, pred: impl Fn(LineKind) -> bool) -> usize {
    page.lines().iter().filter(|line| pred(line.kind())).count()
}

/// Convert every `.md` file under `content_root`, mirroring the layout in `out_root`.
///
/// Files are visited in sorted order so repeated runs write identically.
/// `out_root` may equal `content_root`, writing each page next to its source.
///
/// # Errors
/// Returns an error if the tree cannot be walked or any file fails to convert.
pub fn convert_tree(content_root: &Path, out_root: &Path, profile: &Profile) -> Result<ConvertReport> {
    let _phase = perf::phase("convert.tree");
    let nested_out = out_root != content_root && out_root.starts_with(content_root);
    let mut report = ConvertReport::default();
    for entry in WalkDir::new(content_root).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to walk {}", content_root.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !document::is_markdown_file(path) {
            continue;
        }
        // Pages under a nested output directory are not sources.
        if nested_out && path.starts_with(out_root) {
            continue;
        }
        let Some(output) = document::output_path(content_root, out_root, path) else {
            continue;
        };
        tracing::debug!(source = %path.display(), output = %output.display(), "converting");
        report.pages.push(convert_file(path, &output, profile)?);
    }
    Ok(report)
}

/// Convert a single file or a whole directory.
///
/// A file is written next to itself as `.mu` unless `out_dir` is given. A
/// directory needs `out_dir`.
///
/// # Errors
/// Returns an error if `input` does not exist, is not a Markdown file, a
/// directory has no output directory, or conversion fails.
pub fn convert_path(input: &Path, out_dir: Option<&Path>, profile: &Profile) -> Result<ConvertReport> {
    if input.is_dir() {
        let Some(out_dir) = out_dir else {
            anyhow::bail!(
                "An output directory (--out-dir) is required to convert directory {}",
                input.display()
            );
        };
        return convert_tree(input, out_dir, profile);
    }
    if !input.exists() {
        anyhow::bail!("File not found: {}", input.display());
    }
    if !document::is_markdown_file(input) {
        anyhow::bail!("Not a Markdown file: {}", input.display());
    }
    let output = single_file_output(input, out_dir);
    Ok(ConvertReport {
        pages: vec![convert_file(input, &output, profile)?],
    })
}

fn single_file_output(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let page = input.with_extension(document::MICRON_EXTENSION);
    match (out_dir, page.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_convert_text_joins_lines() {
        let page = convert_text("# Hi\n\nText *here*\n", &Profile::document());
        assert_eq!(page, "> `!Hi`!\n\nText `*here`*");
    }

    #[test]
    fn test_convert_file_writes_trailing_newline() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("post.md");
        let output = dir.path().join("out").join("post.mu");
        fs::write(&input, "---\n").unwrap();

        convert_file(&input, &output, &Profile::document()).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "-\n");
    }

    #[test]
    fn test_single_file_output_next_to_source_or_in_dir() {
        assert_eq!(
            single_file_output(Path::new("notes/a.md"), None),
            PathBuf::from("notes/a.mu")
        );
        assert_eq!(
            single_file_output(Path::new("notes/a.md"), Some(Path::new("pages"))),
            PathBuf::from("pages/a.mu")
        );
    }

    #[test]
    fn test_convert_path_directory_requires_out_dir() {
        let dir = tempdir().unwrap();
        let err = convert_path(dir.path(), None, &Profile::document()).unwrap_err();
        assert!(err.to_string().contains("--out-dir"));
    }

    #[test]
    fn test_convert_path_missing_file() {
        let dir = tempdir().unwrap();
        let err =
            convert_path(&dir.path().join("nope.md"), None, &Profile::document()).unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_convert_tree_skips_output_nested_in_content() {
        let dir = tempdir().unwrap();
        let content = dir.path().join("content");
        let out = content.join("site");
        fs::create_dir_all(&out).unwrap();
        fs::write(content.join("a.md"), "# A").unwrap();
        fs::write(out.join("stale.md"), "# stale").unwrap();

        let report = convert_tree(&content, &out, &Profile::document()).unwrap();

        assert_eq!(report.len(), 1);
        assert!(out.join("a.mu").exists());
        assert!(!out.join("site").exists());
    }

    #[test]
    fn test_convert_tree_in_place_writes_next_to_sources() {
        let dir = tempdir().unwrap();
        let content = dir.path().join("docs");
        fs::create_dir_all(content.join("sub")).unwrap();
        fs::write(content.join("a.md"), "# A").unwrap();
        fs::write(content.join("sub").join("b.md"), "- b").unwrap();

        let report = convert_tree(&content, &content, &Profile::document()).unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(fs::read_to_string(content.join("a.mu")).unwrap(), "> `!A`!\n");
        assert_eq!(
            fs::read_to_string(content.join("sub").join("b.mu")).unwrap(),
            "* b\n"
        );
    }

    #[test]
    fn test_convert_path_rejects_non_markdown_file() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("page.mu");
        fs::write(&page, "# keep me\n").unwrap();

        let err = convert_path(&page, None, &Profile::document()).unwrap_err();

        assert!(err.to_string().starts_with("Not a Markdown file"));
        assert_eq!(fs::read_to_string(&page).unwrap(), "# keep me\n");
    }

    #[test]
    fn test_report_records_page_line_counts() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("post.md");
        fs::write(&input, "# T\n\nbody\n").unwrap();

        let report = convert_path(&input, None, &Profile::document()).unwrap();

        assert_eq!(report.pages[0].lines, 3);
        assert_eq!(report.pages[0].output, dir.path().join("post.mu"));
        assert_eq!(report.slowest(), report.pages.first());
        assert_eq!(report.total_elapsed(), report.pages[0].elapsed);
    }
}
