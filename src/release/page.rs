//! The "latest release" Micron page.

use crate::document::{LineKind, MicronDocument, OutputLine};
use crate::micron;
use crate::transduce::{Profile, Transducer};

use super::format::{format_size, format_timestamp};
use super::types::{LocalAsset, Release};

const MISSING: &str = "N/A";
const NO_NOTES: &str = "  No release notes provided.";
const NO_ASSETS: &str = "  No assets found for this release.";

/// Page options that do not come from the release payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Shown in the page title, e.g. `Latest LXMFy Release`
    pub project: Option<String>,
    /// Prefix joined with an asset name to form its node link
    pub files_base: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            project: None,
            files_base: "/file/".to_string(),
        }
    }
}

/// Transduce a release notes body with the release notes profile.
pub fn release_notes(body: &str) -> MicronDocument {
    let profile = Profile::release_notes();
    Transducer::new(&profile).run(body.lines())
}

/// Build the full release page.
pub fn render_page(release: &Release, assets: &[LocalAsset], options: &PageOptions) -> MicronDocument {
    let mut page = MicronDocument::default();
    let name = release.name.as_deref().unwrap_or(MISSING);
    let tag = release.tag_name.as_deref().unwrap_or(MISSING);
    let title = options.project.as_deref().map_or_else(
        || format!("Latest Release: {name} ({tag})"),
        |project| format!("Latest {project} Release: {name} ({tag})"),
    );
    page.push(heading(1, &title));
    page.push(prose(micron::field(
        "Published (UTC)",
        &format_timestamp(release.published_at.as_deref()),
    )));
    page.push(rule());

    page.push(heading(2, "Release Notes"));
    match release.body.as_deref().filter(|body| !body.is_empty()) {
        Some(body) => page.extend(release_notes(body).lines().iter().cloned()),
        None => page.push(prose(NO_NOTES.to_string())),
    }
    page.push(rule());

    if assets.is_empty() {
        page.push(heading(2, "Assets"));
        page.push(prose(NO_ASSETS.to_string()));
    } else {
        page.push(heading(2, "Assets (Local Links)"));
        for asset in assets {
            let link = micron::link(&asset.name, &format!("{}{}", options.files_base, asset.name));
            page.push(prose(format!("  {}", micron::field("File", &asset.name))));
            page.push(prose(format!("  {}", micron::field("Size", &format_size(asset.size)))));
            page.push(prose(format!("  {}", micron::field("Link", &link))));
            page.push(OutputLine::new(format!("  {}", micron::RULE), LineKind::Rule));
        }
    }
    page.push(rule());
    page
}

fn heading(level: usize, text: &str) -> OutputLine {
    OutputLine::new(micron::heading(level, text), LineKind::Heading(level))
}

fn prose(content: String) -> OutputLine {
    OutputLine::new(content, LineKind::Prose)
}

fn rule() -> OutputLine {
    OutputLine::new(micron::RULE.to_string(), LineKind::Rule)
}
