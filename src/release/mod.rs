//! Release announcement pages.
//!
//! Turns GitHub release metadata into a Micron page listing the release
//! notes and links to locally cached assets:
//! - [`types`]: the deserialized release payload
//! - [`fetch`]: GitHub API client and asset downloads
//! - [`assets`]: the local asset cache
//! - [`page`]: page layout

mod assets;
mod fetch;
mod format;
mod page;
mod types;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub use assets::sync_assets;
pub use fetch::{AssetFetcher, FetchError, GithubClient};
pub use format::{format_size, format_timestamp};
pub use page::{PageOptions, release_notes, render_page};
pub use types::{Asset, LocalAsset, Release};

/// Read release metadata from a JSON file shaped like the GitHub API payload.
///
/// # Errors
/// Returns an error if the file cannot be read or is not release JSON.
pub fn load_release_json(path: &Path) -> Result<Release> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read release metadata {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse release metadata {}", path.display()))
}

/// Split an `owner/name` repository slug.
///
/// # Errors
/// Returns an error unless the slug has exactly two non-empty parts.
pub fn parse_repo_slug(slug: &str) -> Result<(&str, &str)> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => anyhow::bail!("Invalid repository {slug:?}, expected OWNER/NAME"),
    }
}
