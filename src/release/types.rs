use serde::Deserialize;

/// The subset of a GitHub release payload used for the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tag_name: Option<String>,
    /// ISO 8601 publish time
    #[serde(default)]
    pub published_at: Option<String>,
    /// Release notes in GitHub Markdown
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub browser_download_url: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,
}

/// An asset available in the local files directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAsset {
    pub name: String,
    pub size: Option<u64>,
}
