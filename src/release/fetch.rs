//! GitHub release API and asset downloads.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use super::types::Release;

const API_BASE: &str = "https://api.github.com";
const API_TIMEOUT: Duration = Duration::from_secs(15);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Downloads a release asset to a local path.
pub trait AssetFetcher {
    /// # Errors
    /// Returns an error if the request fails or the file cannot be written.
    fn download(&self, url: &str, target: &Path) -> Result<(), FetchError>;
}

/// Blocking client for the public GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_base: String,
}

impl GithubClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_api_base(API_BASE)
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_base(api_base: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    pub const fn user_agent() -> &'static str {
        concat!("micronize/", env!("CARGO_PKG_VERSION"))
    }

    pub fn latest_release_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{owner}/{repo}/releases/latest",
            self.api_base.trim_end_matches('/')
        )
    }

    /// Fetch metadata for the newest published release of `owner/repo`.
    ///
    /// # Errors
    /// Returns an error on network failure, a non-success status, or a body
    /// that is not release JSON.
    pub fn latest_release(&self, owner: &str, repo: &str) -> Result<Release, FetchError> {
        let url = self.latest_release_url(owner, repo);
        tracing::debug!(%url, "fetching latest release");
        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .timeout(API_TIMEOUT)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }
        Ok(resp.json()?)
    }
}

impl AssetFetcher for GithubClient {
    fn download(&self, url: &str, target: &Path) -> Result<(), FetchError> {
        let write_err = |source| FetchError::Write {
            path: target.to_path_buf(),
            source,
        };
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let mut resp = self.client.get(url).timeout(DOWNLOAD_TIMEOUT).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        store_body(&mut resp, target)
    }
}

/// Stream `body` into `<target>.part`, then rename it to `target`.
///
/// On failure the partial file is removed and `target` is left untouched.
fn store_body(body: &mut impl io::Read, target: &Path) -> Result<(), FetchError> {
    let partial = partial_path(target);
    let result = write_body(body, &partial).and_then(|()| {
        fs::rename(&partial, target).map_err(|source| FetchError::Write {
            path: target.to_path_buf(),
            source,
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    result
}

fn partial_path(target: &Path) -> PathBuf {
    let mut partial = target.as_os_str().to_owned();
    partial.push(".part");
    PathBuf::from(partial)
}

fn write_body(body: &mut impl io::Read, path: &Path) -> Result<(), FetchError> {
    let write_err = |source| FetchError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
    io::copy(body, &mut writer).map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    Ok(())
}
