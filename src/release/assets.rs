//! Local cache of release assets.

use std::path::Path;

use super::fetch::AssetFetcher;
use super::types::{LocalAsset, Release};

/// Make every downloadable asset of `release` available under `files_dir`.
///
/// Assets already on disk are not fetched again. A failed download is
/// logged and the asset is still listed. Assets without a name or download
/// URL are skipped. With no fetcher, nothing is downloaded.
pub fn sync_assets(
    release: &Release,
    files_dir: &Path,
    fetcher: Option<&dyn AssetFetcher>,
) -> Vec<LocalAsset> {
    let mut local = Vec::new();
    for asset in &release.assets {
        let (Some(name), Some(url)) = (asset.name.as_deref(), asset.browser_download_url.as_deref())
        else {
            tracing::debug!(?asset, "skipping asset without name or download url");
            continue;
        };
        if name.is_empty() || url.is_empty() {
            continue;
        }
        let target = files_dir.join(name);
        if target.exists() {
            tracing::debug!(path = %target.display(), "asset already cached");
        } else if let Some(fetcher) = fetcher {
            tracing::info!("Downloading {name}...");
            if let Err(err) = fetcher.download(url, &target) {
                tracing::warn!(%err, asset = name, "asset download failed");
            }
        }
        local.push(LocalAsset {
            name: name.to_string(),
            size: asset.size,
        });
    }
    local
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::super::fetch::FetchError;
    use super::super::types::Asset;
    use super::*;

    #[derive(Default)]
    struct RecordingFetcher {
        fail: bool,
        calls: RefCell<Vec<(String, PathBuf)>>,
    }

    impl AssetFetcher for RecordingFetcher {
        fn download(&self, url: &str, target: &Path) -> Result<(), FetchError> {
            self.calls
                .borrow_mut()
                .push((url.to_string(), target.to_path_buf()));
            if self.fail {
                return Err(FetchError::Write {
                    path: target.to_path_buf(),
                    source: std::io::Error::other("disk full"),
                });
            }
            std::fs::write(target, b"asset").map_err(|source| FetchError::Write {
                path: target.to_path_buf(),
                source,
            })
        }
    }

    fn asset(name: Option<&str>, url: Option<&str>, size: Option<u64>) -> Asset {
        Asset {
            name: name.map(str::to_string),
            browser_download_url: url.map(str::to_string),
            size,
        }
    }

    #[test]
    fn test_downloads_missing_and_skips_cached() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("cached.zip"), b"old").unwrap();
        let release = Release {
            assets: vec![
                asset(Some("cached.zip"), Some("https://x/cached.zip"), Some(3)),
                asset(Some("new.zip"), Some("https://x/new.zip"), Some(5)),
            ],
            ..Release::default()
        };
        let fetcher = RecordingFetcher::default();

        let local = sync_assets(&release, dir.path(), Some(&fetcher));

        assert_eq!(local.len(), 2);
        let calls = fetcher.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://x/new.zip");
        assert!(dir.path().join("new.zip").exists());
    }

    #[test]
    fn test_skips_assets_missing_name_or_url() {
        let dir = tempdir().unwrap();
        let release = Release {
            assets: vec![
                asset(None, Some("https://x/a"), None),
                asset(Some("b.zip"), None, None),
                asset(Some("c.zip"), Some("https://x/c.zip"), Some(1)),
            ],
            ..Release::default()
        };

        let local = sync_assets(&release, dir.path(), None);

        assert_eq!(
            local,
            vec![LocalAsset {
                name: "c.zip".to_string(),
                size: Some(1)
            }]
        );
    }

    #[test]
    fn test_failed_download_is_still_listed() {
        let dir = tempdir().unwrap();
        let release = Release {
            assets: vec![asset(Some("a.zip"), Some("https://x/a.zip"), None)],
            ..Release::default()
        };
        let fetcher = RecordingFetcher {
            fail: true,
            ..RecordingFetcher::default()
        };

        let local = sync_assets(&release, dir.path(), Some(&fetcher));

        assert_eq!(local.len(), 1);
        assert!(!dir.path().join("a.zip").exists());
    }
}
