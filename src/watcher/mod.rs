//! File watching for rebuild-on-save.
//!
//! Uses notify crate for cross-platform file system events.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::document;

/// Watches a Markdown file or content tree and emits debounced change notifications.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target: Target,
    debounce: Duration,
    pending_since: Option<Instant>,
}

#[derive(Debug)]
enum Target {
    File { path: PathBuf, name: Option<OsString> },
    Tree { root: PathBuf },
}

impl SourceWatcher {
    /// Create a watcher for `path`, a single file or a directory.
    ///
    /// Directories are watched recursively; a file is watched through its
    /// parent directory so editors that replace the file are still seen.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or the path cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Canonicalize so event paths from the OS (which are always absolute
        // and canonical) match our stored paths.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let (target, watch_root, mode) = if target_path.is_dir() {
            (
                Target::Tree {
                    root: target_path.clone(),
                },
                target_path,
                RecursiveMode::Recursive,
            )
        } else {
            let name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
            let root = watch_root_for(&target_path);
            (
                Target::File {
                    path: target_path,
                    name,
                },
                root,
                RecursiveMode::NonRecursive,
            )
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, mode)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target,
            debounce,
            pending_since: None,
        })
    }

    /// The directory handed to the OS watcher.
    pub fn watch_root(&self) -> &Path {
        &self.watch_root
    }

    /// Returns true once a debounced source change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        let mut saw_relevant_event = false;
        let mut total_events = 0u32;
        let mut irrelevant_events = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            total_events += 1;
            match event {
                Ok(ev) if self.is_relevant(&ev) => {
                    saw_relevant_event = true;
                }
                Ok(ev) => {
                    irrelevant_events += 1;
                    crate::perf::log_event(
                        "watcher.irrelevant",
                        format!("kind={:?} paths={:?}", ev.kind, ev.paths),
                    );
                }
                Err(err) => {
                    tracing::warn!(%err, "file watcher error");
                }
            }
        }

        if total_events > 0 {
            crate::perf::log_event(
                "watcher.poll",
                format!(
                    "total={total_events} relevant={} irrelevant={irrelevant_events} root={}",
                    if saw_relevant_event { "yes" } else { "no" },
                    self.watch_root.display(),
                ),
            );
        }

        if saw_relevant_event {
            self.pending_since = Some(Instant::now());
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| match &self.target {
            Target::File { path: target, name } => {
                path == &self.watch_root
                    || path == target
                    || name
                        .as_ref()
                        .is_some_and(|name| path.file_name() == Some(name.as_os_str()))
            }
            Target::Tree { root } => path == root || document::is_markdown_file(path),
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
