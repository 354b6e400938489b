//! File watching for live reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

const DEBOUNCE: Duration = Duration::from_millis(100);

/// Name of the site configuration file.
pub const CONFIG_FILE: &str = "site.toml";

/// A change the dev server cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A public file was created or changed
    PublicChanged(PathBuf),

    /// A public file was removed
    PublicRemoved(PathBuf),

    /// `site.toml` changed
    ConfigChanged(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::PublicChanged(path)
            | WatchEvent::PublicRemoved(path)
            | WatchEvent::ConfigChanged(path) => path,
        }
    }
}

/// Watches the public directory and the config file.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Start watching `paths`. Directories are watched recursively; missing
    /// paths are skipped.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(64);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if !path.exists() {
                tracing::debug!("Not watching missing path {}", path.display());
                continue;
            }
            let mode = if path.is_dir() {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher.watch(path, mode).map_err(std::io::Error::other)?;
        }

        std::thread::spawn(move || {
            let mut last_sent: Option<Instant> = None;

            while let Ok(event) = sync_rx.recv() {
                let now = Instant::now();
                if last_sent.is_some_and(|at| now.duration_since(at) < DEBOUNCE) {
                    continue;
                }

                for path in &event.paths {
                    if let Some(change) = classify_event(path, &event.kind) {
                        last_sent = Some(now);
                        if async_tx.blocking_send(change).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

fn classify_event(path: &Path, kind: &EventKind) -> Option<WatchEvent> {
    let is_config = path.file_name().is_some_and(|name| name == CONFIG_FILE);

    match kind {
        EventKind::Create(_) | EventKind::Modify(_) if is_config => {
            Some(WatchEvent::ConfigChanged(path.to_path_buf()))
        }
        EventKind::Create(_) | EventKind::Modify(_) => {
            Some(WatchEvent::PublicChanged(path.to_path_buf()))
        }
        EventKind::Remove(_) => Some(WatchEvent::PublicRemoved(path.to_path_buf())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_config_changes() {
        let event = classify_event(Path::new("site.toml"), &EventKind::Modify(ModifyKind::Any));
        assert_eq!(event, Some(WatchEvent::ConfigChanged(PathBuf::from("site.toml"))));
    }

    #[test]
    fn classifies_public_changes() {
        let path = Path::new("public/images/logo192.svg");
        assert_eq!(
            classify_event(path, &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::PublicChanged(path.to_path_buf()))
        );
        assert_eq!(
            classify_event(path, &EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::PublicRemoved(path.to_path_buf()))
        );
        assert_eq!(classify_event(path, &EventKind::Any), None);
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(temp.path().join("hero.svg"), "<svg/>").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;
        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }

    #[test]
    fn skips_missing_paths() {
        let temp = tempdir().unwrap();
        let result = FileWatcher::new(&[temp.path().join("nope")]);
        assert!(result.is_ok());
    }
}
