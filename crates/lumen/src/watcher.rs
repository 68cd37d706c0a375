//! File watching for `check --watch`.
//!
//! Raw notify events are coalesced per path and released once the stream has
//! been quiet for [`DEBOUNCE`], so an editor's create-then-write save reaches
//! the checker as a single event after the last write.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Quiet period after the last raw event before pending events are released.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Markdown/MDX file was modified
    ContentModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Any other modification
    Modified(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::ContentModified(path)
            | Self::Created(path)
            | Self::Deleted(path)
            | Self::Modified(path) => path,
        }
    }

    /// Whether the event can change the collection.
    pub fn affects_content(&self) -> bool {
        match self {
            Self::ContentModified(_) => true,
            Self::Created(path) | Self::Deleted(path) => is_content(path) || path.extension().is_none(),
            Self::Modified(_) => false,
        }
    }
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        // Forward coalesced events to the async side
        std::thread::spawn(move || {
            let mut pending = PendingEvents::default();

            loop {
                match sync_rx.recv_timeout(DEBOUNCE) {
                    Ok(event) => {
                        for path in &event.paths {
                            if let Some(e) = classify_event(path, &event.kind) {
                                pending.insert(e);
                            }
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        for e in pending.drain() {
                            if async_tx.blocking_send(e).is_err() {
                                return;
                            }
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        for e in pending.drain() {
                            let _ = async_tx.blocking_send(e);
                        }
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Events waiting for the stream to go quiet, at most one per path.
#[derive(Debug, Default)]
struct PendingEvents {
    events: Vec<WatchEvent>,
}

impl PendingEvents {
    /// Record an event, merging it with any pending event for the same path.
    ///
    /// The newest event wins, except that a modification never turns a
    /// pending creation back into a plain change.
    fn insert(&mut self, event: WatchEvent) {
        let Some(existing) = self.events.iter_mut().find(|e| e.path() == event.path()) else {
            self.events.push(event);
            return;
        };

        let keeps_creation = matches!(existing, WatchEvent::Created(_))
            && matches!(
                event,
                WatchEvent::ContentModified(_) | WatchEvent::Modified(_)
            );
        if !keeps_creation {
            *existing = event;
        }
    }

    fn drain(&mut self) -> std::vec::Drain<'_, WatchEvent> {
        self.events.drain(..)
    }
}

fn is_content(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("mdx")
    )
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) if is_content(path) => {
            Some(WatchEvent::ContentModified(path.to_path_buf()))
        }
        EventKind::Modify(_) => Some(WatchEvent::Modified(path.to_path_buf())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_events() {
        let md = Path::new("docs/guides/page.md");
        let png = Path::new("docs/guides/diagram.png");

        let modified = classify_event(md, &notify::EventKind::Modify(ModifyKind::Any)).unwrap();
        assert_eq!(modified, WatchEvent::ContentModified(md.to_path_buf()));
        assert!(modified.affects_content());

        let other = classify_event(png, &notify::EventKind::Modify(ModifyKind::Any)).unwrap();
        assert!(!other.affects_content());

        let created = classify_event(png, &notify::EventKind::Create(CreateKind::File)).unwrap();
        assert!(!created.affects_content());

        assert!(classify_event(md, &notify::EventKind::Access(notify::event::AccessKind::Any)).is_none());
    }

    #[test]
    fn pending_events_merge_per_path() {
        let page = PathBuf::from("docs/page.md");
        let other = PathBuf::from("docs/other.md");
        let mut pending = PendingEvents::default();

        pending.insert(WatchEvent::Created(page.clone()));
        pending.insert(WatchEvent::ContentModified(page.clone()));
        pending.insert(WatchEvent::ContentModified(other.clone()));
        pending.insert(WatchEvent::ContentModified(page.clone()));

        let drained: Vec<_> = pending.drain().collect();
        assert_eq!(
            drained,
            vec![
                WatchEvent::Created(page.clone()),
                WatchEvent::ContentModified(other.clone()),
            ]
        );
        assert_eq!(pending.drain().count(), 0);

        pending.insert(WatchEvent::Created(page.clone()));
        pending.insert(WatchEvent::Deleted(page.clone()));
        let drained: Vec<_> = pending.drain().collect();
        assert_eq!(drained, vec![WatchEvent::Deleted(page)]);
    }

    #[tokio::test]
    async fn delivers_change_after_last_write() {
        let temp = tempdir().unwrap();
        let page = temp.path().join("page.md");

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create then fill the file, the way editors save
        fs::write(&page, "").unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err(), "event released before the writes settled");
        fs::write(&page, "---\ntitle: Saved\n---\n").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv())
            .await
            .expect("timeout waiting for file watch event")
            .expect("channel should not be closed");
        assert!(event.path().ends_with("page.md"));
        assert!(event.affects_content());

        // Both writes were folded into that one event
        let extra = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
        drop(watcher);
        assert!(extra.is_err(), "unexpected follow-up event: {:?}", extra);
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let test_file = temp.path().join("page.md");

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&test_file, "---\ntitle: Created\n---\n").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }
}
