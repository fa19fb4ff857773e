use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::library_io::LIBRARY_FILE;

/// Events sent from the data-directory watcher to the TUI event loop.
#[derive(Debug, PartialEq, Eq)]
pub enum LibraryEvent {
    /// library.json was written by some process (possibly us).
    Changed,
}

/// Watches the data directory for changes to library.json.
pub struct LibraryWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<LibraryEvent>,
}

impl LibraryWatcher {
    /// Start watching `data_dir` (non-recursive).
    /// Returns a `LibraryWatcher` whose `poll()` method should be called each tick.
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                // Atomic writes land as a rename onto library.json
                let relevant = event.paths.iter().any(|p| {
                    p.file_name().and_then(|n| n.to_str()) == Some(LIBRARY_FILE)
                });
                if relevant {
                    let _ = tx.send(LibraryEvent::Changed);
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;
        Ok(LibraryWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll. Collapses any burst of queued events into one.
    pub fn poll(&self) -> Option<LibraryEvent> {
        let mut changed = None;
        while let Ok(evt) = self.rx.try_recv() {
            changed = Some(evt);
        }
        changed
    }
}
