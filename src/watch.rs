//! Poll-based change detection for markup sources.
//!
//! A [`FileWatcher`] remembers the last-modified time of one file. Each call to
//! [`FileWatcher::has_changed`] reads it again; a readable time different from
//! the remembered one counts as a change and notifies every observer on the
//! calling thread. A file that cannot be read is never a change.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

new_key_type! {
    /// Handle returned by [`FileWatcher::add_observer`].
    pub struct ObserverId;
}

/// Receives change notifications from a [`FileWatcher`].
pub trait FileObserver {
    fn on_file_changed(&mut self, path: &Path);
}

impl<F: FnMut(&Path)> FileObserver for F {
    fn on_file_changed(&mut self, path: &Path) {
        self(path)
    }
}

pub struct FileWatcher {
    path: PathBuf,
    last_modified: Option<SystemTime>,
    observers: SlotMap<ObserverId, Box<dyn FileObserver>>,
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("path", &self.path)
            .field("last_modified", &self.last_modified)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl FileWatcher {
    /// Watch `path`, taking its current modification time as the baseline.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let last_modified = modified_time(&path);
        Self {
            path,
            last_modified,
            observers: SlotMap::with_key(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Baseline modification time, `None` if the file was unreadable.
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    /// Check the file once. On a change, store the new time, notify every
    /// observer and return `true`.
    pub fn has_changed(&mut self) -> bool {
        let Some(current) = modified_time(&self.path) else {
            return false;
        };
        if self.last_modified == Some(current) {
            return false;
        }
        self.last_modified = Some(current);
        debug!(path = %self.path.display(), observers = self.observers.len(), "source changed");
        for observer in self.observers.values_mut() {
            observer.on_file_changed(&self.path);
        }
        true
    }

    /// Take the current modification time as the new baseline without
    /// notifying anyone.
    pub fn reset(&mut self) {
        self.last_modified = modified_time(&self.path);
    }

    pub fn add_observer(&mut self, observer: impl FileObserver + 'static) -> ObserverId {
        self.observers.insert(Box::new(observer))
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id).is_some()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
