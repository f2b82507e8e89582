//! Pack config watcher
//!
//! Polls the config file's metadata on a fixed interval and emits a
//! `ReloadEvent` whenever it appears, disappears, or changes. The registry
//! subscribes to these events (see `PackRegistry::subscribe`).

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;

/// Change observed on the pack config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadEvent {
    Created,
    Modified,
    Removed,
}

/// Modification time plus length. Length catches rewrites that land within
/// the filesystem's timestamp granularity.
type Stamp = (Option<SystemTime>, u64);

fn stamp(path: &Path) -> Option<Stamp> {
    std::fs::metadata(path)
        .ok()
        .map(|meta| (meta.modified().ok(), meta.len()))
}

pub struct ConfigWatcher {
    path: PathBuf,
    period: Duration,
    last: Option<Stamp>,
}

impl ConfigWatcher {
    /// Start watching `path`; its current state is the baseline
    pub fn new(path: impl Into<PathBuf>, period: Duration) -> Self {
        let path = path.into();
        let last = stamp(&path);
        Self { path, period, last }
    }

    /// Compare the file against the last observed state
    pub fn poll(&mut self) -> Option<ReloadEvent> {
        let current = stamp(&self.path);
        let event = match (&self.last, &current) {
            (None, None) => None,
            (None, Some(_)) => Some(ReloadEvent::Created),
            (Some(_), None) => Some(ReloadEvent::Removed),
            (Some(old), Some(new)) if old != new => Some(ReloadEvent::Modified),
            _ => None,
        };
        self.last = current;
        event
    }

    /// Poll forever on a tokio interval, forwarding events to `events`.
    /// Stops when the receiving side is dropped.
    pub fn spawn(mut self, events: mpsc::Sender<ReloadEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            log::info!(
                "Watching {} for changes every {:?}",
                self.path.display(),
                self.period
            );
            let mut ticker = interval(self.period);
            loop {
                ticker.tick().await;
                if let Some(event) = self.poll() {
                    log::debug!("{} {:?}", self.path.display(), event);
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
            }
        })
    }
}
