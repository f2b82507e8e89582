//! Pack registry
//!
//! Holds the pack id -> descriptor mapping loaded from the pack config. The
//! mapping is never patched in place: a reload builds a new `PackMap` and
//! swaps the shared `Arc` in one assignment, so a handler that took a
//! snapshot keeps a consistent view for as long as it holds it.

use crate::error::{ConfigError, Result, ServerError};
use crate::watcher::{ConfigWatcher, ReloadEvent};
use card_common::{PackDescriptor, PackMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Id of the built-in pack used when no usable config exists
pub const DEFAULT_PACK_ID: &str = "default";

/// The built-in fallback: the 41-card single-pack layout with card images
/// directly under `/cards`.
pub fn default_packs() -> PackMap {
    let mut packs = PackMap::new();
    packs.insert(
        DEFAULT_PACK_ID.to_string(),
        PackDescriptor::new("Default", 41, "", "card-back-h.jpg"),
    );
    packs
}

/// Read and validate a pack config file
pub fn load_packs(path: &Path) -> std::result::Result<PackMap, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::Missing(path.to_path_buf())
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let packs: PackMap = serde_json::from_str(&json).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    if packs.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    if let Some((id, _)) = packs.iter().find(|(_, pack)| pack.total_cards == 0) {
        return Err(ConfigError::ZeroCards(id.clone()));
    }

    Ok(packs)
}

/// Load the pack config, falling back to the built-in default pack.
///
/// The result is never empty.
pub fn load_or_default(path: &Path) -> PackMap {
    match load_packs(path) {
        Ok(packs) => {
            log::info!("Loaded {} pack(s) from {}", packs.len(), path.display());
            packs
        }
        Err(e) => {
            log::warn!("{}; using built-in default pack", e);
            default_packs()
        }
    }
}

/// Shared, atomically replaceable pack mapping
pub struct PackRegistry {
    config_path: PathBuf,
    packs: RwLock<Arc<PackMap>>,
}

impl PackRegistry {
    /// Create a registry backed by `config_path` and load it
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let packs = load_or_default(&config_path);
        Self {
            config_path,
            packs: RwLock::new(Arc::new(packs)),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Current mapping. Later reloads do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<PackMap> {
        // A poisoned lock still holds a whole Arc; there is no partial state to fear.
        let guard = self.packs.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Look up a pack by id
    pub fn get(&self, id: &str) -> Result<PackDescriptor> {
        self.snapshot()
            .get(id)
            .cloned()
            .ok_or_else(|| ServerError::NotFound { id: id.to_string() })
    }

    /// Swap in a whole new mapping
    pub fn replace(&self, packs: PackMap) {
        let packs = Arc::new(packs);
        let mut guard = self.packs.write().unwrap_or_else(|e| e.into_inner());
        *guard = packs;
    }

    /// Re-read the config file and swap the result in. Returns the pack count.
    pub fn reload(&self) -> usize {
        let packs = load_or_default(&self.config_path);
        let count = packs.len();
        self.replace(packs);
        count
    }

    /// Reload once per event until the sender side closes
    pub async fn subscribe(self: Arc<Self>, mut events: mpsc::Receiver<ReloadEvent>) {
        while let Some(event) = events.recv().await {
            log::info!("Pack config {:?}, reloading", event);
            let count = self.reload();
            log::info!("Pack registry now holds {} pack(s)", count);
        }
        log::debug!("Reload channel closed, registry stops listening");
    }

    /// Start hot reloading: poll the config every `period` and reload on
    /// change. Returns the listener task.
    ///
    /// The watcher's baseline is taken before a catch-up reload, so a write
    /// that landed after `new` loaded the file is never missed.
    pub fn watch(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let watcher = ConfigWatcher::new(&self.config_path, period);
        self.reload();

        let (tx, rx) = mpsc::channel(8);
        watcher.spawn(tx);
        tokio::spawn(Arc::clone(self).subscribe(rx))
    }
}
