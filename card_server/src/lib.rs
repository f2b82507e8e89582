//! Card Server - card pack registry and random draws over HTTP
//!
//! Loads the configured packs (hot-reloading the config file when it changes)
//! and serves random, duplicate-free card draws for the card reveal page.

pub mod draw;
pub mod error;
pub mod registry;
pub mod watcher;
pub mod web;

pub use draw::{draw, DEFAULT_DRAW_COUNT};
pub use error::{ConfigError, Result, ServerError};
pub use registry::{default_packs, load_or_default, load_packs, PackRegistry, DEFAULT_PACK_ID};
pub use watcher::{ConfigWatcher, ReloadEvent};
pub use web::{create_router, serve, ServeConfig};
