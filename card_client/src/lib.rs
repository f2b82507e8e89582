//! Card Client - the card reveal page's state, without the page
//!
//! Deals hands from a card server, tracks each card's flip/zoom/selection
//! state, builds the deck of selected cards and exports it as an archive.

pub mod api;
pub mod deck;
pub mod error;
pub mod export;
pub mod presentation;
pub mod state;

// Re-export commonly used items
pub use api::{PackClient, DEFAULT_SERVER_URL};
pub use deck::{Deck, DeckEntry, DeckSummary, RarityFilter};
pub use error::{ClientError, ClientResult};
pub use export::{default_export_path, export_deck, DeckArchive, ExportManifest, ImageFetcher};
pub use presentation::{roll_rarity, CardPresentation, CardTransition, Table};
pub use state::{deal, load_packs, AppState, DrawTicket};
