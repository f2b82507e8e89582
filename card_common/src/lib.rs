//! Card Common - shared types for the card reveal server and client
//!
//! Pack descriptors as they appear in the pack config and on `/api/packs`,
//! card references returned by a draw, and the rarity tiers assigned on reveal.

pub mod card;
pub mod error;
pub mod pack;
pub mod rarity;

pub use card::CardReference;
pub use error::{CardError, Result};
pub use pack::{PackDescriptor, PackMap};
pub use rarity::Rarity;
