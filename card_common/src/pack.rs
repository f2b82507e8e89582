//! Pack descriptors, as read from the pack config and served on `/api/packs`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pack id -> descriptor. Ordered so listings are stable.
pub type PackMap = BTreeMap<String, PackDescriptor>;

/// One configured pack. The id is the key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackDescriptor {
    pub name: String,
    pub total_cards: u32,
    /// Asset folder under `/cards`, may be empty
    #[serde(default)]
    pub folder: String,
    pub card_back: String,
}

impl PackDescriptor {
    pub fn new(
        name: impl Into<String>,
        total_cards: u32,
        folder: impl Into<String>,
        card_back: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            total_cards,
            folder: folder.into(),
            card_back: card_back.into(),
        }
    }
}
