//! Card references returned by a draw
//!
//! A reference is just the asset path of the card's front image, relative to
//! the `/cards` mount. It carries no rarity; that is rolled on reveal.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardReference(String);

impl CardReference {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Build the reference for card number `n` of a pack stored under `folder`.
    ///
    /// An empty folder yields a bare `card{n}.jpg`, the layout of a single-pack
    /// asset tree.
    pub fn for_pack(folder: &str, n: u32) -> Self {
        let folder = folder.trim_matches('/');
        if folder.is_empty() {
            Self(format!("card{}.jpg", n))
        } else {
            Self(format!("{}/card{}.jpg", folder, n))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File extension of the final path segment, if it has one
    pub fn extension(&self) -> Option<&str> {
        let file_name = self.0.rsplit('/').next().unwrap_or(&self.0);
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

impl fmt::Display for CardReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardReference {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
