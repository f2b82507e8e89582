//! The user's deck: an ordered list of selected cards and their rarities
//!
//! Entries are not keyed. The same image can be in the deck several times,
//! even with different rarities, because rarity is rolled per reveal.
//! Positions shift on removal, so look one up with `position_of` right
//! before calling `remove`.

use card_common::{CardError, CardReference, Rarity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardReference,
    pub rarity: Rarity,
}

/// Which deck entries to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RarityFilter {
    #[default]
    All,
    Only(Rarity),
}

impl RarityFilter {
    pub fn matches(&self, rarity: Rarity) -> bool {
        match self {
            RarityFilter::All => true,
            RarityFilter::Only(wanted) => *wanted == rarity,
        }
    }
}

impl FromStr for RarityFilter {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RarityFilter::All);
        }
        s.parse::<Rarity>()
            .map(RarityFilter::Only)
            .map_err(|_| CardError::InvalidFilter(s.to_string()))
    }
}

impl fmt::Display for RarityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RarityFilter::All => f.write_str("all"),
            RarityFilter::Only(rarity) => write!(f, "{}", rarity),
        }
    }
}

/// Per-rarity counts. `total` always equals the sum of the four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeckSummary {
    pub common: usize,
    pub rare: usize,
    pub epic: usize,
    pub legendary: usize,
    pub total: usize,
}

impl DeckSummary {
    pub fn count(&self, rarity: Rarity) -> usize {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }
}

impl fmt::Display for DeckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} card(s): {} legendary, {} epic, {} rare, {} common",
            self.total, self.legendary, self.epic, self.rare, self.common
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    entries: Vec<DeckEntry>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicates are allowed.
    pub fn add(&mut self, card: CardReference, rarity: Rarity) {
        self.entries.push(DeckEntry { card, rarity });
    }

    /// Remove the entry at `index`; out of range is a no-op
    pub fn remove(&mut self, index: usize) -> Option<DeckEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Position of the most recently added entry for this card and rarity
    pub fn position_of(&self, card: &CardReference, rarity: Rarity) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|e| &e.card == card && e.rarity == rarity)
    }

    pub fn contains(&self, card: &CardReference, rarity: Rarity) -> bool {
        self.position_of(card, rarity).is_some()
    }

    /// Entries matching `filter`, in insertion order
    pub fn filter(&self, filter: RarityFilter) -> Vec<&DeckEntry> {
        self.entries
            .iter()
            .filter(|e| filter.matches(e.rarity))
            .collect()
    }

    pub fn summarize(&self) -> DeckSummary {
        let mut summary = DeckSummary::default();
        for entry in &self.entries {
            match entry.rarity {
                Rarity::Common => summary.common += 1,
                Rarity::Rare => summary.rare += 1,
                Rarity::Epic => summary.epic += 1,
                Rarity::Legendary => summary.legendary += 1,
            }
        }
        summary.total = self.entries.len();
        summary
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
