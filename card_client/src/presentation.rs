//! Flip/zoom/select state for dealt cards
//!
//! A card starts face down. The first click flips it and rolls its rarity;
//! that cannot be undone for as long as the card is on the table. After that,
//! clicks toggle the enlarged view. Selection is independent of both.
//!
//! `Table` holds the cards of one deal and allows at most one zoomed card:
//! while a card is zoomed the overlay covers everything else, and any click
//! on the table closes the zoom.

use crate::error::{ClientError, ClientResult};
use card_common::{CardReference, Rarity};
use rand::Rng;

/// Map a uniform roll in `[0, 100)` to a rarity.
///
/// Cumulative thresholds: legendary 5%, epic 15%, rare 30%, common 50%.
pub fn rarity_for_roll(roll: f64) -> Rarity {
    if roll < 5.0 {
        Rarity::Legendary
    } else if roll < 20.0 {
        Rarity::Epic
    } else if roll < 50.0 {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

pub fn roll_rarity<R: Rng + ?Sized>(rng: &mut R) -> Rarity {
    rarity_for_roll(rng.gen_range(0.0..100.0))
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTransition {
    Flipped(Rarity),
    Zoomed,
    Unzoomed,
}

/// Presentation state of one dealt card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPresentation {
    card: CardReference,
    /// Set exactly once, on flip
    rarity: Option<Rarity>,
    zoomed: bool,
    selected: bool,
}

impl CardPresentation {
    pub fn new(card: CardReference) -> Self {
        Self {
            card,
            rarity: None,
            zoomed: false,
            selected: false,
        }
    }

    pub fn card(&self) -> &CardReference {
        &self.card
    }

    pub fn rarity(&self) -> Option<Rarity> {
        self.rarity
    }

    pub fn is_flipped(&self) -> bool {
        self.rarity.is_some()
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Hover tilt only applies to cards that are not enlarged
    pub fn tilt_enabled(&self) -> bool {
        !self.zoomed
    }

    /// Unflipped: flip and roll rarity. Flipped: toggle zoom.
    pub fn click<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CardTransition {
        match self.rarity {
            None => {
                let rarity = roll_rarity(rng);
                self.rarity = Some(rarity);
                CardTransition::Flipped(rarity)
            }
            Some(_) if self.zoomed => {
                self.zoomed = false;
                CardTransition::Unzoomed
            }
            Some(_) => {
                self.zoomed = true;
                CardTransition::Zoomed
            }
        }
    }

    /// Close the enlarged view. Returns false if it was not open.
    pub fn unzoom(&mut self) -> bool {
        std::mem::replace(&mut self.zoomed, false)
    }

    /// Flip the selected flag, returning the new value
    pub(crate) fn toggle_selected(&mut self) -> bool {
        self.selected = !self.selected;
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// The cards of one deal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    cards: Vec<CardPresentation>,
    zoomed: Option<usize>,
}

impl Table {
    /// Fresh, face-down presentation for every dealt card
    pub fn deal(cards: Vec<CardReference>) -> Self {
        Self {
            cards: cards.into_iter().map(CardPresentation::new).collect(),
            zoomed: None,
        }
    }

    pub fn cards(&self) -> &[CardPresentation] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&CardPresentation> {
        self.cards.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> ClientResult<&mut CardPresentation> {
        self.cards.get_mut(index).ok_or(ClientError::NoCardAt(index))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index of the zoomed card, if any
    pub fn zoomed(&self) -> Option<usize> {
        self.zoomed
    }

    pub fn overlay_visible(&self) -> bool {
        self.zoomed.is_some()
    }

    /// Click on the card at `index`.
    ///
    /// With a card zoomed the overlay takes the click: the zoomed card is
    /// closed and nothing else changes.
    pub fn click<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut R,
    ) -> ClientResult<CardTransition> {
        if index >= self.cards.len() {
            return Err(ClientError::NoCardAt(index));
        }
        if let Some(transition) = self.click_overlay() {
            return Ok(transition);
        }

        let transition = self.cards[index].click(rng);
        if transition == CardTransition::Zoomed {
            self.zoomed = Some(index);
        }
        Ok(transition)
    }

    /// Click on the zoom overlay. `None` when no overlay is up.
    pub fn click_overlay(&mut self) -> Option<CardTransition> {
        let index = self.zoomed.take()?;
        self.cards[index].unzoom();
        Some(CardTransition::Unzoomed)
    }
}

#[cfg(test)]
#[path = "presentation_tests.rs"]
mod tests;
