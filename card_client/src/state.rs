//! Client application state
//!
//! One object owns everything the page tracks between events: the pack list,
//! the chosen pack, the dealt table, the deck and the deck filter. Front ends
//! call the methods below for each user action. The async helpers take the
//! state behind a `Mutex` and lock it only around each update, never across a
//! request, so the page stays usable while a draw is pending.

use crate::api::PackClient;
use crate::deck::{Deck, DeckEntry, DeckSummary, RarityFilter};
use crate::error::{ClientError, ClientResult};
use crate::presentation::{CardTransition, Table};
use card_common::{CardReference, PackDescriptor, PackMap};
use rand::Rng;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Issued when a draw request starts; only the latest ticket may install
/// its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawTicket(u64);

#[derive(Debug, Default)]
pub struct AppState {
    packs: PackMap,
    current_pack: Option<String>,
    table: Option<Table>,
    deck: Deck,
    current_filter: RarityFilter,
    latest_draw: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pack list. Keeps the current pack if it still exists,
    /// otherwise picks the first one.
    pub fn set_packs(&mut self, packs: PackMap) {
        let keep = self
            .current_pack
            .as_ref()
            .is_some_and(|id| packs.contains_key(id));
        if !keep {
            self.current_pack = packs.keys().next().cloned();
        }
        self.packs = packs;
    }

    pub fn packs(&self) -> &PackMap {
        &self.packs
    }

    pub fn select_pack(&mut self, id: &str) -> ClientResult<()> {
        if !self.packs.contains_key(id) {
            return Err(ClientError::UnknownPack(id.to_string()));
        }
        self.current_pack = Some(id.to_string());
        Ok(())
    }

    pub fn current_pack_id(&self) -> Option<&str> {
        self.current_pack.as_deref()
    }

    pub fn current_pack(&self) -> Option<&PackDescriptor> {
        self.current_pack
            .as_ref()
            .and_then(|id| self.packs.get(id))
    }

    /// Start a draw request
    pub fn begin_draw(&mut self) -> DrawTicket {
        self.latest_draw += 1;
        DrawTicket(self.latest_draw)
    }

    /// Install a draw result as the new table, unless a newer draw has been
    /// started since. Returns whether the result was applied.
    pub fn apply_draw(&mut self, ticket: DrawTicket, cards: Vec<CardReference>) -> bool {
        if ticket.0 != self.latest_draw {
            log::debug!(
                "Discarding stale draw #{} (latest is #{})",
                ticket.0,
                self.latest_draw
            );
            return false;
        }
        self.table = Some(Table::deal(cards));
        true
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    fn table_mut(&mut self, index: usize) -> ClientResult<&mut Table> {
        self.table.as_mut().ok_or(ClientError::NoCardAt(index))
    }

    pub fn click_card<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut R,
    ) -> ClientResult<CardTransition> {
        self.table_mut(index)?.click(index, rng)
    }

    pub fn click_overlay(&mut self) -> Option<CardTransition> {
        self.table.as_mut().and_then(Table::click_overlay)
    }

    /// Select or deselect a dealt card, keeping the deck in step.
    ///
    /// Returns the new selected flag. The card must have been flipped so
    /// there is a rarity to record.
    pub fn toggle_selection(&mut self, index: usize) -> ClientResult<bool> {
        let presentation = self.table_mut(index)?.get_mut(index)?;
        let rarity = presentation
            .rarity()
            .ok_or(ClientError::CardNotRevealed(index))?;
        let card = presentation.card().clone();
        let selected = presentation.toggle_selected();

        if selected {
            self.deck.add(card, rarity);
        } else if let Some(position) = self.deck.position_of(&card, rarity) {
            self.deck.remove(position);
        }
        Ok(selected)
    }

    /// Remove a deck entry by position (e.g. from the deck view).
    ///
    /// A dealt card showing as selected for that entry is deselected once no
    /// matching entry is left.
    pub fn remove_from_deck(&mut self, position: usize) -> Option<DeckEntry> {
        let removed = self.deck.remove(position)?;
        if !self.deck.contains(&removed.card, removed.rarity) {
            if let Some(table) = self.table.as_mut() {
                for i in 0..table.len() {
                    if let Ok(presentation) = table.get_mut(i) {
                        if presentation.is_selected()
                            && presentation.card() == &removed.card
                            && presentation.rarity() == Some(removed.rarity)
                        {
                            presentation.set_selected(false);
                        }
                    }
                }
            }
        }
        Some(removed)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn clear_deck(&mut self) {
        self.deck.clear();
        if let Some(table) = self.table.as_mut() {
            for i in 0..table.len() {
                if let Ok(presentation) = table.get_mut(i) {
                    presentation.set_selected(false);
                }
            }
        }
    }

    pub fn set_filter(&mut self, filter: RarityFilter) {
        self.current_filter = filter;
    }

    pub fn current_filter(&self) -> RarityFilter {
        self.current_filter
    }

    /// Deck entries under the current filter
    pub fn visible_deck(&self) -> Vec<&DeckEntry> {
        self.deck.filter(self.current_filter)
    }

    pub fn summary(&self) -> DeckSummary {
        self.deck.summarize()
    }
}

fn lock(state: &Mutex<AppState>) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fetch the server's packs into `state`
pub async fn load_packs(state: &Mutex<AppState>, client: &PackClient) -> ClientResult<()> {
    let packs = client.fetch_packs().await?;
    log::info!("Server offers {} pack(s)", packs.len());
    lock(state).set_packs(packs);
    Ok(())
}

/// Draw a new hand from the current pack and put it on the table.
///
/// Returns whether the result was applied; `false` means a newer deal was
/// started while this one was in flight.
pub async fn deal(
    state: &Mutex<AppState>,
    client: &PackClient,
    count: Option<u32>,
) -> ClientResult<bool> {
    let (pack_id, ticket) = {
        let mut state = lock(state);
        let pack_id = state
            .current_pack_id()
            .ok_or(ClientError::NoPackSelected)?
            .to_string();
        (pack_id, state.begin_draw())
    };

    let cards = client.fetch_random_cards(&pack_id, count).await?;
    let dealt = cards.len();

    let applied = lock(state).apply_draw(ticket, cards);
    if applied {
        log::info!("Dealt {} card(s) from '{}'", dealt, pack_id);
    }
    Ok(applied)
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
