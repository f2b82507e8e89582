//! Random card draws
//!
//! Samples distinct card numbers from a pack by reject-and-retry: pick a
//! number in `[1, total_cards]`, throw it away if it was already picked, and
//! repeat until enough distinct numbers are collected. The expected number of
//! retries climbs steeply as `count` approaches `total_cards`; a draw of 5
//! from a pack of 40 or so almost never retries.

use crate::error::{Result, ServerError};
use card_common::{CardReference, PackDescriptor};
use rand::Rng;

/// Cards per draw when the request does not say
pub const DEFAULT_DRAW_COUNT: u32 = 5;

/// Draw `count` distinct card references from `pack`.
///
/// Fails with `InvalidDrawRequest` before sampling when `count` is zero or
/// exceeds the pack size.
pub fn draw<R: Rng + ?Sized>(
    pack: &PackDescriptor,
    count: u32,
    rng: &mut R,
) -> Result<Vec<CardReference>> {
    if count == 0 || count > pack.total_cards {
        return Err(ServerError::InvalidDrawRequest {
            requested: count,
            available: pack.total_cards,
        });
    }

    let mut selected: Vec<u32> = Vec::with_capacity(count as usize);
    let mut retries = 0u64;
    while selected.len() < count as usize {
        let candidate = rng.gen_range(1..=pack.total_cards);
        if selected.contains(&candidate) {
            retries += 1;
            continue;
        }
        selected.push(candidate);
    }

    if retries > 0 {
        log::trace!(
            "Drew {} of {} from '{}' with {} retries",
            count,
            pack.total_cards,
            pack.name,
            retries
        );
    }

    Ok(selected
        .into_iter()
        .map(|n| CardReference::for_pack(&pack.folder, n))
        .collect())
}

#[cfg(test)]
#[path = "draw_tests.rs"]
mod tests;
