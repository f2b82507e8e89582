//! Tests for deck export

use super::*;
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::io::Read;
use tempfile::TempDir;

/// In-memory image store; references it does not know fail to fetch
struct FakeImages {
    images: HashMap<String, Vec<u8>>,
}

impl FakeImages {
    fn with(entries: Vec<(&str, Vec<u8>)>) -> Self {
        Self {
            images: entries
                .into_iter()
                .map(|(name, bytes)| (name.to_string(), bytes))
                .collect(),
        }
    }
}

impl ImageFetcher for FakeImages {
    async fn fetch_image(&self, card: &CardReference) -> ClientResult<Vec<u8>> {
        self.images
            .get(card.as_str())
            .cloned()
            .ok_or_else(|| ClientError::FetchFailure {
                reference: card.to_string(),
                reason: "not found".to_string(),
            })
    }
}

/// Unpack an archive into (name, bytes) pairs, in archive order
fn unpack(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().to_string();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            (name, data)
        })
        .collect()
}

fn entry(reference: &str, rarity: Rarity) -> DeckEntry {
    DeckEntry {
        card: CardReference::new(reference),
        rarity,
    }
}

#[test]
fn file_names_carry_position_rarity_and_extension() {
    assert_eq!(
        export_file_name(1, &entry("standard/card4.jpg", Rarity::Epic)),
        "card_1_epic.jpg"
    );
    assert_eq!(
        export_file_name(3, &entry("promo/card2.png", Rarity::Legendary)),
        "card_3_legendary.png"
    );
    assert_eq!(
        export_file_name(2, &entry("loose/card9", Rarity::Common)),
        "card_2_common.jpg"
    );
}

#[tokio::test]
async fn empty_deck_is_rejected() {
    let fetcher = FakeImages::with(vec![]);
    let result = export_deck(&Deck::new(), &fetcher).await;
    assert!(matches!(result, Err(ClientError::EmptyDeck)));
}

#[tokio::test]
async fn exports_manifest_then_images() {
    let mut deck = Deck::new();
    deck.add(CardReference::new("standard/card4.jpg"), Rarity::Rare);
    deck.add(CardReference::new("standard/card9.jpg"), Rarity::Common);
    let fetcher = FakeImages::with(vec![
        ("standard/card4.jpg", vec![1, 2, 3]),
        ("standard/card9.jpg", vec![4, 5]),
    ]);

    let archive = export_deck(&deck, &fetcher).await.unwrap();
    assert_eq!(archive.image_count(), 2);
    assert!(archive.manifest.skipped.is_empty());

    let files = unpack(&archive.bytes);
    let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![MANIFEST_FILE, "card_1_rare.jpg", "card_2_common.jpg"]
    );
    assert_eq!(files[1].1, vec![1, 2, 3]);
    assert_eq!(files[2].1, vec![4, 5]);

    let manifest: ExportManifest = serde_json::from_slice(&files[0].1).unwrap();
    assert_eq!(manifest, archive.manifest);
    assert_eq!(manifest.cards[0].file, "card_1_rare.jpg");
    assert_eq!(manifest.cards[0].original.as_str(), "standard/card4.jpg");
    assert_eq!(manifest.cards[1].rarity, Rarity::Common);
}

#[tokio::test]
async fn failed_fetch_leaves_only_manifest() {
    let mut deck = Deck::new();
    deck.add(CardReference::new("standard/card1.jpg"), Rarity::Legendary);
    let fetcher = FakeImages::with(vec![]);

    let archive = export_deck(&deck, &fetcher).await.unwrap();
    assert_eq!(archive.image_count(), 0);
    assert_eq!(archive.manifest.skipped.len(), 1);
    assert_eq!(archive.manifest.skipped[0].position, 1);

    let files = unpack(&archive.bytes);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, MANIFEST_FILE);
}

#[tokio::test]
async fn partial_failure_keeps_positions() {
    let mut deck = Deck::new();
    deck.add(CardReference::new("standard/card1.jpg"), Rarity::Common);
    deck.add(CardReference::new("standard/card2.jpg"), Rarity::Epic);
    deck.add(CardReference::new("standard/card3.jpg"), Rarity::Rare);
    let fetcher = FakeImages::with(vec![
        ("standard/card1.jpg", vec![1]),
        ("standard/card3.jpg", vec![3]),
    ]);

    let archive = export_deck(&deck, &fetcher).await.unwrap();
    let files: Vec<String> = unpack(&archive.bytes).into_iter().map(|(n, _)| n).collect();
    assert_eq!(
        files,
        vec![MANIFEST_FILE, "card_1_common.jpg", "card_3_rare.jpg"]
    );
    assert_eq!(archive.manifest.skipped[0].position, 2);
    assert_eq!(
        archive.manifest.skipped[0].original.as_str(),
        "standard/card2.jpg"
    );
}

#[tokio::test]
async fn write_to_creates_parent_dirs() {
    let mut deck = Deck::new();
    deck.add(CardReference::new("standard/card1.jpg"), Rarity::Common);
    let fetcher = FakeImages::with(vec![("standard/card1.jpg", vec![9])]);
    let archive = export_deck(&deck, &fetcher).await.unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exports").join("deck.tar.gz");
    archive.write_to(&path).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, archive.bytes);
}

#[test]
fn default_export_path_is_timestamped_tarball() {
    let path = default_export_path();
    let name = path.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("deck_"));
    assert!(name.ends_with(".tar.gz"));
}
