//! Deck export
//!
//! Packs the deck into one gzip-compressed tar: `manifest.json` first, then
//! one image per deck entry named `card_{position}_{rarity}.{ext}`. Images
//! that cannot be fetched are logged, listed under `skipped` in the manifest
//! and left out; the export still succeeds with whatever was fetched.

use crate::deck::{Deck, DeckEntry};
use crate::error::{ClientError, ClientResult};
use card_common::{CardReference, Rarity};
use chrono::{DateTime, Local, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Source of card image bytes
pub trait ImageFetcher {
    fn fetch_image(
        &self,
        card: &CardReference,
    ) -> impl Future<Output = ClientResult<Vec<u8>>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Name of the image inside the archive
    pub file: String,
    pub rarity: Rarity,
    pub original: CardReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntry {
    /// 1-based deck position
    pub position: usize,
    pub original: CardReference,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportManifest {
    pub exported_at: DateTime<Utc>,
    pub cards: Vec<ManifestEntry>,
    pub skipped: Vec<SkippedEntry>,
}

/// A finished export
#[derive(Debug, Clone)]
pub struct DeckArchive {
    pub bytes: Vec<u8>,
    pub manifest: ExportManifest,
}

impl DeckArchive {
    pub fn image_count(&self) -> usize {
        self.manifest.cards.len()
    }

    pub fn write_to(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, &self.bytes)?;
        log::info!(
            "Wrote deck archive ({} image(s), {} bytes) to {}",
            self.image_count(),
            self.bytes.len(),
            path.display()
        );
        Ok(())
    }
}

/// Archive name for the entry at 1-based `position`
pub fn export_file_name(position: usize, entry: &DeckEntry) -> String {
    let ext = entry.card.extension().unwrap_or("jpg");
    format!("card_{}_{}.{}", position, entry.rarity, ext)
}

/// `deck_{timestamp}.tar.gz` in the user's download directory
pub fn default_export_path() -> PathBuf {
    let dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!(
        "deck_{}.tar.gz",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Export the deck. Fails only when the deck is empty or the archive itself
/// cannot be written; per-image fetch failures are skipped.
pub async fn export_deck<F: ImageFetcher>(deck: &Deck, fetcher: &F) -> ClientResult<DeckArchive> {
    if deck.is_empty() {
        return Err(ClientError::EmptyDeck);
    }

    let mut cards = Vec::with_capacity(deck.len());
    let mut skipped = Vec::new();
    let mut images = Vec::with_capacity(deck.len());

    for (i, entry) in deck.entries().iter().enumerate() {
        let position = i + 1;
        match fetcher.fetch_image(&entry.card).await {
            Ok(bytes) => {
                let file = export_file_name(position, entry);
                cards.push(ManifestEntry {
                    file: file.clone(),
                    rarity: entry.rarity,
                    original: entry.card.clone(),
                });
                images.push((file, bytes));
            }
            Err(e) => {
                let failure = ClientError::FetchFailure {
                    reference: entry.card.to_string(),
                    reason: e.to_string(),
                };
                log::warn!("Skipping card {} in export: {}", position, failure);
                skipped.push(SkippedEntry {
                    position,
                    original: entry.card.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let manifest = ExportManifest {
        exported_at: Utc::now(),
        cards,
        skipped,
    };
    let bytes = build_archive(&manifest, &images)?;

    log::info!(
        "Exported {} of {} card(s)",
        manifest.cards.len(),
        deck.len()
    );
    Ok(DeckArchive { bytes, manifest })
}

fn append_file<W: std::io::Write>(
    builder: &mut tar::Builder<W>,
    name: &str,
    data: &[u8],
    mtime: u64,
) -> std::io::Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(mtime);
    header.set_cksum();
    builder.append_data(&mut header, name, data)
}

fn build_archive(manifest: &ExportManifest, images: &[(String, Vec<u8>)]) -> ClientResult<Vec<u8>> {
    let manifest_json = serde_json::to_vec_pretty(manifest)?;
    let mtime = manifest.exported_at.timestamp().max(0) as u64;

    let mut bytes = Vec::new();
    {
        let encoder = GzEncoder::new(&mut bytes, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        append_file(&mut builder, MANIFEST_FILE, &manifest_json, mtime)
            .map_err(ClientError::Archive)?;
        for (name, data) in images {
            append_file(&mut builder, name, data, mtime).map_err(ClientError::Archive)?;
        }

        builder
            .into_inner()
            .and_then(|encoder| encoder.finish())
            .map_err(ClientError::Archive)?;
    }

    Ok(bytes)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
