use crate::error::{ClientError, ClientResult};
use crate::export::ImageFetcher;
use card_common::{CardReference, PackMap};
use serde::Deserialize;

/// Where the server listens by default
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

const USER_AGENT: &str = "card_client/0.1";

/// The server's JSON error body
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turn a failed response into an error, keeping the server's message when
/// the body carries one.
async fn status_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => ClientError::Rejected {
            status,
            message: body.error,
        },
        Err(_) => ClientError::HttpStatus(status),
    }
}

/// Typed client for the pack/draw API and the `/cards` image mount
#[derive(Debug, Clone)]
pub struct PackClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for PackClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl PackClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a card's front image
    pub fn card_url(&self, card: &CardReference) -> String {
        format!("{}/cards/{}", self.base_url, card.as_str().trim_start_matches('/'))
    }

    /// GET /api/packs
    pub async fn fetch_packs(&self) -> ClientResult<PackMap> {
        let url = format!("{}/api/packs", self.base_url);
        log::debug!("Fetching packs: {}", url);

        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET /api/random-cards/{pack_id}, optionally with `?count=`
    pub async fn fetch_random_cards(
        &self,
        pack_id: &str,
        count: Option<u32>,
    ) -> ClientResult<Vec<CardReference>> {
        let mut url = format!(
            "{}/api/random-cards/{}",
            self.base_url,
            urlencoding::encode(pack_id)
        );
        if let Some(count) = count {
            url.push_str(&format!("?count={}", count));
        }
        log::debug!("Drawing cards: {}", url);

        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            reqwest::StatusCode::NOT_FOUND => Err(ClientError::UnknownPack(pack_id.to_string())),
            _ => Err(status_error(response).await),
        }
    }

    /// Fetch the raw bytes of a card image
    pub async fn fetch_card_image(&self, card: &CardReference) -> ClientResult<Vec<u8>> {
        let url = self.card_url(card);
        log::debug!("Fetching image: {}", url);

        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(ClientError::HttpStatus(response.status()))
        }
    }
}

impl ImageFetcher for PackClient {
    async fn fetch_image(&self, card: &CardReference) -> ClientResult<Vec<u8>> {
        self.fetch_card_image(card).await
    }
}

#[cfg(test)]
#[path = "pack_client_tests.rs"]
mod tests;
