//! HTTP API for the card reveal page
//!
//! JSON endpoints for the pack list and random draws, plus static file
//! serving for card images (`/cards`) and the page itself (everything else).

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use card_common::{CardReference, PackMap};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::draw::{draw, DEFAULT_DRAW_COUNT};
use crate::error::{Result, ServerError};
use crate::registry::{PackRegistry, DEFAULT_PACK_ID};

/// Where the server listens and what it serves
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub port: u16,
    pub cards_dir: PathBuf,
    pub public_dir: PathBuf,
    /// Cards per draw when the request has no `count`
    pub draw_count: u32,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cards_dir: PathBuf::from("cards"),
            public_dir: PathBuf::from("public"),
            draw_count: DEFAULT_DRAW_COUNT,
        }
    }
}

/// Shared application state (pack registry + draw size)
#[derive(Clone)]
struct AppState {
    registry: Arc<PackRegistry>,
    draw_count: u32,
}

/// Draw query parameters
#[derive(Deserialize)]
struct DrawParams {
    count: Option<u32>,
}

/// JSON error body: `{"error": "..."}`
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::NotFound { .. } => (StatusCode::NOT_FOUND, "Pack not found".to_string()),
            ServerError::InvalidDrawRequest { .. } | ServerError::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ServerError::Config(_) | ServerError::Io(_) => {
                log::error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Requested count, or the configured default. A query axum cannot parse
/// becomes a JSON 400 like every other API error.
fn draw_count(
    params: std::result::Result<Query<DrawParams>, QueryRejection>,
    default: u32,
) -> Result<u32> {
    let Query(params) = params.map_err(|e| ServerError::InvalidQuery(e.body_text()))?;
    Ok(params.count.unwrap_or(default))
}

/// Look up a pack and draw from it. Kept synchronous so the thread-local RNG
/// never lives across an await.
fn draw_from(registry: &PackRegistry, pack_id: &str, count: u32) -> Result<Vec<CardReference>> {
    let pack = registry.get(pack_id)?;
    let cards = draw(&pack, count, &mut rand::thread_rng())?;
    log::debug!("Drew {} card(s) from '{}'", cards.len(), pack_id);
    Ok(cards)
}

/// GET /api/packs
async fn packs_handler(State(state): State<AppState>) -> Json<PackMap> {
    Json(state.registry.snapshot().as_ref().clone())
}

/// GET /api/random-cards/{pack_id}?count={count}
async fn random_cards_handler(
    State(state): State<AppState>,
    Path(pack_id): Path<String>,
    params: std::result::Result<Query<DrawParams>, QueryRejection>,
) -> Result<Json<Vec<CardReference>>> {
    let count = draw_count(params, state.draw_count)?;
    draw_from(&state.registry, &pack_id, count).map(Json)
}

/// GET /api/random-cards?count={count}
/// Draws from the default pack
async fn default_random_cards_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<DrawParams>, QueryRejection>,
) -> Result<Json<Vec<CardReference>>> {
    let count = draw_count(params, state.draw_count)?;
    draw_from(&state.registry, DEFAULT_PACK_ID, count).map(Json)
}

/// Build the web server router
pub fn create_router(registry: Arc<PackRegistry>, config: &ServeConfig) -> Router {
    let state = AppState {
        registry,
        draw_count: config.draw_count,
    };

    Router::new()
        .route("/api/packs", get(packs_handler))
        .route("/api/random-cards", get(default_random_cards_handler))
        .route("/api/random-cards/{pack_id}", get(random_cards_handler))
        .nest_service("/cards", ServeDir::new(&config.cards_dir))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the web server (async)
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping.
pub async fn serve(registry: Arc<PackRegistry>, config: ServeConfig) -> Result<()> {
    let app = create_router(registry, &config);
    let addr = format!("0.0.0.0:{}", config.port);

    log::info!("Card reveal server running at http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
