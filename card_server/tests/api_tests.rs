use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use card_server::{create_router, PackRegistry, ServeConfig};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const STANDARD_CONFIG: &str = r#"{
    "standard": {"name":"Standard","totalCards":10,"folder":"standard","cardBack":"back.jpg"}
}"#;

/// Test fixture: a temp dir with a pack config, a card image and a page
struct Fixture {
    dir: TempDir,
    registry: Arc<PackRegistry>,
}

impl Fixture {
    fn new(config: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        std::fs::write(root.join("packs.json"), config).unwrap();
        std::fs::create_dir_all(root.join("cards/standard")).unwrap();
        std::fs::write(root.join("cards/standard/card1.jpg"), [0xFF, 0xD8, 0xFF]).unwrap();
        std::fs::create_dir_all(root.join("public")).unwrap();
        std::fs::write(root.join("public/index.html"), "<html>cards</html>").unwrap();

        let registry = Arc::new(PackRegistry::new(root.join("packs.json")));
        Self { dir, registry }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn router(&self) -> axum::Router {
        let config = ServeConfig {
            port: 0,
            cards_dir: self.root().join("cards"),
            public_dir: self.root().join("public"),
            draw_count: 5,
        };
        create_router(Arc::clone(&self.registry), &config)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }
}

#[tokio::test]
async fn lists_configured_packs() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    let (status, body) = fixture.get("/api/packs").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["standard"]["name"], "Standard");
    assert_eq!(json["standard"]["totalCards"], 10);
    assert_eq!(json["standard"]["folder"], "standard");
    assert_eq!(json["standard"]["cardBack"], "back.jpg");
}

#[tokio::test]
async fn draws_five_distinct_cards_from_pack() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    let (status, body) = fixture.get("/api/random-cards/standard").await;
    assert_eq!(status, StatusCode::OK);

    let cards: Vec<String> = serde_json::from_slice(&body).unwrap();
    assert_eq!(cards.len(), 5);

    let distinct: HashSet<&String> = cards.iter().collect();
    assert_eq!(distinct.len(), 5);

    let valid: HashSet<String> = (1..=10).map(|n| format!("standard/card{}.jpg", n)).collect();
    assert!(cards.iter().all(|c| valid.contains(c)), "{:?}", cards);
}

#[tokio::test]
async fn unknown_pack_is_404_with_error_body() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    let (status, body) = fixture.get("/api/random-cards/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({"error": "Pack not found"}));
}

#[tokio::test]
async fn count_query_overrides_default() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    let (status, body) = fixture.get("/api/random-cards/standard?count=10").await;
    assert_eq!(status, StatusCode::OK);
    let cards: Vec<String> = serde_json::from_slice(&body).unwrap();
    assert_eq!(cards.len(), 10);
}

#[tokio::test]
async fn oversized_count_is_400() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    let (status, body) = fixture.get("/api/random-cards/standard?count=11").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("11"));
}

#[tokio::test]
async fn unparseable_count_is_400_with_json_error() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    for uri in [
        "/api/random-cards/standard?count=abc",
        "/api/random-cards/standard?count=-1",
        "/api/random-cards?count=abc",
    ] {
        let (status, body) = fixture.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("count"), "{}: {}", uri, message);
    }
}

#[tokio::test]
async fn zero_count_is_400() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    let (status, body) = fixture.get("/api/random-cards/standard?count=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn default_route_uses_builtin_pack_when_config_is_broken() {
    let fixture = Fixture::new("not json at all");

    let (status, body) = fixture.get("/api/random-cards").await;
    assert_eq!(status, StatusCode::OK);

    let cards: Vec<String> = serde_json::from_slice(&body).unwrap();
    assert_eq!(cards.len(), 5);
    assert!(cards
        .iter()
        .all(|c| c.starts_with("card") && c.ends_with(".jpg")));
}

#[tokio::test]
async fn default_route_404_when_config_has_no_default_pack() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    let (status, _) = fixture.get("/api/random-cards").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serves_card_images_and_page() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    let (status, body) = fixture.get("/cards/standard/card1.jpg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, vec![0xFF, 0xD8, 0xFF]);

    let (status, body) = fixture.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "<html>cards</html>");
}

#[tokio::test]
async fn reload_is_visible_to_new_requests() {
    let fixture = Fixture::new(STANDARD_CONFIG);

    std::fs::write(
        fixture.root().join("packs.json"),
        r#"{"promo":{"name":"Promo","totalCards":6,"folder":"promo","cardBack":"p.jpg"}}"#,
    )
    .unwrap();
    fixture.registry.reload();

    let (status, _) = fixture.get("/api/random-cards/standard").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = fixture.get("/api/random-cards/promo").await;
    assert_eq!(status, StatusCode::OK);
    let cards: Vec<String> = serde_json::from_slice(&body).unwrap();
    assert!(cards.iter().all(|c| c.starts_with("promo/card")));
}
