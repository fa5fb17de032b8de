//! Mock places API for client tests

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use revove_core::{ApiClient, ClientConfig};

/// Query strings seen by the mock, one entry per request
#[derive(Default)]
pub struct MockApiState {
    pub requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockApiState {
    fn record(&self, path: &str, params: &[(String, String)]) {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), params.to_vec()));
    }

    /// Params of the most recent request
    pub fn last_params(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, p)| p.clone())
            .unwrap_or_default()
    }

    /// Number of requests served
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

type Params = Query<Vec<(String, String)>>;

fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn place_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": format!("{} Main St", id),
        "city": "Bozeman",
        "rating": 4.5,
        "user_ratings_total": 100,
        "review_count": 3
    })
}

fn catalog() -> Vec<Value> {
    vec![
        place_json(1, "The Rocket Bakery"),
        place_json(2, "Rocky Creek Coffee"),
        place_json(3, "Rocket"),
    ]
}

async fn places(
    State(state): State<Arc<MockApiState>>,
    Query(params): Params,
) -> impl IntoResponse {
    state.record("/places/", &params);

    if let Some(term) = param(&params, "search") {
        return match term {
            "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "database is down").into_response(),
            "weird" => Json(json!({"detail": "not a list"})).into_response(),
            "rocket" => Json(json!([place_json(3, "Rocket"), place_json(1, "The Rocket Bakery")]))
                .into_response(),
            _ => Json(json!([])).into_response(),
        };
    }

    match param(&params, "page") {
        Some("2") => Json(json!({
            "count": 23,
            "next": null,
            "previous": "http://mock/api/places/",
            "results": [place_json(21, "Zed's"), place_json(22, "Zinc"), place_json(23, "Zoo")]
        }))
        .into_response(),
        Some(_) => Json(json!({
            "count": 23,
            "next": "http://mock/api/places/?page=2",
            "previous": null,
            "results": catalog()
        }))
        .into_response(),
        None => Json(json!({ "count": 3, "next": null, "previous": null, "results": catalog() }))
            .into_response(),
    }
}

async fn place_detail(
    State(state): State<Arc<MockApiState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    state.record(&format!("/places/{}/", id), &[]);
    if id != 3 {
        return (StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#).into_response();
    }
    let mut body = place_json(3, "Rocket");
    body["recommendations"] = json!([
        {"id": 9, "text": "Cinnamon roll", "rank": 3, "confidence": 0.4, "source": "reviews"},
        {"id": 7, "text": "Latte", "rank": 1, "confidence": 0.91, "source": "reviews"},
        {"id": 8, "text": "Bagel", "rank": 2, "confidence": null, "source": "reviews"}
    ]);
    Json(body).into_response()
}

async fn search_reviews(
    State(state): State<Arc<MockApiState>>,
    Query(params): Params,
) -> impl IntoResponse {
    state.record("/search/reviews/", &params);
    let q = param(&params, "q").unwrap_or_default().to_string();
    Json(json!([
        {
            "id": 100,
            "place": 3,
            "place_name": "Rocket",
            "google_review_id": "g-100",
            "author_name": "Sam",
            "rating": 5,
            "text": format!("Best {} in town", q),
            "language": "en",
            "created_at": "2024-05-01T12:00:00Z",
            "fetched_at": "2024-05-02T12:00:00Z"
        }
    ]))
}

/// Start the mock API on an ephemeral port
pub async fn start_mock_api() -> (SocketAddr, Arc<MockApiState>) {
    let state = Arc::new(MockApiState::default());

    let app = Router::new()
        .route("/api/places/", get(places))
        .route("/api/places/:id/", get(place_detail))
        .route("/api/search/reviews/", get(search_reviews))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

/// Client pointed at the mock API
pub fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(ClientConfig::new(format!("http://{}/api/", addr))).unwrap()
}
