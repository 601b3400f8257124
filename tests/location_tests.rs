//! Geocode cache behavior of `/location`.

use axum::{
    Json, Router,
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
};
use city_explorer::api::AppState;
use city_explorer::config::Config;
use city_explorer::constants::messages::LOCATION_FAILURE;
use city_explorer::models::Location;
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Statement};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Clone, Default)]
struct Geocoder {
    hits: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<(String, String)>>>,
}

impl Geocoder {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn router(&self, response: Value) -> Router {
        let recorder = self.clone();
        Router::new().route(
            "/maps/api/geocode/json",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let recorder = recorder.clone();
                let response = response.clone();
                async move {
                    recorder.hits.fetch_add(1, Ordering::SeqCst);
                    recorder.queries.lock().unwrap().push((
                        params.get("address").cloned().unwrap_or_default(),
                        params.get("key").cloned().unwrap_or_default(),
                    ));
                    Json(response)
                }
            }),
        )
    }
}

fn boston_response() -> Value {
    json!({
        "results": [
            {
                "formatted_address": "Boston, MA, USA",
                "geometry": { "location": { "lat": 42.360_082_5, "lng": -71.058_880_1 } }
            },
            {
                "formatted_address": "Boston, Lincolnshire, UK",
                "geometry": { "location": { "lat": 52.976_9, "lng": -0.026_6 } }
            }
        ],
        "status": "OK"
    })
}

async fn serve_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_app(geocode_base_url: String) -> (Arc<AppState>, Router) {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();
    config.upstream.use_system_proxy = false;
    config.upstream.request_timeout_seconds = 5;
    config.geocode.base_url = geocode_base_url;
    config.geocode.api_key = "geo-key".to_string();

    let state = city_explorer::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    let router = city_explorer::api::router(state.clone());
    (state, router)
}

async fn get_location(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_miss_fetches_once_and_persists_first_result() {
    let geocoder = Geocoder::default();
    let base_url = serve_upstream(geocoder.router(boston_response())).await;
    let (state, app) = spawn_app(base_url).await;

    let (status, body) = get_location(&app, "/location?data=Boston").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        json!({
            "search_query": "Boston",
            "formatted_query": "Boston, MA, USA",
            "latitude": 42.360_082_5,
            "longitude": -71.058_880_1
        })
    );

    assert_eq!(geocoder.hits(), 1);
    assert_eq!(
        geocoder.queries.lock().unwrap().as_slice(),
        [("Boston".to_string(), "geo-key".to_string())]
    );
    assert_eq!(state.store().location_count("Boston").await.unwrap(), 1);

    let stored = state.store().find_location("Boston").await.unwrap().unwrap();
    assert_eq!(stored.formatted_query, "Boston, MA, USA");
}

#[tokio::test]
async fn test_second_lookup_is_served_from_cache() {
    let geocoder = Geocoder::default();
    let base_url = serve_upstream(geocoder.router(boston_response())).await;
    let (state, app) = spawn_app(base_url).await;

    let (_, first) = get_location(&app, "/location?data=Boston").await;
    let (status, second) = get_location(&app, "/location?data=Boston").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&first).unwrap(),
        serde_json::from_str::<Value>(&second).unwrap()
    );
    assert_eq!(geocoder.hits(), 1);
    assert_eq!(state.store().location_count("Boston").await.unwrap(), 1);
}

#[tokio::test]
async fn test_cached_row_is_returned_without_upstream_call() {
    let geocoder = Geocoder::default();
    let base_url = serve_upstream(geocoder.router(boston_response())).await;
    let (state, app) = spawn_app(base_url).await;

    let cached = Location {
        search_query: "Seattle".to_string(),
        formatted_query: "Seattle, WA, USA".to_string(),
        latitude: 47.606_209_5,
        longitude: -122.332_070_8,
    };
    state.store().add_location(&cached).await.unwrap();

    let (status, body) = get_location(&app, "/location?data=Seattle").await;

    assert_eq!(status, StatusCode::OK);
    let body: Location = serde_json::from_str(&body).unwrap();
    assert_eq!(body, cached);
    assert_eq!(geocoder.hits(), 0);
}

#[tokio::test]
async fn test_cache_key_is_the_exact_search_string() {
    let geocoder = Geocoder::default();
    let base_url = serve_upstream(geocoder.router(boston_response())).await;
    let (state, app) = spawn_app(base_url).await;

    get_location(&app, "/location?data=Boston").await;
    get_location(&app, "/location?data=boston").await;
    get_location(&app, "/location?data=Boston%20").await;

    assert_eq!(geocoder.hits(), 3);
    assert_eq!(state.store().location_count("Boston").await.unwrap(), 1);
    assert_eq!(state.store().location_count("boston").await.unwrap(), 1);
    assert_eq!(state.store().location_count("Boston ").await.unwrap(), 1);
}

#[tokio::test]
async fn test_failed_cache_write_still_returns_location() {
    let geocoder = Geocoder::default();
    let base_url = serve_upstream(geocoder.router(boston_response())).await;
    let (state, app) = spawn_app(base_url).await;

    let conn = &state.store().conn;
    conn.execute(Statement::from_string(
        conn.get_database_backend(),
        "CREATE TRIGGER block_location_insert BEFORE INSERT ON locations \
         BEGIN SELECT RAISE(ABORT, 'locations are read-only'); END;"
            .to_string(),
    ))
    .await
    .unwrap();

    let (status, body) = get_location(&app, "/location?data=Boston").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        json!({
            "search_query": "Boston",
            "formatted_query": "Boston, MA, USA",
            "latitude": 42.360_082_5,
            "longitude": -71.058_880_1
        })
    );
    assert_eq!(geocoder.hits(), 1);
    assert_eq!(state.store().location_count("Boston").await.unwrap(), 0);
}

#[tokio::test]
async fn test_no_results_is_500_and_nothing_cached() {
    let geocoder = Geocoder::default();
    let base_url = serve_upstream(
        geocoder.router(json!({ "results": [], "status": "ZERO_RESULTS" })),
    )
    .await;
    let (state, app) = spawn_app(base_url).await;

    let (status, body) = get_location(&app, "/location?data=Nowhere").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, LOCATION_FAILURE);
    assert_eq!(state.store().location_count("Nowhere").await.unwrap(), 0);
}

#[tokio::test]
async fn test_upstream_error_status_is_500() {
    let base_url = serve_upstream(Router::new().fallback(|| async {
        (StatusCode::FORBIDDEN, "The provided API key is invalid.")
    }))
    .await;
    let (state, app) = spawn_app(base_url).await;

    let (status, body) = get_location(&app, "/location?data=Boston").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, LOCATION_FAILURE);
    assert_eq!(state.store().location_count("Boston").await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_search_text_is_500() {
    let geocoder = Geocoder::default();
    let base_url = serve_upstream(geocoder.router(boston_response())).await;
    let (_, app) = spawn_app(base_url).await;

    let (status, body) = get_location(&app, "/location").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, LOCATION_FAILURE);
    assert_eq!(geocoder.hits(), 0);
}
