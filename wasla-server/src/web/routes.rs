//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::nearest::{NearestRequest, ValidationError, find_nearest};

use super::dto::*;
use super::error::AppError;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/stations/nearest",
            get(nearest_from_query).post(nearest_from_body),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Nearest stations for `?lat=..&lng=..&limit=..`.
async fn nearest_from_query(
    State(state): State<AppState>,
    query: Result<Query<NearestQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<NearestData>>, AppError> {
    let Query(query) = query.map_err(|e| ValidationError::Body(e.body_text()))?;

    let request = NearestRequest::from_query(
        query.lat.as_deref(),
        query.lng.as_deref(),
        query.limit.as_deref(),
        &state.config,
    )?;

    respond(&state, request).await
}

/// Nearest stations for a `{ latitude, longitude, limit? }` body.
async fn nearest_from_body(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<NearestData>>, AppError> {
    // Parse JSON manually so a bad body maps onto our own error codes
    let body: NearestBody = if body.iter().all(u8::is_ascii_whitespace) {
        NearestBody::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!(body = %String::from_utf8_lossy(&body), "rejected request body");
            ValidationError::Body(e.to_string())
        })?
    };

    let request =
        NearestRequest::from_parts(body.latitude, body.longitude, body.limit, &state.config)?;

    respond(&state, request).await
}

async fn respond(
    state: &AppState,
    request: NearestRequest,
) -> Result<Json<ApiResponse<NearestData>>, AppError> {
    let nearest = find_nearest(&request, state.directory.as_ref()).await?;

    tracing::info!(
        caller = %nearest.caller,
        limit = request.limit,
        returned = nearest.stations.len(),
        total_found = nearest.total_found,
        "nearest stations"
    );

    let message = format!("Found {} nearest stations", nearest.stations.len());
    Ok(Json(ApiResponse::ok(NearestData::from_nearest(&nearest), message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{CentralServerClient, CentralServerConfig, InMemoryDirectory};
    use crate::domain::{GeoCoordinate, StationRecord};
    use crate::nearest::NearestConfig;
    use reqwest::StatusCode;
    use serde_json::{Value, json};

    fn station(id: &str, name: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord::new(id, name, GeoCoordinate::new(lat, lon).ok())
    }

    fn tunisian_stations() -> Vec<StationRecord> {
        vec![
            station("st-sfax", "Sfax", 34.7406, 10.7603),
            station("st-monastir", "Monastir", 35.7617, 10.8276),
            station("st-sousse", "Sousse", 35.8256, 10.6084),
            station("st-nabeul", "Nabeul", 36.4561, 10.7376),
            station("st-bizerte", "Bizerte", 37.2744, 9.8739),
            station("st-gabes", "Gabes", 33.8815, 10.0982),
            station("st-kairouan", "Kairouan", 35.6781, 10.0963),
        ]
    }

    async fn serve(directory: InMemoryDirectory) -> String {
        serve_state(AppState::new(directory, NearestConfig::default())).await
    }

    async fn serve_state(state: AppState) -> String {
        let app = create_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn get_json(url: &str) -> (StatusCode, Value) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn post_json(url: &str, body: &str) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(url)
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let base = serve(InMemoryDirectory::new(Vec::new())).await;
        let body = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn query_returns_monastir_before_sfax() {
        let directory = InMemoryDirectory::new(vec![
            station("st-sfax", "Sfax", 34.7406, 10.7603),
            station("st-monastir", "Monastir", 35.7617, 10.8276),
        ]);
        let base = serve(directory).await;

        let (status, body) = get_json(&format!(
            "{base}/api/v1/stations/nearest?lat=36.8065&lng=10.1815&limit=1"
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["totalFound"], json!(2));
        assert_eq!(
            body["data"]["userLocation"],
            json!({"latitude": 36.8065, "longitude": 10.1815})
        );
        let stations = body["data"]["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0]["name"], json!("Monastir"));
        assert_eq!(stations[0]["rank"], json!(0));
        assert_eq!(body["message"], json!("Found 1 nearest stations"));
    }

    #[tokio::test]
    async fn body_without_limit_returns_five() {
        let base = serve(InMemoryDirectory::new(tunisian_stations())).await;

        let (status, body) = post_json(
            &format!("{base}/api/v1/stations/nearest"),
            r#"{"latitude": 36.8065, "longitude": 10.1815}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let stations = body["data"]["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 5);
        assert_eq!(stations[0]["id"], json!("st-bizerte"));
        assert_eq!(body["data"]["totalFound"], json!(7));

        let distances: Vec<f64> = stations
            .iter()
            .map(|s| s["distanceKm"].as_f64().unwrap())
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn query_and_body_agree() {
        let base = serve(InMemoryDirectory::new(tunisian_stations())).await;

        let (_, from_query) = get_json(&format!(
            "{base}/api/v1/stations/nearest?lat=35.5&lng=10.5&limit=3"
        ))
        .await;
        let (_, from_body) = post_json(
            &format!("{base}/api/v1/stations/nearest"),
            r#"{"latitude": 35.5, "longitude": 10.5, "limit": 3}"#,
        )
        .await;

        assert_eq!(from_query, from_body);
    }

    #[tokio::test]
    async fn out_of_range_never_reaches_directory() {
        let directory = InMemoryDirectory::new(tunisian_stations());
        let base = serve(directory.clone()).await;

        let (status, body) =
            get_json(&format!("{base}/api/v1/stations/nearest?lat=91&lng=10")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["code"], json!("INVALID_COORDINATES"));

        let (status, body) = post_json(
            &format!("{base}/api/v1/stations/nearest"),
            r#"{"latitude": 91, "longitude": 10}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_COORDINATES"));
        assert_eq!(directory.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_coordinates() {
        let directory = InMemoryDirectory::new(tunisian_stations());
        let base = serve(directory.clone()).await;

        let (status, body) = get_json(&format!("{base}/api/v1/stations/nearest?lat=36.8")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("MISSING_COORDINATES"));
        assert_eq!(body["message"], json!("coordinates required"));

        let (status, body) = post_json(&format!("{base}/api/v1/stations/nearest"), "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("MISSING_COORDINATES"));

        assert_eq!(directory.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_input_is_invalid() {
        let base = serve(InMemoryDirectory::new(tunisian_stations())).await;

        let (status, body) =
            get_json(&format!("{base}/api/v1/stations/nearest?lat=abc&lng=10")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_COORDINATES"));

        let (status, body) =
            post_json(&format!("{base}/api/v1/stations/nearest"), "{ latitude: ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_COORDINATES"));
    }

    #[tokio::test]
    async fn no_eligible_stations_is_404() {
        let mut offline = station("st-1", "Offline", 36.8, 10.2);
        offline.is_online = false;
        let base = serve(InMemoryDirectory::new(vec![offline])).await;

        let (status, body) =
            get_json(&format!("{base}/api/v1/stations/nearest?lat=36.8&lng=10.2")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], json!("NO_STATIONS_AVAILABLE"));
        assert_eq!(body["message"], json!("no active stations with coordinates"));
    }

    #[tokio::test]
    async fn directory_failure_is_500() {
        let base = serve(InMemoryDirectory::failing("Database offline")).await;

        let (status, body) =
            get_json(&format!("{base}/api/v1/stations/nearest?lat=36.8&lng=10.2")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["code"], json!("STATIONS_FETCH_FAILED"));
        assert!(body["message"].as_str().unwrap().contains("Database offline"));
    }

    #[tokio::test]
    async fn undecodable_query_is_invalid() {
        let directory = InMemoryDirectory::new(tunisian_stations());
        let base = serve(directory.clone()).await;

        let response = reqwest::get(format!(
            "{base}/api/v1/stations/nearest?lat=36.8&lat=37&lng=10"
        ))
        .await
        .unwrap();
        let status = response.status();
        let body: Value = response.json().await.unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["code"], json!("INVALID_COORDINATES"));
        assert_eq!(directory.call_count(), 0);
    }

    #[tokio::test]
    async fn unreachable_central_server_is_server_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CentralServerClient::new(CentralServerConfig::new(format!("http://{addr}")))
            .unwrap();
        let base = serve_state(AppState::new(client, NearestConfig::default())).await;

        let (status, body) =
            get_json(&format!("{base}/api/v1/stations/nearest?lat=36.8&lng=10.2")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["code"], json!("SERVER_ERROR"));
    }
}
