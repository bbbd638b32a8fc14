use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod auth;
mod climate;
mod config;
mod data_sync;
mod disasters;
mod environmental;
mod error;
mod params;
mod store;

use config::ServerConfig;
use error::method_not_allowed;
use store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<ServerConfig>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    let store = match &config.data_file {
        Some(path) => match Store::open(path.clone()).await {
            Ok(store) => store,
            Err(err) => {
                error!("failed to open data file: {err}");
                std::process::exit(1);
            }
        },
        None => {
            warn!("CLIMATE_DATA_FILE not set; tables live in memory only");
            Store::in_memory()
        }
    };

    let addr = config.addr;
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config),
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!(
        auth = state.config.require_auth,
        "climate api listening on http://{addr}/functions/v1"
    );
    if let Err(err) = axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {err}");
    }
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    let functions = Router::new()
        .route(
            "/climate-data",
            get(climate::list)
                .post(climate::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/disasters",
            get(disasters::list)
                .post(disasters::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/environmental-data",
            get(environmental::list)
                .post(environmental::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/data-sync",
            get(data_sync::status)
                .post(data_sync::run)
                .fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/functions/v1", functions)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        return;
    }
    info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn test_state() -> AppState {
        AppState {
            store: Arc::new(Store::in_memory()),
            config: Arc::new(ServerConfig::default()),
        }
    }

    fn authed_state() -> AppState {
        AppState {
            config: Arc::new(ServerConfig {
                require_auth: true,
                ..ServerConfig::default()
            }),
            ..test_state()
        }
    }

    /// Serves `state` on an ephemeral port and returns its base URL.
    async fn spawn(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn missing_bearer_is_401_when_required() {
        let base = spawn(authed_state()).await;
        let resp = reqwest::get(format!("{base}/functions/v1/climate-data"))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 401);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Missing bearer token");
    }

    #[tokio::test]
    async fn bearer_unlocks_routes_and_healthz_is_open() {
        let base = spawn(authed_state()).await;
        let client = reqwest::Client::new();
        let resp = client
            .get(format!("{base}/functions/v1/data-sync"))
            .bearer_auth("anon")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "API is running");

        let health = client.get(format!("{base}/healthz")).send().await.unwrap();
        assert_eq!(health.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn unsupported_method_is_405_json() {
        let base = spawn(test_state()).await;
        let resp = reqwest::Client::new()
            .delete(format!("{base}/functions/v1/disasters"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 405);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn preflight_allows_any_origin() {
        let base = spawn(test_state()).await;
        let resp = reqwest::Client::new()
            .request(
                reqwest::Method::OPTIONS,
                format!("{base}/functions/v1/climate-data"),
            )
            .header("Origin", "http://localhost:5173")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn post_then_get_round_trip() {
        let base = spawn(test_state()).await;
        let client = reqwest::Client::new();
        let resp = client
            .post(format!("{base}/functions/v1/environmental-data"))
            .json(&serde_json::json!({
                "location": "Karachi",
                "lat": 24.8607,
                "lng": 67.0011,
                "air_quality": 164,
                "co2_level": 447,
                "pollution_index": 6.8
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);

        let rows: Vec<records::EnvironmentalRecord> = client
            .get(format!("{base}/functions/v1/environmental-data?min_aqi=150"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location, "Karachi");
    }

    #[tokio::test]
    async fn post_without_content_type_is_accepted() {
        let state = test_state();
        let base = spawn(state.clone()).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/functions/v1/disasters"))
            .body(
                r#"{"type":"Flood","location":"Dhaka","lat":23.81,"lng":90.41,"severity":"High","description":null}"#,
            )
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);
        let row: records::DisasterRecord = resp.json().await.unwrap();
        assert_eq!(row.location, "Dhaka");
        assert_eq!(row.description, "");
        assert_eq!(state.store.summary().disaster_records, 1);
    }
}
