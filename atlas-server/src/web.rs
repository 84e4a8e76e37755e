//! REST API
//!
//! Serves one alert session. Every route speaks JSON:
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | GET | `/v1/zones` | | zone set |
//! | PUT | `/v1/zones` | zone set | zone set |
//! | POST | `/v1/classify` | position | alert (session untouched) |
//! | POST | `/v1/location` | position | alert + optional notification |
//! | GET | `/v1/history` | | notified transitions, newest first |
//! | DELETE | `/v1/history` | | 204, session reset |

use anyhow::Context;
use atlas_core::{
    classify, AlertHistoryEntry, AlertResult, AlertSession, AlertUpdate, Coordinates, ZoneError,
    ZoneSet,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use tokio_graceful_shutdown::SubsystemHandle;
use tower_http::cors::CorsLayer;

use crate::notify::Notifier;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidZones(#[from] ZoneError),

    #[error("position ({lat}, {lng}) is not a valid WGS84 coordinate")]
    InvalidPosition { lat: f64, lng: f64 },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::debug!("Rejected request: {}", self);
        let body = serde_json::json!({ "error": self.to_string() });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

fn check_position(point: &Coordinates) -> Result<(), ApiError> {
    if point.is_valid() {
        Ok(())
    } else {
        Err(ApiError::InvalidPosition {
            lat: point.lat,
            lng: point.lng,
        })
    }
}

#[derive(Clone)]
struct AppState {
    zones: Arc<RwLock<ZoneSet>>,
    // Held across classify, gate and history append
    session: Arc<Mutex<AlertSession>>,
    notifier: Arc<dyn Notifier>,
}

pub struct Web {
    port: u16,
    state: AppState,
}

impl Web {
    pub fn new(port: u16, zones: ZoneSet, notifier: Arc<dyn Notifier>) -> Self {
        Web {
            port,
            state: AppState {
                zones: Arc::new(RwLock::new(zones)),
                session: Arc::new(Mutex::new(AlertSession::new())),
                notifier,
            },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/v1/zones", get(get_zones).put(put_zones))
            .route("/v1/classify", post(classify_position))
            .route("/v1/location", post(update_location))
            .route("/v1/history", get(get_history).delete(reset_history))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    pub async fn run(self, subsys: SubsystemHandle) -> anyhow::Result<()> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Unable to listen on {}", addr))?;

        log::info!("Starting HTTP web server on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { subsys.on_shutdown_requested().await })
            .await
            .context("HTTP server failed")?;

        log::info!("HTTP web server stopped");
        Ok(())
    }
}

async fn get_zones(State(state): State<AppState>) -> Json<ZoneSet> {
    Json(state.zones.read().await.clone())
}

async fn put_zones(
    State(state): State<AppState>,
    Json(zones): Json<ZoneSet>,
) -> Result<Json<ZoneSet>, ApiError> {
    zones.validate()?;

    log::info!(
        "Zone set replaced: {} danger, {} safe",
        zones.danger.len(),
        zones.safe.len()
    );
    *state.zones.write().await = zones.clone();
    Ok(Json(zones))
}

async fn classify_position(
    State(state): State<AppState>,
    Json(point): Json<Coordinates>,
) -> Result<Json<AlertResult>, ApiError> {
    check_position(&point)?;

    let zones = state.zones.read().await;
    Ok(Json(classify(&point, &zones.danger, &zones.safe)))
}

async fn update_location(
    State(state): State<AppState>,
    Json(point): Json<Coordinates>,
) -> Result<Json<AlertUpdate>, ApiError> {
    check_position(&point)?;

    let update = {
        let zones = state.zones.read().await;
        let mut session = state.session.lock().await;
        session.observe(&point, &zones)
    };

    if let Some(notification) = &update.notification {
        state.notifier.notify(notification);
    }
    Ok(Json(update))
}

async fn get_history(State(state): State<AppState>) -> Json<Vec<AlertHistoryEntry>> {
    let session = state.session.lock().await;
    Json(session.history().cloned().collect())
}

async fn reset_history(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.reset();
    log::info!("Alert session reset");
    StatusCode::NO_CONTENT
}
