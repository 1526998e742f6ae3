//! JSON API and static hosting of the web client.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde::Serialize;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::filter::LevelFilter;

use crate::engine::{linear_regression, Point, RegressionError};

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "regline-server", about = "Serves linear regressions over HTTP")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "REGLINE_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,
    /// Directory holding the built web client.
    #[arg(long, env = "REGLINE_STATIC_DIR", default_value = "dist")]
    pub static_dir: PathBuf,
    /// Most verbose level logged: off, error, warn, info, debug or trace.
    #[arg(long, env = "REGLINE_LOG", default_value = "info")]
    pub log_level: LevelFilter,
    /// Also write logs to a timestamped file in this directory.
    #[arg(long, env = "REGLINE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionResponse {
    pub m: f64,
    pub b: f64,
    pub equation: String,
}

#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone, Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Debug)]
pub enum ApiError {
    Regression(RegressionError),
    Body(JsonRejection),
}

impl From<RegressionError> for ApiError {
    fn from(err: RegressionError) -> Self {
        ApiError::Regression(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::Body(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Regression(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

async fn regression(
    payload: Result<Json<Vec<Point>>, JsonRejection>,
) -> Result<Json<RegressionResponse>, ApiError> {
    let Json(points) = payload.map_err(|rejection| {
        warn!("rejected regression body: {}", rejection.body_text());
        rejection
    })?;
    let fit = linear_regression(&points).map_err(|err| {
        warn!("regression over {} points failed: {}", points.len(), err);
        err
    })?;
    Ok(Json(RegressionResponse {
        m: fit.m,
        b: fit.b,
        equation: fit.equation(),
    }))
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// API routes, falling back to files under `static_dir` with its
/// `index.html` as the default page.
pub fn router(static_dir: &Path) -> Router {
    let client = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));
    Router::new()
        .route("/api/regression", post(regression))
        .route("/api/health", get(health))
        .fallback_service(client)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        "listening on {}, serving {:?}",
        listener.local_addr()?,
        config.static_dir
    );
    axum::serve(listener, router(&config.static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("could not listen for ctrl-c: {}", err);
        std::future::pending::<()>().await;
    }
}
