//! HTTP surface: HTML demo pages, the optional JSON API and the operational
//! endpoints.

use crate::config::ServerConfig;
use crate::demo::{DemoId, DemoReport, DemoRequest, run_demo};
use crate::error::ApiError;
use crate::health;
use crate::logging::demo_span;
use crate::metrics::METRICS;
use crate::model::demo_validator;
use crate::render;
use crate::validation::{ValidationResult, Validator};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared, read-only request state.
#[derive(Debug)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub validator: Validator,
}

impl AppState {
    pub fn new(config: ServerConfig) -> ValidationResult<Self> {
        Ok(Self::with_validator(config, demo_validator()?))
    }

    pub fn with_validator(config: ServerConfig, validator: Validator) -> Self {
        Self {
            config: Arc::new(config),
            validator,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoSummary {
    pub id: DemoId,
    pub title: String,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(home_handler))
        .route(&state.config.demo_path, get(demo_page_handler))
        .route("/health", get(health::liveness_handler))
        .route("/ready", get(health::readiness_handler))
        .route("/metrics", get(metrics_handler));

    if state.config.json_api {
        router = router
            .route("/api/demos", get(list_demos_handler))
            .route("/api/demos/{demo}", get(run_demo_handler));
    }

    router.with_state(state)
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::render_home(&state.config.demo_path))
}

async fn demo_page_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Html<String> {
    let page = match DemoRequest::resolve(first_param(&params, "demo")) {
        DemoRequest::Missing => {
            debug!("demo page requested without a demo name");
            render::render_prompt()
        }
        DemoRequest::Unknown(name) => {
            info!(demo = %name, "unknown demo requested");
            render::render_unknown(&name)
        }
        DemoRequest::Known(demo) => render::render_report(&run_traced(&state, demo)),
    };
    Html(page)
}

/// First value of a repeated query parameter.
fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

async fn list_demos_handler() -> Json<Vec<DemoSummary>> {
    Json(
        DemoId::all()
            .map(|id| DemoSummary {
                id,
                title: id.title(),
            })
            .collect(),
    )
}

async fn run_demo_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<DemoReport>, ApiError> {
    let demo = DemoId::parse(&name).ok_or_else(|| ApiError::unknown_demo(&name))?;
    Ok(Json(run_traced(&state, demo)))
}

fn run_traced(state: &AppState, demo: DemoId) -> DemoReport {
    demo_span(demo.name()).in_scope(|| run_demo(&state.validator, demo))
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Response {
    match METRICS.encode() {
        Ok(text) => (
            [(
                header::CONTENT_TYPE,
                "application/openmetrics-text; version=1.0.0; charset=utf-8",
            )],
            text,
        )
            .into_response(),
        Err(error) => {
            warn!(%error, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received SIGINT (Ctrl+C), initiating graceful shutdown");
        },
        _ = terminate => {
            info!("received SIGTERM, initiating graceful shutdown");
        },
    }
}
