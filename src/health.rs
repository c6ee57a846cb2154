use crate::model::{Person, VALIDATION_ORDER};
use crate::server::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Health status for a component or the overall system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, but some component misbehaves
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns the worse of the two statuses
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => HealthStatus::Unhealthy,
            (HealthStatus::Degraded, _) | (_, HealthStatus::Degraded) => HealthStatus::Degraded,
            _ => HealthStatus::Healthy,
        }
    }
}

/// Health check result for a component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            error: None,
        }
    }

    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            error: Some(error.into()),
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            error: Some(error.into()),
        }
    }
}

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Unix seconds
    pub timestamp: i64,
    pub version: String,
}

impl HealthResponse {
    pub fn alive() -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let status = self.status.status_code();
        (status, Json(self)).into_response()
    }
}

/// Readiness response with per-component detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub status: HealthStatus,
    pub timestamp: i64,
    pub components: BTreeMap<String, ComponentHealth>,
}

impl IntoResponse for ReadinessResponse {
    fn into_response(self) -> Response {
        let status = if self.ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self)).into_response()
    }
}

/// Checks the shared validator before the server takes traffic.
pub fn readiness(state: &AppState) -> ReadinessResponse {
    let mut components = BTreeMap::new();
    components.insert("group_sequences".to_string(), check_group_sequences(state));
    components.insert("type_rules".to_string(), check_type_rules(state));

    let status = components
        .values()
        .fold(HealthStatus::Healthy, |overall, health| {
            overall.combine(health.status)
        });

    ReadinessResponse {
        ready: status != HealthStatus::Unhealthy,
        status,
        timestamp: now(),
        components,
    }
}

fn check_group_sequences(state: &AppState) -> ComponentHealth {
    match state.validator.group_sequence(VALIDATION_ORDER) {
        Some(sequence) if !sequence.members().is_empty() => ComponentHealth::healthy(),
        Some(_) => ComponentHealth::degraded(format!("sequence {VALIDATION_ORDER} is empty")),
        None => ComponentHealth::unhealthy(format!("sequence {VALIDATION_ORDER} not registered")),
    }
}

fn check_type_rules(state: &AppState) -> ComponentHealth {
    match state.validator.validate(&Person::named("SampleName"), &[]) {
        Ok(violations) if violations.is_empty() => ComponentHealth::healthy(),
        Ok(violations) => ComponentHealth::degraded(format!(
            "reference record reported {} violation(s)",
            violations.len()
        )),
        Err(error) => ComponentHealth::unhealthy(error.to_string()),
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Axum handler for liveness endpoint
pub async fn liveness_handler() -> impl IntoResponse {
    HealthResponse::alive()
}

/// Axum handler for readiness endpoint
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    readiness(&state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::validation::Validator;

    #[test]
    fn health_status_combine() {
        assert_eq!(
            HealthStatus::Healthy.combine(HealthStatus::Healthy),
            HealthStatus::Healthy
        );
        assert_eq!(
            HealthStatus::Healthy.combine(HealthStatus::Degraded),
            HealthStatus::Degraded
        );
        assert_eq!(
            HealthStatus::Degraded.combine(HealthStatus::Unhealthy),
            HealthStatus::Unhealthy
        );
    }

    #[test]
    fn health_status_codes() {
        assert_eq!(HealthStatus::Healthy.status_code(), StatusCode::OK);
        assert_eq!(HealthStatus::Degraded.status_code(), StatusCode::OK);
        assert_eq!(
            HealthStatus::Unhealthy.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn demo_state_is_ready() {
        let state = AppState::new(ServerConfig::default()).unwrap();
        let response = readiness(&state);
        assert!(response.ready);
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.components.len(), 2);
    }

    #[test]
    fn missing_sequence_is_not_ready() {
        let state = AppState::with_validator(ServerConfig::default(), Validator::new());
        let response = readiness(&state);
        assert!(!response.ready);
        let sequences = &response.components["group_sequences"];
        assert_eq!(sequences.status, HealthStatus::Unhealthy);
        assert_eq!(
            sequences.error.as_deref(),
            Some("sequence ValidationOrder not registered")
        );
    }
}
