//! Error classification for the demo server
//!
//! This module provides:
//! - Stable error codes with a category used in logs and metric labels
//! - Mapping from validator errors to codes
//! - The JSON error body returned by the API routes

use crate::validation::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

// =============================================================================
// ERROR CODES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum ErrorCode {
    /// Requested demo identifier is not one of the fixed set
    UnknownDemo = 1001,
    /// Validated type has no such constrained property
    UnknownProperty = 2001,
    /// Type declares a property it cannot produce a value for
    MissingPropertyValue = 2002,
    /// Validated type has no such constrained method
    UnknownExecutable = 2003,
    /// Wrong number of arguments for executable validation
    ParameterCountMismatch = 2004,
    /// Constraint applied to a value kind it cannot check
    UnsupportedValue = 2005,
    /// Group sequence registration is invalid
    InvalidGroupSequence = 2006,
    /// Anything else
    Internal = 9000,
}

impl ErrorCode {
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the error category for metrics
    pub fn category(&self) -> &'static str {
        match self {
            ErrorCode::UnknownDemo => "not_found",
            ErrorCode::UnknownProperty
            | ErrorCode::MissingPropertyValue
            | ErrorCode::UnknownExecutable => "definition_error",
            ErrorCode::ParameterCountMismatch | ErrorCode::UnsupportedValue => "usage_error",
            ErrorCode::InvalidGroupSequence => "configuration_error",
            ErrorCode::Internal => "server_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::UnknownDemo => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<&ValidationError> for ErrorCode {
    fn from(error: &ValidationError) -> Self {
        match error {
            ValidationError::UnknownProperty { .. } => ErrorCode::UnknownProperty,
            ValidationError::MissingPropertyValue { .. } => ErrorCode::MissingPropertyValue,
            ValidationError::UnknownExecutable { .. } => ErrorCode::UnknownExecutable,
            ValidationError::ParameterCountMismatch { .. } => ErrorCode::ParameterCountMismatch,
            ValidationError::UnsupportedValue { .. } => ErrorCode::UnsupportedValue,
            ValidationError::CyclicGroupSequence { .. }
            | ValidationError::DuplicateGroupSequence { .. }
            | ValidationError::DefaultGroupSequence { .. } => ErrorCode::InvalidGroupSequence,
        }
    }
}

// =============================================================================
// API ERROR BODY
// =============================================================================

/// Error returned by the JSON routes
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub category: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            category: code.category(),
            message: message.into(),
        }
    }

    pub fn unknown_demo(name: &str) -> Self {
        Self::new(ErrorCode::UnknownDemo, format!("no demo named '{name}'"))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}
