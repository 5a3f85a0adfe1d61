//! Error types for odds math, data loading and the HTTP API

use thiserror::Error;

/// Errors raised by the pure odds/staking functions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OddsError {
    /// American odds of exactly 0 (or a non-finite value) are not a market price
    #[error("Invalid American odds: {0}")]
    InvalidOdds(f64),

    /// Decimal odds must be strictly greater than 1
    #[error("Invalid decimal odds: {0}")]
    InvalidDecimalOdds(f64),

    #[error("Probability must be between 0 and 1, got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("Invalid staking config: {field} = {value}")]
    InvalidStakingConfig { field: &'static str, value: f64 },
}

/// Errors raised while loading picks or odds snapshots
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid value {value:?} in column {column} (row {row})")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Application error types surfaced by the HTTP API
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid request data
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<OddsError> for AppError {
    fn from(err: OddsError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

#[cfg(feature = "api")]
mod response {
    use actix_web::{http::StatusCode, HttpResponse, ResponseError};

    use super::AppError;
    use crate::models::ErrorResponse;

    impl ResponseError for AppError {
        fn status_code(&self) -> StatusCode {
            match self {
                AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
                AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        fn error_response(&self) -> HttpResponse {
            let (error_code, message) = match self {
                AppError::ValidationError(msg) => ("validation_error", msg.clone()),
                AppError::InternalError(msg) => ("internal_error", msg.clone()),
            };

            HttpResponse::build(self.status_code()).json(ErrorResponse {
                error: error_code.to_string(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odds_error_display() {
        let err = OddsError::InvalidOdds(0.0);
        assert!(err.to_string().contains("Invalid American odds"));

        let err = OddsError::ProbabilityOutOfRange(1.5);
        assert!(err.to_string().contains("1.5"));

        let err = OddsError::InvalidStakingConfig {
            field: "bankroll",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid staking config: bankroll = -1");
    }

    #[test]
    fn test_odds_error_into_validation_error() {
        let err: AppError = OddsError::InvalidOdds(0.0).into();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(err.to_string().contains("Validation error"));
    }

    #[test]
    fn test_invalid_field_display() {
        let err = DataError::InvalidField {
            row: 3,
            column: "odds",
            value: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("odds"));
        assert!(msg.contains("row 3"));
    }

    #[cfg(feature = "api")]
    #[test]
    fn test_error_status_codes() {
        use actix_web::{http::StatusCode, ResponseError};

        assert_eq!(
            AppError::ValidationError("".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InternalError("".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
