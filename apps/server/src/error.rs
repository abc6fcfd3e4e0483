use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use lootos_core::errors::Error as CoreError;
use lootos_market_data::MarketDataError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl From<MarketDataError> for ApiError {
    fn from(err: MarketDataError) -> Self {
        ApiError::Core(CoreError::MarketData(err))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    timestamp: DateTime<Utc>,
}

fn market_data_status(err: &MarketDataError) -> StatusCode {
    match err {
        MarketDataError::TokenNotFound(_) => StatusCode::NOT_FOUND,
        MarketDataError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
        MarketDataError::ChainUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ if err.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::NotFound(_) => StatusCode::NOT_FOUND,
                CoreError::MarketData(md) => market_data_status(md),
                CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) | ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("Request failed with {}: {}", status, self);
        }
        let body = Json(ErrorBody {
            success: false,
            error: self.to_string(),
            timestamp: Utc::now(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(CoreError::invalid_input("bad")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(MarketDataError::TokenNotFound("pepe".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(MarketDataError::ProviderError {
                    provider: "COINGECKO".into(),
                    message: "429".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::from(MarketDataError::ChainUnavailable),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::from(CoreError::NotFound("task".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::MethodNotAllowed("DELETE".into()),
                StatusCode::METHOD_NOT_ALLOWED,
            ),
            (
                ApiError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{}", err);
        }
    }
}
