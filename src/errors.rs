// src/errors.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("OTP not sent to this number")]
    OtpNotFound,

    #[error("OTP already used")]
    OtpAlreadyUsed,

    #[error("OTP expired")]
    OtpExpired,

    #[error("Invalid OTP")]
    InvalidOtp,

    // Detail is for the logs only, the client just sees the generic message.
    #[error("Failed to send OTP")]
    SmsGatewayFailure(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::OtpNotFound => StatusCode::NOT_FOUND,
            AppError::OtpAlreadyUsed
            | AppError::OtpExpired
            | AppError::InvalidOtp
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::SmsGatewayFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn category(&self) -> &'static str {
        match self {
            AppError::OtpNotFound => "OTP not found",
            AppError::OtpAlreadyUsed => "OTP already used",
            AppError::OtpExpired => "OTP expired",
            AppError::InvalidOtp => "Invalid OTP",
            AppError::SmsGatewayFailure(_) => "SMS gateway error",
            AppError::ValidationError(_) => "Validation failed",
            AppError::ExternalApi(_) => "External API error",
            AppError::ConfigurationError(_) => "Configuration error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.category(),
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (self.status_code(), body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApi(format!("HTTP request failed: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

// Helper conversion functions
impl AppError {
    pub fn external_api(msg: impl Into<String>) -> Self {
        AppError::ExternalApi(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }

    pub fn sms_gateway(msg: impl Into<String>) -> Self {
        AppError::SmsGatewayFailure(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_errors_map_to_client_statuses() {
        assert_eq!(AppError::OtpNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::OtpAlreadyUsed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::OtpExpired.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidOtp.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn gateway_failure_hides_detail() {
        let err = AppError::sms_gateway("connection refused");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to send OTP");
    }

    #[tokio::test]
    async fn response_body_carries_message() {
        let response = AppError::OtpExpired.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "OTP expired");
        assert_eq!(body["success"], false);
    }
}
