use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root_handler() -> &'static str {
    "🚀 OTP Login API"
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "otp_records": state.otp_service.store().len(),
        "sms_sender": state.sms_sender,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
