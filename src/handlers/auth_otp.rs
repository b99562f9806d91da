use axum::{extract::State, Json};
use validator::Validate;

use crate::dtos::auth_dtos::{SendOTPRequest, SendOTPResponse, VerifyOTPRequest, VerifyOTPResponse};
use crate::errors::Result;
use crate::extractors::AppJson;
use crate::state::AppState;

// 1. Send OTP
pub async fn send_otp(
    State(state): State<AppState>,
    AppJson(req): AppJson<SendOTPRequest>,
) -> Result<Json<SendOTPResponse>> {
    req.validate()?;

    state.otp_service.send(&req.mobile).await?;

    Ok(Json(SendOTPResponse {
        status: "sent".to_string(),
        mobile: req.mobile,
        message: "OTP sent".to_string(),
    }))
}

// 2. Verify OTP
pub async fn verify_otp(
    State(state): State<AppState>,
    AppJson(req): AppJson<VerifyOTPRequest>,
) -> Result<Json<VerifyOTPResponse>> {
    req.validate()?;

    state.otp_service.verify(&req.mobile, &req.otp)?;

    Ok(Json(VerifyOTPResponse {
        status: "success".to_string(),
        message: "Login successful".to_string(),
    }))
}
