use axum::{
    routing::post,
    Router,
};

use crate::{
    handlers::auth_otp,
    state::AppState,
};

pub fn auth_otp_routes() -> Router<AppState> {
    Router::new()
        // Generate and text an OTP to the number
        .route("/send-otp", post(auth_otp::send_otp))

        // Check a submitted OTP and log the number in
        .route("/verify-otp", post(auth_otp::verify_otp))
}
