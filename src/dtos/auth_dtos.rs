use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Whitespace-only input counts as missing, same as blank config values.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Mobile number is required".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendOTPRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub mobile: String,
}

// No format check on `otp`: a malformed code is simply a wrong code.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOTPRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub mobile: String,

    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct SendOTPResponse {
    pub status: String,
    pub mobile: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOTPResponse {
    pub status: String,
    pub message: String,
}
