pub mod clock;
pub mod otp_service;
pub mod otp_store;
pub mod sms_service;
