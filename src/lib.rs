//! Mobile number login via one-time passwords delivered over SMS.
//!
//! `POST /send-otp` texts a fresh 6-digit code through MSG91 and
//! `POST /verify-otp` redeems it once within five minutes.

pub mod config;
pub mod dtos;
pub mod errors;
pub mod extractors;
mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
