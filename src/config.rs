// config.rs
use std::env;

use crate::errors::{AppError, Result};

pub const DEFAULT_SENDER_ID: &str = "VYPMTR";
pub const DEFAULT_MSG91_URL: &str = "https://api.msg91.com/api/v5/otp";
pub const DEFAULT_COUNTRY_CODE: &str = "91";

/// Credentials and endpoint for the MSG91 OTP API.
#[derive(Debug, Clone)]
pub struct Msg91Config {
    pub auth_key: String,
    pub template_id: String,
    pub sender_id: String,
    pub base_url: String,
    pub country_code: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub msg91: Msg91Config,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AppError::configuration(format!("PORT must be a number, got {:?}", raw)))?,
            None => 3000,
        };

        let msg91 = Msg91Config {
            auth_key: get("MSG91_AUTH_KEY")
                .ok_or_else(|| AppError::configuration("MSG91_AUTH_KEY must be set"))?,
            template_id: get("MSG91_TEMPLATE_ID")
                .ok_or_else(|| AppError::configuration("MSG91_TEMPLATE_ID must be set"))?,
            sender_id: get("MSG91_SENDER_ID").unwrap_or_else(|| DEFAULT_SENDER_ID.to_string()),
            base_url: get("MSG91_BASE_URL").unwrap_or_else(|| DEFAULT_MSG91_URL.to_string()),
            country_code: get("MSG91_COUNTRY_CODE")
                .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string()),
        };

        if !msg91.country_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::configuration(format!(
                "MSG91_COUNTRY_CODE must contain only digits, got {:?}",
                msg91.country_code
            )));
        }

        Ok(AppConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            msg91,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn get_config_info(&self) -> serde_json::Value {
        serde_json::json!({
            "host": self.host,
            "port": self.port,
            "msg91_url": self.msg91.base_url,
            "sender_id": self.msg91.sender_id,
            "template_id": self.msg91.template_id,
            "country_code": self.msg91.country_code,
            "auth_key_set": !self.msg91.auth_key.is_empty(),
        })
    }
}
