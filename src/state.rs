use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::otp_service::OTPService;
use crate::services::otp_store::OtpStore;
use crate::services::sms_service::{Msg91Gateway, SmsGateway};

#[derive(Clone)]
pub struct AppState {
    pub otp_service: Arc<OTPService>,
    pub sms_sender: String,
}

impl AppState {
    /// Wire the MSG91 gateway and an empty store from validated config.
    pub fn from_config(config: &AppConfig) -> Self {
        let gateway = Msg91Gateway::new(config.msg91.clone());
        let sms_sender = gateway.sender_id().to_string();
        let otp_service = OTPService::new(Arc::new(OtpStore::default()), Arc::new(gateway));

        AppState {
            otp_service: Arc::new(otp_service),
            sms_sender,
        }
    }

    pub fn new(otp_service: OTPService) -> Self {
        AppState {
            otp_service: Arc::new(otp_service),
            sms_sender: String::new(),
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sms_sender = sender.into();
        self
    }

    /// Convenience for tests and local runs with a custom gateway.
    pub fn with_gateway(store: Arc<OtpStore>, gateway: Arc<dyn SmsGateway>) -> Self {
        Self::new(OTPService::new(store, gateway))
    }
}
