use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::{AppError, Result};
use crate::services::otp_store::OtpStore;
use crate::services::sms_service::SmsGateway;

pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

/// Generate a 6-digit OTP drawn uniformly from 100000..=999999.
pub fn generate_otp<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(OTP_MIN..=OTP_MAX).to_string()
}

/// Send/verify orchestration for mobile OTP login.
pub struct OTPService {
    store: Arc<OtpStore>,
    gateway: Arc<dyn SmsGateway>,
    rng: Mutex<StdRng>,
}

impl OTPService {
    pub fn new(store: Arc<OtpStore>, gateway: Arc<dyn SmsGateway>) -> Self {
        Self::with_rng(store, gateway, StdRng::from_entropy())
    }

    pub fn with_rng(store: Arc<OtpStore>, gateway: Arc<dyn SmsGateway>, rng: StdRng) -> Self {
        Self {
            store,
            gateway,
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &OtpStore {
        &self.store
    }

    fn next_code(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate_otp(&mut *rng)
    }

    /// Generate a code, hand it to the gateway and remember it only if the
    /// gateway accepted it. A failed send leaves any earlier record untouched.
    pub async fn send(&self, mobile: &str) -> Result<()> {
        let code = self.next_code();

        if let Err(e) = self.gateway.send_otp(mobile, &code).await {
            tracing::error!("Failed to send OTP to {}: {}", mobile, e);
            return Err(AppError::sms_gateway(e.to_string()));
        }

        let record = self.store.put(mobile, &code);
        tracing::info!("OTP issued for {} (expires at {})", mobile, record.expires_at());
        Ok(())
    }

    pub fn verify(&self, mobile: &str, otp: &str) -> Result<()> {
        let outcome = self.store.redeem(mobile, |record, now| {
            if record.verified {
                return Err(AppError::OtpAlreadyUsed);
            }
            if record.is_expired(now) {
                return Err(AppError::OtpExpired);
            }
            if record.code != otp {
                return Err(AppError::InvalidOtp);
            }
            Ok(())
        });

        match &outcome {
            Ok(()) => tracing::info!("OTP verified for {}", mobile),
            Err(e) => tracing::warn!("OTP verification failed for {}: {}", mobile, e),
        }
        outcome
    }
}
