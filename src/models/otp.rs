use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long an issued OTP stays valid.
pub const OTP_EXPIRY_MINUTES: i64 = 5;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub code: String,              // 6-digit OTP
    pub created_at: DateTime<Utc>, // When OTP was issued
    pub verified: bool,            // Set once on successful verification
}

impl OtpRecord {
    pub fn new(code: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            created_at,
            verified: false,
        }
    }

    pub fn expiry_window() -> Duration {
        Duration::minutes(OTP_EXPIRY_MINUTES)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Self::expiry_window()
    }

    // Exactly five minutes old is still valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Self::expiry_window()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued() -> OtpRecord {
        OtpRecord::new("123456", Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn new_record_is_unverified() {
        let record = issued();
        assert!(!record.verified);
        assert_eq!(record.code, "123456");
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let record = issued();
        assert!(!record.is_expired(record.created_at));
        assert!(!record.is_expired(record.expires_at()));
        assert!(record.is_expired(record.expires_at() + Duration::seconds(1)));
    }

    #[test]
    fn expires_five_minutes_after_issue() {
        let record = issued();
        assert_eq!(record.expires_at() - record.created_at, Duration::minutes(5));
    }
}
