use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::errors::{AppError, Result};
use crate::models::otp::OtpRecord;
use crate::services::clock::{Clock, SystemClock};

/// Outstanding OTP challenges keyed by mobile number.
///
/// Starts empty and lives as long as the process. Expired records are never
/// swept; they are rejected when someone tries to verify them and replaced on
/// the next send for the same number.
pub struct OtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
    clock: Arc<dyn Clock>,
}

impl OtpStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Issue a fresh record for `mobile`, replacing whatever was there.
    pub fn put(&self, mobile: &str, code: &str) -> OtpRecord {
        let record = OtpRecord::new(code, self.now());
        self.write().insert(mobile.to_string(), record.clone());
        record
    }

    pub fn get(&self, mobile: &str) -> Option<OtpRecord> {
        self.read().get(mobile).cloned()
    }

    pub fn mark_verified(&self, mobile: &str) -> Result<()> {
        let mut records = self.write();
        let record = records.get_mut(mobile).ok_or(AppError::OtpNotFound)?;
        record.verified = true;
        Ok(())
    }

    /// Run `check` against the record for `mobile` and mark it verified if the
    /// check passes. Lookup, check and mark happen under one write lock, so two
    /// concurrent redeems of the same code cannot both succeed.
    pub fn redeem<F>(&self, mobile: &str, check: F) -> Result<()>
    where
        F: FnOnce(&OtpRecord, DateTime<Utc>) -> Result<()>,
    {
        let now = self.now();
        let mut records = self.write();
        let record = records.get_mut(mobile).ok_or(AppError::OtpNotFound)?;
        check(record, now)?;
        record.verified = true;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, OtpRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, OtpRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for OtpStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
