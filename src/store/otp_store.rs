use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::otp::model::OtpCode;

/// In-memory mapping of phone number to its outstanding code.
///
/// Clones share the same map. Every operation holds the lock for its whole
/// duration, so a check-and-delete never interleaves with an issue for the
/// same phone.
#[derive(Clone, Default)]
pub struct OtpStore {
    inner: Arc<Mutex<HashMap<String, OtpCode>>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the code for `phone`, returning the code it replaced
    pub async fn set(&self, phone: &str, code: OtpCode) -> Option<OtpCode> {
        let mut store = self.inner.lock().await;
        store.insert(phone.to_string(), code)
    }

    pub async fn get(&self, phone: &str) -> Option<OtpCode> {
        let store = self.inner.lock().await;
        store.get(phone).copied()
    }

    pub async fn remove(&self, phone: &str) -> Option<OtpCode> {
        let mut store = self.inner.lock().await;
        store.remove(phone)
    }

    /// Remove the code for `phone` if `candidate` matches it.
    ///
    /// Returns whether a code was consumed. A mismatch leaves the entry as is.
    pub async fn take_if_matches(&self, phone: &str, candidate: &Value) -> bool {
        let mut store = self.inner.lock().await;
        match store.get(phone) {
            Some(code) if code.matches(candidate) => {
                store.remove(phone);
                true
            }
            _ => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
