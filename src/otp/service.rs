use log::{debug, info};
use serde_json::Value;

use crate::otp::model::OtpCode;
use crate::store::OtpStore;
use crate::utils::helpers::generate_otp_code;

pub struct OtpService {
    store: OtpStore,
}

impl OtpService {
    pub fn new(store: OtpStore) -> Self {
        OtpService { store }
    }

    pub fn store(&self) -> &OtpStore {
        &self.store
    }

    /// Generate a fresh code for `phone`, replacing any outstanding one
    pub async fn issue(&self, phone: &str) -> OtpCode {
        let code = generate_otp_code();

        if let Some(previous) = self.store.set(phone, code).await {
            debug!("Replaced unverified OTP {} for {}", previous, phone);
        }

        info!("OTP issued for {}", phone);
        debug!("OTP for {}: {}", phone, code);

        code
    }

    /// Check `otp` against the outstanding code for `phone`, consuming it on match
    pub async fn verify(&self, phone: &str, otp: Option<&Value>) -> bool {
        let Some(otp) = otp else {
            return false;
        };

        let verified = self.store.take_if_matches(phone, otp).await;
        if verified {
            info!("OTP verified for {}", phone);
        } else {
            debug!("OTP rejected for {}", phone);
        }

        verified
    }
}
