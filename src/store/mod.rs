pub mod otp_store;

pub use otp_store::OtpStore;
