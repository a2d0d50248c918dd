pub mod config;
pub mod middleware;
pub mod otp;
pub mod router;
pub mod store;
pub mod utils;
