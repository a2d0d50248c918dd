use actix_web::{HttpRequest, HttpResponse, web};

use crate::otp::model::{ApiResponse, SendOtpRequest, VerifyOtpRequest, phone_key};
use crate::otp::service::OtpService;
use crate::utils::error::CustomError;
use crate::utils::helpers::read_json_body;

/// Issue a code for a phone number
/// POST /send-otp
pub async fn send_otp(
    req: HttpRequest,
    otp_service: web::Data<OtpService>,
    payload: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let body: SendOtpRequest = read_json_body(&req, &payload)?;
    let phone = phone_key(body.phone.as_ref());
    otp_service.issue(&phone).await;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(format!("OTP sent to {}", phone))))
}

/// Check a submitted code
/// POST /verify-otp
pub async fn verify_otp(
    req: HttpRequest,
    otp_service: web::Data<OtpService>,
    payload: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let body: VerifyOtpRequest = read_json_body(&req, &payload)?;
    let phone = phone_key(body.phone.as_ref());

    if otp_service.verify(&phone, body.otp.as_ref()).await {
        Ok(HttpResponse::Ok().json(ApiResponse::ok("OTP verified successfully!")))
    } else {
        Ok(HttpResponse::Ok().json(ApiResponse::failed("Invalid OTP!")))
    }
}
