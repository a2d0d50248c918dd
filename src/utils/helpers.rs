use actix_web::{HttpMessage, HttpRequest};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::otp::model::OtpCode;
use crate::utils::error::CustomError;

/// Generate a 6-digit OTP code
pub fn generate_otp_code() -> OtpCode {
    let mut rng = rand::rng();
    let code: u32 = rng.random_range(OtpCode::MIN..=OtpCode::MAX);
    OtpCode::new(code)
}

/// Name reported in the `service` field of envelopes
pub fn service_name() -> String {
    std::env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string())
}

/// Decode a JSON request body, reading an absent or non-JSON body as `{}`.
///
/// Only `application/json` bodies are parsed. Any other content type, an
/// empty body, or a top-level array yields `T::default()`. A body that is
/// not JSON, or whose top level is a scalar, is a bad request.
pub fn read_json_body<T>(req: &HttpRequest, body: &[u8]) -> Result<T, CustomError>
where
    T: DeserializeOwned + Default,
{
    let is_json = req
        .mime_type()
        .ok()
        .flatten()
        .is_some_and(|mime| mime.essence_str() == "application/json");

    if !is_json || body.is_empty() {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| CustomError::BadRequestError(format!("Invalid JSON body: {}", e)))?;

    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| CustomError::BadRequestError(format!("Invalid JSON body: {}", e))),
        Value::Array(_) => Ok(T::default()),
        _ => Err(CustomError::BadRequestError(
            "JSON body must be an object or an array".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otp::model::SendOtpRequest;
    use actix_web::test::TestRequest;
    use serde_json::json;

    fn json_request() -> HttpRequest {
        TestRequest::default()
            .insert_header(("content-type", "application/json; charset=utf-8"))
            .to_http_request()
    }

    #[test]
    fn empty_json_body_reads_as_default() {
        let body: SendOtpRequest = read_json_body(&json_request(), b"").unwrap();
        assert!(body.phone.is_none());
    }

    #[test]
    fn non_json_content_type_is_not_parsed() {
        let form = TestRequest::default()
            .insert_header(("content-type", "application/x-www-form-urlencoded"))
            .to_http_request();
        let body: SendOtpRequest = read_json_body(&form, b"phone=%2B1555").unwrap();
        assert!(body.phone.is_none());

        let bare = TestRequest::default().to_http_request();
        let body: SendOtpRequest = read_json_body(&bare, br#"{"phone":"+1555"}"#).unwrap();
        assert!(body.phone.is_none());
    }

    #[test]
    fn json_object_is_parsed() {
        let body: SendOtpRequest =
            read_json_body(&json_request(), br#"{"phone":"+1555"}"#).unwrap();
        assert_eq!(body.phone, Some(json!("+1555")));
    }

    #[test]
    fn top_level_array_reads_as_default() {
        let body: SendOtpRequest = read_json_body(&json_request(), br#"["+1555"]"#).unwrap();
        assert!(body.phone.is_none());
    }

    #[test]
    fn broken_or_scalar_json_is_rejected() {
        let err =
            read_json_body::<SendOtpRequest>(&json_request(), b"{\"phone\": ").unwrap_err();
        assert!(matches!(err, CustomError::BadRequestError(_)));

        let err = read_json_body::<SendOtpRequest>(&json_request(), b"\"+1555\"").unwrap_err();
        assert!(matches!(err, CustomError::BadRequestError(_)));
    }

    #[test]
    fn generated_codes_stay_within_six_digits() {
        for _ in 0..10_000 {
            let code = generate_otp_code().value();
            assert!((100_000..=999_999).contains(&code), "out of range: {code}");
            assert_eq!(code.to_string().len(), 6);
        }
    }

    #[test]
    fn service_name_falls_back_to_unknown() {
        temp_env::with_var_unset("SERVICE_NAME", || {
            assert_eq!(service_name(), "Unknown");
        });
        temp_env::with_var("SERVICE_NAME", Some("otp"), || {
            assert_eq!(service_name(), "otp");
        });
    }
}
