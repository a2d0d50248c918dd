use actix_web::http::header::CONTENT_TYPE;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, ResponseError, Result, dev::ServiceResponse};
use serde_json::json;

use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;

/// Wrap error responses that are not already JSON envelopes
pub fn handle_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let is_json = res
        .response()
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status_code = res.status();
    let error_message = res
        .response()
        .error()
        .map(|e| e.to_string())
        .unwrap_or_else(|| {
            status_code
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    log::warn!(
        "{} {} -> {}",
        res.request().method(),
        res.request().path(),
        status_code
    );

    let new_response = if status_code.is_server_error() {
        CustomError::InternalServerError(error_message).error_response()
    } else {
        HttpResponse::build(status_code).json(json!({
            "success": false,
            "message": error_message,
            "httpStatusCode": status_code.as_u16(),
            "error": status_code.canonical_reason().unwrap_or("Unknown"),
            "service": service_name(),
        }))
    };

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::not_found::not_found;
    use actix_web::http::StatusCode;
    use actix_web::middleware::ErrorHandlers;
    use actix_web::{App, test, web};

    async fn method_not_allowed() -> HttpResponse {
        HttpResponse::MethodNotAllowed().body("nope")
    }

    async fn json_bad_request() -> Result<HttpResponse, CustomError> {
        Err(CustomError::BadRequestError("bad phone".to_string()))
    }

    #[actix_web::test]
    async fn plain_error_bodies_become_envelopes() {
        let app = test::init_service(
            App::new()
                .wrap(
                    ErrorHandlers::new()
                        .handler(StatusCode::NOT_FOUND, not_found)
                        .default_handler(handle_error),
                )
                .route("/locked", web::get().to(method_not_allowed)),
        )
        .await;

        let req = test::TestRequest::get().uri("/locked").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["httpStatusCode"], 405);

        let req = test::TestRequest::get().uri("/missing").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "NOT_FOUND_ERROR");
        assert_eq!(body["message"], "Not Found: Route does not exist");
    }

    #[actix_web::test]
    async fn json_errors_pass_through() {
        let app = test::init_service(
            App::new()
                .wrap(ErrorHandlers::new().default_handler(handle_error))
                .route("/bad", web::post().to(json_bad_request)),
        )
        .await;

        let req = test::TestRequest::post().uri("/bad").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Bad Request: bad phone");
    }
}
