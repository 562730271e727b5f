//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::Value;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, value)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::duplicate_name("taken"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn unauthorized_bodies_flag_logged_out() {
    let (status, _, body) = body_of(&Error::unauthorized("login required")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["loggedOut"], Value::Bool(true));
    assert_eq!(body["message"], "login required");
}

#[rstest]
#[case(Error::internal("pool exhausted at 10.0.0.3:5432"))]
#[case(Error::service_unavailable("connection refused by postgres://db"))]
#[actix_web::test]
async fn server_side_errors_are_redacted(#[case] err: Error, expected_trace_id: String) {
    let err = err.with_trace_id(expected_trace_id.clone());
    let (_, header, body) = body_of(&err).await;
    let message = body["message"].as_str().expect("message");
    assert!(!message.contains("10.0.0.3"));
    assert!(!message.contains("postgres://"));
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body["traceId"], Value::String(expected_trace_id));
    assert!(body.get("loggedOut").is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let err = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({ "field": "name" }));
    let (_, _, body) = body_of(&err).await;
    assert_eq!(body["message"], "bad");
    assert_eq!(body["details"]["field"], "name");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_an_invalid_request() {
    #[derive(serde::Deserialize)]
    struct Payload {
        #[expect(dead_code, reason = "only the extraction outcome matters")]
        name: String,
    }

    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/",
                web::post().to(|_: web::Json<Payload>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_json");
}

#[rstest]
#[actix_web::test]
async fn mistyped_fields_are_not_echoed_back() {
    #[derive(serde::Deserialize)]
    struct Payload {
        #[expect(dead_code, reason = "only the extraction outcome matters")]
        password: String,
    }

    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/",
                web::post().to(|_: web::Json<Payload>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"password":98765432}"#)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let text = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
    assert!(!text.contains("98765432"), "body echoed input: {text}");
    let body: Value = serde_json::from_str(&text).expect("error JSON");
    assert_eq!(body["message"], "request body is not valid JSON");
}

#[rstest]
#[actix_web::test]
async fn malformed_path_segments_are_not_echoed_back() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .route(
                "/items/{id}",
                web::get().to(|_: web::Path<uuid::Uuid>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;
    let request = actix_test::TestRequest::get()
        .uri("/items/hunter2-not-a-uuid")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "invalid path parameter");
    assert_eq!(body["details"]["code"], "invalid_path");
}
