//! Tests for the API client.
//!
//! Exercises URL construction and the response-normalization contract:
//! message extraction for failed transport statuses, and envelope
//! forwarding for successful ones regardless of the business code.

use super::{CourtyardClient, error_message};
use shared::models::ApiResponse;

#[test]
fn base_url_trailing_slash_is_normalized() {
    let client = CourtyardClient::new("/api/");
    assert_eq!(client.api_url("user/list"), "/api/user/list");
    assert_eq!(client.api_url("/user/list"), "/api/user/list");
}

#[test]
fn absolute_base_urls_are_supported() {
    let client = CourtyardClient::new("http://localhost:8080/api");
    assert_eq!(
        client.api_url("dashboard/stats"),
        "http://localhost:8080/api/dashboard/stats"
    );
}

#[test]
fn error_message_prefers_the_body_envelope() {
    let body = r#"{"code":500,"message":"用户名已存在","data":null}"#;
    assert_eq!(error_message(500, body), "用户名已存在");
}

#[test]
fn error_message_falls_back_on_unparseable_body() {
    assert_eq!(error_message(503, ""), "HTTP Error 503");
    assert_eq!(error_message(502, "<html>bad gateway</html>"), "HTTP Error 502");
}

#[test]
fn error_message_falls_back_when_body_has_no_message() {
    assert_eq!(error_message(404, r#"{"code":404}"#), "HTTP Error 404");
}

#[test]
fn business_error_envelope_is_forwarded_verbatim() {
    // What handle_response produces for a 2xx status: a parsed envelope,
    // never an error, whatever the code says.
    let body = r#"{"code":409,"message":"该卡存在欠费","data":null}"#;
    let envelope: ApiResponse<String> = serde_json::from_str(body).unwrap();
    assert_eq!(envelope.code, 409);
    assert_eq!(envelope.message.as_deref(), Some("该卡存在欠费"));
    assert!(envelope.data.is_none());
}

#[test]
fn success_envelope_payload_survives_parsing() {
    let body = r#"{"code":200,"message":null,"data":123.45}"#;
    let envelope: ApiResponse<f64> = serde_json::from_str(body).unwrap();
    assert!(envelope.is_success());
    assert_eq!(envelope.ok().unwrap(), 123.45);
}
