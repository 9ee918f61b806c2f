//! Edit and generate endpoints driven through the full app

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use gemini_image_gateway::server::create_app;
use gemini_image_gateway::server::routes::images::ImageResponse;
use gemini_image_gateway::utils::error::{ErrorResponse, NoImageResponse};
use serde_json::json;
use wiremock::Mock;
use wiremock::ResponseTemplate;
use wiremock::matchers::{body_partial_json, method, path};

use crate::common::fixtures::{PNG_BYTES, b64};
use crate::common::gemini::{MockGemini, candidate};
use crate::common::{DEFAULT_KEY, MultipartBody};

#[actix_web::test]
async fn test_edit_png_without_key_uses_default() {
    let gemini = MockGemini::start().await;
    gemini.expect_no_validation().await;
    gemini.respond_with_image("image/png", PNG_BYTES).await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .file("file", "cat.png", "image/png", PNG_BYTES)
        .text("prompt", "make it grayscale")
        .into_request("/api/edit-image/")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: ImageResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Processing complete");
    assert!(body.using_default_key);
    assert_eq!(body.mime_type, "image/png");
    assert_eq!(body.text.as_deref(), Some("Here is your image"));
    assert_eq!(STANDARD.decode(&body.image).unwrap(), PNG_BYTES);
}

#[actix_web::test]
async fn test_edit_sends_prompt_then_inline_image() {
    let gemini = MockGemini::start().await;
    Mock::given(method("POST"))
        .and(path(MockGemini::generate_path()))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"text": "make it grayscale"},
                    {"inlineData": {"mimeType": "image/png", "data": b64(PNG_BYTES)}}
                ]
            }],
            "generationConfig": {"responseModalities": ["TEXT", "IMAGE"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(json!([
            {"inlineData": {"mimeType": "image/png", "data": b64(PNG_BYTES)}}
        ]))))
        .expect(1)
        .mount(&gemini.server)
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .file("file", "cat.png", "image/png", PNG_BYTES)
        .text("prompt", "make it grayscale")
        .into_request("/api/edit-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_request_carries_relaxed_safety_settings() {
    let gemini = MockGemini::start().await;
    Mock::given(method("POST"))
        .and(path(MockGemini::generate_path()))
        .and(body_partial_json(json!({
            "safetySettings": [
                {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE"},
                {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_NONE"},
                {"category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_NONE"},
                {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(json!([
            {"inlineData": {"mimeType": "image/png", "data": b64(PNG_BYTES)}}
        ]))))
        .expect(1)
        .mount(&gemini.server)
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .text("prompt", "a red circle")
        .into_request("/api/generate-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_edit_rejects_non_image_before_provider_call() {
    let gemini = MockGemini::start().await;
    gemini.expect_no_validation().await;
    gemini.expect_no_generation().await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .file("file", "notes.txt", "text/plain", b"not a picture")
        .text("prompt", "make it grayscale")
        .into_request("/api/edit-image/")
        .insert_header(("x-api-key", "caller-key"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.detail, "Uploaded file is not an image");
}

#[actix_web::test]
async fn test_edit_with_valid_caller_key() {
    let gemini = MockGemini::start().await;
    gemini.accept_key("caller-key").await;
    gemini
        .expect_generation_with_key("caller-key", "image/jpeg", b"jpeg-bytes")
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .file("file", "cat.png", "image/png", PNG_BYTES)
        .text("prompt", "add a hat")
        .into_request("/api/edit-image")
        .insert_header(("x-api-key", "caller-key"))
        .to_request();
    let body: ImageResponse = test::call_and_read_body_json(&app, req).await;

    assert!(!body.using_default_key);
    assert_eq!(body.mime_type, "image/jpeg");
    assert!(body.text.is_none());
    assert_eq!(STANDARD.decode(&body.image).unwrap(), b"jpeg-bytes");
}

#[actix_web::test]
async fn test_generate_with_invalid_key_falls_back() {
    let gemini = MockGemini::start().await;
    gemini.reject_key("bad-key").await;
    gemini
        .expect_generation_with_key(DEFAULT_KEY, "image/png", PNG_BYTES)
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .text("prompt", "a red circle")
        .into_request("/api/generate-image/")
        .insert_header(("x-api-key", "bad-key"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: ImageResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Processing complete");
    assert!(body.using_default_key);
    assert_eq!(STANDARD.decode(&body.image).unwrap(), PNG_BYTES);
}

#[actix_web::test]
async fn test_empty_key_header_is_treated_as_absent() {
    let gemini = MockGemini::start().await;
    gemini.expect_no_validation().await;
    gemini
        .expect_generation_with_key(DEFAULT_KEY, "image/png", PNG_BYTES)
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .text("prompt", "a red circle")
        .into_request("/api/generate-image")
        .insert_header(("x-api-key", ""))
        .to_request();
    let body: ImageResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.using_default_key);
}

#[actix_web::test]
async fn test_generate_accepts_urlencoded_prompt() {
    let gemini = MockGemini::start().await;
    gemini.respond_with_image("image/png", PNG_BYTES).await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-image")
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("prompt=a+red+circle")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: ImageResponse = test::read_body_json(resp).await;
    assert!(body.using_default_key);
}

#[actix_web::test]
async fn test_generate_sends_prompt_only() {
    let gemini = MockGemini::start().await;
    Mock::given(method("POST"))
        .and(path(MockGemini::generate_path()))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "a red circle"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(json!([
            {"inlineData": {"mimeType": "image/png", "data": b64(PNG_BYTES)}}
        ]))))
        .expect(1)
        .mount(&gemini.server)
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .text("prompt", "a red circle")
        .into_request("/api/generate-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_text_only_generation_is_not_found() {
    let gemini = MockGemini::start().await;
    gemini
        .respond_with_parts(json!([{"text": "I can only describe a red circle."}]))
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .text("prompt", "a red circle")
        .into_request("/api/generate-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: NoImageResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "No image generated");
    assert_eq!(body.text, "I can only describe a red circle.");
}

#[actix_web::test]
async fn test_empty_parts_are_not_found_with_empty_text() {
    let gemini = MockGemini::start().await;
    gemini.respond_with_parts(json!([])).await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .file("file", "cat.png", "image/png", PNG_BYTES)
        .text("prompt", "make it grayscale")
        .into_request("/api/edit-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: NoImageResponse = test::read_body_json(resp).await;
    assert_eq!(body.text, "");
}

#[actix_web::test]
async fn test_provider_failure_on_generate_is_500() {
    let gemini = MockGemini::start().await;
    gemini
        .fail_generation(
            500,
            json!({"error": {"code": 500, "message": "Internal error encountered.", "status": "INTERNAL"}}),
        )
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .text("prompt", "a red circle")
        .into_request("/api/generate-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.detail.starts_with("Error generating image: "));
    assert!(body.detail.contains("Internal error encountered."));
}

#[actix_web::test]
async fn test_upstream_not_found_detail_keeps_message() {
    let gemini = MockGemini::start().await;
    gemini
        .fail_generation(
            404,
            json!({"error": {
                "code": 404,
                "message": "models/gemini-nope is not found for API version v1beta",
                "status": "NOT_FOUND"
            }}),
        )
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .text("prompt", "a red circle")
        .into_request("/api/generate-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        body.detail,
        "Error generating image: Not found for gemini: models/gemini-nope is not found for API version v1beta"
    );
}

#[actix_web::test]
async fn test_missing_candidates_on_edit_is_500() {
    let gemini = MockGemini::start().await;
    Mock::given(method("POST"))
        .and(path(MockGemini::generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&gemini.server)
        .await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .file("file", "cat.png", "image/png", PNG_BYTES)
        .text("prompt", "make it grayscale")
        .into_request("/api/edit-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.detail.starts_with("Error processing image: "));
}

#[actix_web::test]
async fn test_missing_prompt_is_unprocessable() {
    let gemini = MockGemini::start().await;
    gemini.expect_no_generation().await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .file("file", "cat.png", "image/png", PNG_BYTES)
        .into_request("/api/edit-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.detail, "Field required: prompt");

    let req = MultipartBody::new()
        .text("prompt", "make it grayscale")
        .into_request("/api/edit-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri("/api/generate-image")
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("other=value")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_empty_prompt_is_unprocessable() {
    let gemini = MockGemini::start().await;
    gemini.expect_no_validation().await;
    gemini.expect_no_generation().await;
    let app = test::init_service(create_app(gemini.state())).await;

    let req = MultipartBody::new()
        .file("file", "cat.png", "image/png", PNG_BYTES)
        .text("prompt", "")
        .into_request("/api/edit-image")
        .insert_header(("x-api-key", "caller-key"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.detail, "Field required: prompt");

    let req = MultipartBody::new()
        .text("prompt", "")
        .into_request("/api/generate-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri("/api/generate-image")
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("prompt=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.detail, "Field required: prompt");
}

#[actix_web::test]
async fn test_oversize_upload_is_rejected() {
    let gemini = MockGemini::start().await;
    gemini.expect_no_generation().await;
    let mut config = gemini.config();
    config.gateway.server.max_body_size = 1024;
    let app = test::init_service(create_app(MockGemini::state_for(config))).await;

    let req = MultipartBody::new()
        .text("prompt", "make it grayscale")
        .file("file", "big.png", "image/png", &vec![0u8; 4096])
        .into_request("/api/edit-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.detail.contains("1024"));
}
