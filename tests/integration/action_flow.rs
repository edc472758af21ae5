//! End-to-end action flow: submit with a webhook, then resume from the callback

use agentql_zap::action::{perform, perform_resume, CallbackPayload, PerformOutcome, QueryDataInput};
use agentql_zap::auth;
use agentql_zap::client::{AgentQlClient, ExtractionMode, QueryDataRequest};
use agentql_zap::error::ApiError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

use crate::integration::test_utils::fixture_path;

/// In-memory stand-in for the extraction API
struct FakeService {
    valid_key: bool,
    submitted: Mutex<Vec<QueryDataRequest>>,
}

impl FakeService {
    fn new(valid_key: bool) -> Self {
        Self {
            valid_key,
            submitted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AgentQlClient for FakeService {
    async fn validate_api_key(&self) -> Result<(), ApiError> {
        if self.valid_key {
            Ok(())
        } else {
            auth::handle_bad_response(reqwest::StatusCode::UNAUTHORIZED)
        }
    }

    async fn query_data(&self, request: &QueryDataRequest) -> Result<Value, ApiError> {
        self.submitted.lock().unwrap().push(request.clone());
        Ok(json!({ "status": "queued", "request_id": "req-42" }))
    }
}

#[tokio::test]
async fn test_auth_test_accepts_valid_key() {
    assert!(auth::test(&FakeService::new(true)).await.is_ok());
}

#[tokio::test]
async fn test_auth_test_rejects_invalid_key() {
    let err = auth::test(&FakeService::new(false)).await.unwrap_err();
    assert_eq!(err.kind(), "AuthenticationError");
    assert!(err.to_string().contains("The API Key you supplied is invalid"));
}

#[tokio::test]
async fn test_submit_then_resume() {
    let service = FakeService::new(true);
    let input: QueryDataInput = serde_json::from_value(json!({
        "url": "https://www.agentql.com/blog",
        "query": "{ posts[] { title } }",
        "mode": "standard",
        "is_screenshot_enabled": true,
    }))
    .unwrap();
    assert_eq!(input.mode, ExtractionMode::Standard);

    let outcome = perform(&service, &input, false, || {
        Ok("https://hooks.example/callback/abc".to_string())
    })
    .await
    .unwrap();
    match outcome {
        PerformOutcome::Submitted(ack) => assert_eq!(ack["status"], "queued"),
        other => panic!("expected submission, got {:?}", other),
    }

    let submitted = service.submitted.lock().unwrap().clone();
    assert_eq!(submitted.len(), 1);
    let body = serde_json::to_value(&submitted[0]).unwrap();
    assert_eq!(body["webhook_url"], "https://hooks.example/callback/abc");
    assert_eq!(body["params"]["is_screenshot_enabled"], true);
    assert_eq!(body["metadata"]["experimental_stealth_mode_enabled"], false);

    let raw = std::fs::read_to_string(fixture_path("callback_success.json")).unwrap();
    let payload: CallbackPayload = serde_json::from_str(&raw).unwrap();
    let result = perform_resume(payload).unwrap();
    assert_eq!(result.request_id, "3f1c9a52-req");
    assert_eq!(result.data["posts"][0]["title"], "Launch Week Recap");
    assert_eq!(result.screenshot.as_deref(), Some("iVBORw0KGgo="));
}

#[test]
fn test_resume_with_error_callback() {
    let raw = std::fs::read_to_string(fixture_path("callback_error.json")).unwrap();
    let payload: CallbackPayload = serde_json::from_str(&raw).unwrap();
    let err = perform_resume(payload).unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert!(err.to_string().contains("Failed to load page"));
    assert!(err.to_string().contains("7d2e0b11-req"));
}

#[tokio::test]
async fn test_sample_mode_never_submits() {
    let service = FakeService::new(true);
    let input = QueryDataInput::new("https://example.com", "{ header { title } links[] }");
    let outcome = perform(&service, &input, true, || Ok(String::new()))
        .await
        .unwrap();
    let json = outcome.to_json().unwrap();
    assert_eq!(json["data"]["header"]["title"], "title_0");
    assert_eq!(json["data"]["links"][2], "links_3");
    assert!(service.submitted.lock().unwrap().is_empty());
}
