use prescreen::Error;
use prescreen::client::IntakeClient;
use prescreen::scoring::{Decision, RiskLevel};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::test_utils::sample_request;

#[tokio::test]
async fn test_submit_parses_classification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_partial_json(json!({
            "loan_amnt": 10000.0,
            "term": "36 months",
            "purpose": "credit_card"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "default_probability": 0.15,
            "risk_score": 15,
            "risk_level": "Low",
            "decision_recommendation": "Approve"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = IntakeClient::new(format!("{}/predict", server.uri())).unwrap();
    let result = client.submit(&sample_request()).await.unwrap();

    assert_eq!(result.default_probability, 0.15);
    assert_eq!(result.risk_score, 15);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.decision_recommendation, Decision::Approve);
}

#[tokio::test]
async fn test_submit_surfaces_rejection_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": "Validation error: field 'loan_amnt': must be positive"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = IntakeClient::new(format!("{}/predict", server.uri())).unwrap();
    let err = client.submit(&sample_request()).await.unwrap_err();

    match err {
        Error::Rejected { status, detail } => {
            assert_eq!(status, 422);
            assert!(detail.contains("loan_amnt"));
        }
        other => panic!("expected rejection, got: {other}"),
    }
}

#[tokio::test]
async fn test_submit_handles_non_json_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = IntakeClient::new(format!("{}/predict", server.uri())).unwrap();
    let err = client.submit(&sample_request()).await.unwrap_err();

    match err {
        Error::Rejected { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Internal Server Error");
        }
        other => panic!("expected rejection, got: {other}"),
    }
}

#[tokio::test]
async fn test_submit_does_not_retry() {
    let server = MockServer::start().await;
    // expect(1) makes the mock server fail verification on a second call.
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Inference error: artifact shape mismatch"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = IntakeClient::new(format!("{}/predict", server.uri())).unwrap();
    let result = client.submit(&sample_request()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_submit_reports_connectivity_failure_as_transport_error() {
    // Bind and drop a server so the port is (very likely) closed. Use a
    // non-pooled server: `MockServer::start()` returns a pooled server whose
    // listener stays open (answering 404) after drop.
    let server = MockServer::builder().start().await;
    let endpoint = format!("{}/predict", server.uri());
    drop(server);

    let client = IntakeClient::new(endpoint).unwrap();
    let err = client.submit(&sample_request()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}
