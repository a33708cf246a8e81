//! Audit endpoint integration tests
//!
//! Drive the full router with in-process scanner and assistant fakes.

mod helpers;

use std::sync::Arc;

use a11y_audit::build_router;
use a11y_audit::types::Assistant;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use helpers::{audit_request, body_json, test_app_state, violation, FakeAssistant, FakeScanner};

#[tokio::test]
async fn test_bare_domain_is_scanned_over_https() {
    let scanner = FakeScanner::returning(vec![]);
    let (state, _clock) = test_app_state(scanner.clone(), None);
    let app = build_router(state);

    let response = app
        .oneshot(audit_request("198.51.100.1", json!({"url": "  example.com  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(scanner.scanned_urls(), vec!["https://example.com"]);

    let body = body_json(response).await;
    assert_eq!(body["auditReport"]["url"], "https://example.com");
}

#[tokio::test]
async fn test_clean_site_scores_100_with_fallback_summary() {
    let (state, _clock) = test_app_state(FakeScanner::returning(vec![]), None);
    let app = build_router(state);

    let response = app
        .oneshot(audit_request("198.51.100.1", json!({"url": "https://example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["auditReport"]["accessibilityScore"], 100);
    assert_eq!(body["auditReport"]["detailedIssues"], json!([]));
    assert_eq!(body["auditReport"]["summary"], "Found 0 accessibility issue(s).");
    assert_eq!(body["validation"]["quality"], "good");
    assert_eq!(body["validation"]["score"], 100);
    assert_eq!(body["validation"]["sanityCheck"]["passed"], true);
    assert!(body["requestId"].is_string());
    assert!(body["performance"]["totalDuration"].is_u64());
    assert_eq!(body["industryComparison"]["url"], "https://example.com");
    assert_eq!(
        body["industryComparison"]["recommendations"]
            .as_array()
            .unwrap()
            .len(),
        5
    );
}

#[tokio::test]
async fn test_scores_and_validation_for_three_violations() {
    let scanner = FakeScanner::returning(vec![
        violation("image-alt", "critical"),
        violation("region", "minor"),
        violation("label", "critical"),
    ]);
    let (state, _clock) = test_app_state(scanner, None);
    let app = build_router(state);

    let response = app
        .oneshot(audit_request("198.51.100.1", json!({"url": "example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["auditReport"]["accessibilityScore"], 76);
    assert_eq!(body["validation"]["score"], 75);
    assert_eq!(body["validation"]["quality"], "fair");

    let issues = body["auditReport"]["detailedIssues"].as_array().unwrap();
    let ids: Vec<_> = issues.iter().map(|i| i["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["image-alt", "region", "label"]);

    // No assistant: remediation present but null, no explanations
    for issue in issues {
        assert!(issue.get("remediation").unwrap().is_null());
        assert!(issue.get("aiExplanation").is_none());
        assert_eq!(issue["wcag"], json!(["wcag2a"]));
    }
}

#[tokio::test]
async fn test_assistant_output_is_merged() {
    let scanner = FakeScanner::returning(vec![
        violation("region", "minor"),
        violation("image-alt", "critical"),
    ]);
    let assistant: Arc<dyn Assistant> = Arc::new(FakeAssistant::failing_for(&["region"]));
    let (state, _clock) = test_app_state(scanner, Some(assistant));
    let app = build_router(state);

    let response = app
        .oneshot(audit_request("198.51.100.1", json!({"url": "example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body["auditReport"]["summary"],
        "https://example.com has 2 issue(s) worth fixing."
    );

    let issues = body["auditReport"]["detailedIssues"].as_array().unwrap();
    assert_eq!(issues[0]["id"], "region");
    assert!(issues[0]["remediation"].is_null());
    assert!(issues[0].get("aiExplanation").is_none());

    assert_eq!(issues[1]["id"], "image-alt");
    assert_eq!(issues[1]["remediation"]["suggestion"], "Fix image-alt");
    assert_eq!(issues[1]["aiExplanation"], "Explanation for image-alt");
}

#[tokio::test]
async fn test_summary_failure_falls_back() {
    let scanner = FakeScanner::returning(vec![violation("label", "serious")]);
    let assistant: Arc<dyn Assistant> = Arc::new(FakeAssistant::new().without_summary());
    let (state, _clock) = test_app_state(scanner, Some(assistant));
    let app = build_router(state);

    let response = app
        .oneshot(audit_request("198.51.100.1", json!({"url": "example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["auditReport"]["summary"], "Found 1 accessibility issue(s).");
}

#[tokio::test]
async fn test_missing_url_rejected() {
    let scanner = FakeScanner::returning(vec![]);
    let (state, _clock) = test_app_state(scanner.clone(), None);
    let app = build_router(state);

    for payload in [json!({}), json!({"url": ""}), json!({"url": "   "})] {
        let response = app
            .clone()
            .oneshot(audit_request("198.51.100.1", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "MISSING_URL");
    }

    assert!(scanner.scanned_urls().is_empty());
}

#[tokio::test]
async fn test_invalid_url_rejected() {
    let scanner = FakeScanner::returning(vec![]);
    let (state, _clock) = test_app_state(scanner.clone(), None);
    let app = build_router(state);

    let response = app
        .oneshot(audit_request("198.51.100.1", json!({"url": "ftp://example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_URL");
    assert!(scanner.scanned_urls().is_empty());
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let (state, _clock) = test_app_state(FakeScanner::returning(vec![]), None);
    let app = build_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/audit")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_eleventh_request_rate_limited() {
    let scanner = FakeScanner::returning(vec![]);
    let (state, _clock) = test_app_state(scanner.clone(), None);
    let app = build_router(state);

    for i in 0..10 {
        let response = app
            .clone()
            .oneshot(audit_request("203.0.113.5", json!({"url": "example.com"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "request {} should pass", i + 1);
    }

    let response = app
        .clone()
        .oneshot(audit_request("203.0.113.5", json!({"url": "example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "60");

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "RATE_LIMITED");
    assert_eq!(body["retryAfterSeconds"], 60);

    // Rejected before any scan work
    assert_eq!(scanner.scanned_urls().len(), 10);

    // Another client is unaffected
    let response = app
        .oneshot(audit_request("203.0.113.6", json!({"url": "example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_applies_to_invalid_requests() {
    let (state, _clock) = test_app_state(FakeScanner::returning(vec![]), None);
    let app = build_router(state);

    for _ in 0..10 {
        let response = app
            .clone()
            .oneshot(audit_request("203.0.113.9", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .oneshot(audit_request("203.0.113.9", json!({"url": "example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_scan_failure_is_sanitized() {
    let scanner =
        FakeScanner::failing("net::ERR_NAME_NOT_RESOLVED at https://nope.invalid (/srv/scanner/page.js:88)");
    let (state, _clock) = test_app_state(scanner, None);
    let app = build_router(state.clone());

    let response = app
        .oneshot(audit_request("198.51.100.1", json!({"url": "nope.invalid"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "SITE_NOT_FOUND");
    assert!(body["requestId"].is_string());

    let text = body.to_string();
    assert!(!text.contains("ERR_NAME_NOT_RESOLVED"));
    assert!(!text.contains("/srv/scanner"));

    let last_error = state.last_error.read().await.clone().unwrap();
    assert!(last_error.starts_with("SITE_NOT_FOUND"));
}

#[tokio::test]
async fn test_unrecognized_failure_gets_generic_message() {
    let scanner = FakeScanner::failing("browser crashed: SIGSEGV in renderer");
    let (state, _clock) = test_app_state(scanner, None);
    let app = build_router(state);

    let response = app
        .oneshot(audit_request("198.51.100.1", json!({"url": "example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "AUDIT_FAILED");
    assert!(!body.to_string().contains("SIGSEGV"));
}

#[tokio::test]
async fn test_options_are_ignored() {
    let (state, _clock) = test_app_state(FakeScanner::returning(vec![]), None);
    let app = build_router(state);

    let response = app
        .oneshot(audit_request(
            "198.51.100.1",
            json!({"url": "example.com", "options": {"depth": 3, "mobile": true}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
