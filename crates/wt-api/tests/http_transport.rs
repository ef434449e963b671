//! Integration tests for the blocking HTTP transport against a mock API.

use serde_json::json;
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wt_api::{Credentials, HttpTransport, SubmissionResult, Submitter};
use wt_core::{Event, ProjectContext};

/// Runs one submission on a blocking thread.
///
/// The blocking reqwest client must not live inside the async runtime.
async fn submit(endpoint: String, event: Event, context: ProjectContext) -> SubmissionResult {
    tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new().unwrap();
        let credentials = Credentials::new("secret-key").unwrap();
        Submitter::new(transport)
            .with_endpoint(endpoint)
            .submit(&event, &context, &credentials)
    })
    .await
    .unwrap()
}

fn endpoint(server: &MockServer) -> String {
    format!("{}/api/v1/actions", server.uri())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_posts_json_with_auth_and_client_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/actions"))
        .and(header("authorization", "Basic c2VjcmV0LWtleQ=="))
        .and(header("content-type", "application/json"))
        .and(header_regex(
            "user-agent",
            r"^wakatime/\d+\.\d+\.\d+ \(.+\) sublime-wakatime/1\.0$",
        ))
        .and(body_json(json!({
            "time": 1_700_000_000.5,
            "file": "/home/user/tracker/src/main.rs",
            "project": "tracker",
            "tags": ["branch:main"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&server)
        .await;

    let mut event = Event::new("/home/user/tracker/src/main.rs").at(1_700_000_000.5);
    event.plugin = Some("sublime-wakatime/1.0".to_string());
    let context = ProjectContext::empty()
        .with_name("tracker")
        .with_tag("branch:main");

    let result = submit(endpoint(&server), event, context).await;

    assert_eq!(
        result,
        SubmissionResult::Success {
            status: 201,
            body: "created".to_string()
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_is_rejected_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/actions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let event = Event::new("/tmp/a.rs").at(1.0);
    let result = submit(endpoint(&server), event, ProjectContext::empty()).await;

    assert_eq!(
        result,
        SubmissionResult::Rejected {
            status: 500,
            body: "internal error".to_string()
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let event = Event::new("/tmp/a.rs").at(1.0);
    let result = submit(endpoint(&server), event, ProjectContext::empty()).await;

    assert!(matches!(result, SubmissionResult::Rejected { status: 401, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_server_is_failed() {
    // Nothing listens on port 1.
    let event = Event::new("/tmp/a.rs").at(1.0);
    let result = submit(
        "http://127.0.0.1:1/api/v1/actions".to_string(),
        event,
        ProjectContext::empty(),
    )
    .await;

    assert!(matches!(result, SubmissionResult::Failed { .. }));
}
