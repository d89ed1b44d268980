//! Control-plane API surface: routes, validation, and the escalate →
//! resolve → learn loop over HTTP.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use frontdesk_core::types::SalonContext;
use frontdesk_lib::agent::AgentService;
use frontdesk_lib::server::router;
use frontdesk_lib::store::{HelpRequestStore, KnowledgeStore};

fn app() -> Router {
    router(AgentService::new(
        SalonContext::default(),
        HelpRequestStore::default(),
        KnowledgeStore::default(),
    ))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn agent_config_carries_prompt_and_schema() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/agent/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["systemPrompt"].as_str().unwrap().contains("receptionist"));
    assert!(body["greeting"].as_str().unwrap().contains("Welcome"));
    assert_eq!(body["functions"][0]["name"], "request_help");
    assert_eq!(
        body["functions"][0]["parameters"]["required"],
        json!(["question", "customerPhone"])
    );
}

#[tokio::test]
async fn function_call_requires_name_and_args() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/agent/function-call",
        Some(json!({ "callId": "room-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("functionName"));
}

#[tokio::test]
async fn unknown_function_is_an_error() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/agent/function-call",
        Some(json!({
            "functionName": "book_flight",
            "args": { "question": "q", "customerPhone": "+1" },
            "callId": "room-1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("book_flight"));
}

#[tokio::test]
async fn escalate_resolve_learn_round_trip() {
    let app = app();

    // Voice agent escalates a question it cannot answer.
    let (status, body) = send(
        &app,
        "POST",
        "/api/agent/function-call",
        Some(json!({
            "functionName": "request_help",
            "args": {
                "question": "Do you have parking on site?",
                "customerPhone": "+15551234567",
            },
            "callId": "room-42",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let request_id = body["requestId"].as_str().unwrap().to_string();

    // It shows up in the pending queue.
    let (status, pending) = send(&app, "GET", "/api/supervisor/requests/pending", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);
    assert_eq!(pending[0]["callId"], "room-42");
    assert_eq!(pending[0]["status"], "pending");

    // Supervisor resolves it.
    let (status, resolved) = send(
        &app,
        "POST",
        &format!("/api/supervisor/requests/{request_id}/resolve"),
        Some(json!({ "answer": "Yes, behind the building.", "supervisorName": "Dana" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["status"], "resolved");
    assert_eq!(resolved["supervisorAnswer"], "Yes, behind the building.");

    // The answer is learned and now served from the knowledge base.
    let (status, check) = send(
        &app,
        "POST",
        "/api/agent/check-knowledge",
        Some(json!({ "question": "Do you have parking on site?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["found"], true);
    assert_eq!(check["answer"], "Yes, behind the building.");

    // Stats reflect the round trip.
    let (_, stats) = send(&app, "GET", "/api/supervisor/stats", None).await;
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["resolved"], 1);
    assert_eq!(stats["knowledgeEntries"], 1);
}

#[tokio::test]
async fn resolve_validates_answer_and_id() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/supervisor/requests/some-id/resolve",
        Some(json!({ "supervisorName": "Dana" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/supervisor/requests/some-id/resolve",
        Some(json!({ "answer": "An answer." })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn simulate_call_answers_basics() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/agent/simulate-call",
        Some(json!({
            "customerPhone": "+15551234567",
            "customerMessage": "What are your hours?",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handled"], true);
    assert_eq!(body["source"], "basic_knowledge");
    assert!(body["response"].as_str().unwrap().contains("9 AM - 7 PM"));
}

#[tokio::test]
async fn knowledge_crud() {
    let app = app();

    let (status, entry) = send(
        &app,
        "POST",
        "/api/supervisor/knowledge",
        Some(json!({
            "question": "Do you sell gift cards?",
            "answer": "Yes, at the front desk.",
            "category": "general",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = entry["id"].as_str().unwrap().to_string();
    assert_eq!(entry["question"], "do you sell gift cards");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/supervisor/knowledge/{id}"),
        Some(json!({ "answer": "Yes, online and in store." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["answer"], "Yes, online and in store.");

    let (status, listed) = send(&app, "GET", "/api/supervisor/knowledge", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/supervisor/knowledge/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &format!("/api/supervisor/knowledge/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn requests_filter_rejects_unknown_status() {
    let app = app();
    let (status, _) = send(&app, "GET", "/api/supervisor/requests?status=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
