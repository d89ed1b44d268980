//! HTTP API for the frontdesk control plane.
//!
//! Runs on port 3000 by default. CORS-permissive so the supervisor
//! dashboard can call from another localhost port. Route table:
//! `/api/agent/*` for the voice agent, `/api/supervisor/*` for humans.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use frontdesk_core::prompt::{GREETING, system_prompt};
use frontdesk_core::types::{
    FunctionCallResult, HelpRequest, KnowledgeEntry, RequestStatus, Stats,
};

use crate::agent::{AgentService, SimulateOutcome};

/// Build the axum router with a shared [`AgentService`].
pub fn router(service: AgentService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/agent/config", get(agent_config))
        .route("/api/agent/function-call", post(function_call))
        .route("/api/agent/simulate-call", post(simulate_call))
        .route("/api/agent/check-knowledge", post(check_knowledge))
        .route("/api/supervisor/requests", get(list_requests))
        .route("/api/supervisor/requests/pending", get(pending_requests))
        .route("/api/supervisor/requests/{id}/resolve", post(resolve_request))
        .route("/api/supervisor/knowledge", get(list_knowledge).post(add_knowledge))
        .route(
            "/api/supervisor/knowledge/{id}",
            put(update_knowledge).delete(delete_knowledge),
        )
        .route("/api/supervisor/stats", get(stats))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Spawn the background job that expires stale pending requests.
pub fn spawn_expiry(service: AgentService, period: std::time::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // First tick fires immediately; skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let expired = service.requests.expire_old();
            if expired > 0 {
                info!(expired, "expired stale help requests");
            }
        }
    });
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn bad_request(msg: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody { error: msg.to_string() }),
    )
}

fn not_found(msg: String) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorBody { error: msg }))
}

// ─── Health ────────────────────────────────────────────────────────────────

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

// ─── Agent routes ──────────────────────────────────────────────────────────

async fn agent_config(State(service): State<AgentService>) -> Json<Value> {
    Json(json!({
        "systemPrompt": system_prompt(&service.salon),
        "greeting": GREETING,
        "context": service.salon,
        "functions": [request_help_schema()],
    }))
}

/// JSON schema of `request_help`, in the shape the LLM function-calling
/// API expects.
fn request_help_schema() -> Value {
    json!({
        "name": "request_help",
        "description": "Request help from supervisor when you don't know the answer",
        "parameters": {
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The customer's question that needs supervisor help",
                },
                "customerPhone": {
                    "type": "string",
                    "description": "Customer phone number for follow-up",
                },
            },
            "required": ["question", "customerPhone"],
        },
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FunctionCallBody {
    function_name: Option<String>,
    args: Option<frontdesk_core::types::FunctionArgs>,
    #[serde(default)]
    call_id: Option<String>,
}

async fn function_call(
    State(service): State<AgentService>,
    Json(body): Json<FunctionCallBody>,
) -> Result<Json<FunctionCallResult>, ApiError> {
    let (Some(name), Some(args)) = (body.function_name, body.args) else {
        return Err(bad_request("functionName and args are required"));
    };
    let call_id = body.call_id.unwrap_or_default();

    match service.handle_function_call(&name, &args, &call_id) {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("function call failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { error: e }),
            ))
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulateBody {
    customer_phone: Option<String>,
    customer_message: Option<String>,
}

async fn simulate_call(
    State(service): State<AgentService>,
    Json(body): Json<SimulateBody>,
) -> Result<Json<SimulateOutcome>, ApiError> {
    let (Some(phone), Some(message)) = (body.customer_phone, body.customer_message) else {
        return Err(bad_request("customerPhone and customerMessage are required"));
    };
    Ok(Json(service.simulate_call(&phone, &message)))
}

#[derive(Deserialize)]
struct CheckKnowledgeBody {
    question: Option<String>,
}

async fn check_knowledge(
    State(service): State<AgentService>,
    Json(body): Json<CheckKnowledgeBody>,
) -> Result<Json<Value>, ApiError> {
    let Some(question) = body.question else {
        return Err(bad_request("question is required"));
    };
    let answer = service.check_knowledge(&question);
    Ok(Json(json!({ "found": answer.is_some(), "answer": answer })))
}

// ─── Supervisor routes ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RequestsQuery {
    status: Option<String>,
}

async fn list_requests(
    State(service): State<AgentService>,
    Query(query): Query<RequestsQuery>,
) -> Result<Json<Vec<HelpRequest>>, ApiError> {
    let status = match query.status.as_deref() {
        None => None,
        Some("pending") => Some(RequestStatus::Pending),
        Some("resolved") => Some(RequestStatus::Resolved),
        Some("expired") => Some(RequestStatus::Expired),
        Some(other) => return Err(bad_request(&format!("unknown status: {other}"))),
    };
    Ok(Json(service.requests.all(status)))
}

async fn pending_requests(State(service): State<AgentService>) -> Json<Vec<HelpRequest>> {
    Json(service.requests.pending())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveBody {
    answer: Option<String>,
    supervisor_name: Option<String>,
}

async fn resolve_request(
    State(service): State<AgentService>,
    Path(id): Path<String>,
    Json(body): Json<ResolveBody>,
) -> Result<Json<HelpRequest>, ApiError> {
    let Some(answer) = body.answer.filter(|a| !a.trim().is_empty()) else {
        return Err(bad_request("answer is required"));
    };
    let name = body.supervisor_name.unwrap_or_else(|| "Supervisor".into());
    service
        .resolve_request(&id, &answer, &name)
        .map(Json)
        .map_err(not_found)
}

async fn list_knowledge(State(service): State<AgentService>) -> Json<Vec<KnowledgeEntry>> {
    Json(service.knowledge.all())
}

#[derive(Deserialize)]
struct KnowledgeBody {
    question: Option<String>,
    answer: Option<String>,
    category: Option<String>,
}

async fn add_knowledge(
    State(service): State<AgentService>,
    Json(body): Json<KnowledgeBody>,
) -> Result<Json<KnowledgeEntry>, ApiError> {
    let (Some(question), Some(answer)) = (body.question, body.answer) else {
        return Err(bad_request("question and answer are required"));
    };
    let category = body.category.unwrap_or_else(|| "general".into());
    Ok(Json(service.knowledge.add(&question, &answer, &category, None)))
}

async fn update_knowledge(
    State(service): State<AgentService>,
    Path(id): Path<String>,
    Json(body): Json<KnowledgeBody>,
) -> Result<Json<KnowledgeEntry>, ApiError> {
    service
        .knowledge
        .update(
            &id,
            body.question.as_deref(),
            body.answer.as_deref(),
            body.category.as_deref(),
        )
        .map(Json)
        .map_err(not_found)
}

async fn delete_knowledge(
    State(service): State<AgentService>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if service.knowledge.remove(&id) {
        Ok(Json(json!({ "ok": true })))
    } else {
        Err(not_found(format!("knowledge entry not found: {id}")))
    }
}

async fn stats(State(service): State<AgentService>) -> Json<Stats> {
    Json(service.stats())
}
