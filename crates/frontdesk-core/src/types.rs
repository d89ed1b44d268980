//! Shared types for the frontdesk receptionist ecosystem.
//!
//! These types are used across frontdesk-lib, frontdesk-cli, and the voice
//! agent that drives the escalation notifier. Keeping them here means
//! consumers can depend on the wire format without pulling in tokio, axum,
//! or reqwest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ─── Notifier types ────────────────────────────────────────────────────────

/// Escalation notifier configuration.
///
/// Passed explicitly at construction — the notifier carries no ambient
/// globals. Defaults match the local control plane and the salon's
/// front-of-house number.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub endpoint: String,
    pub fallback_phone: String,
    pub timeout: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/agent/function-call".into(),
            fallback_phone: "+1-555-BEAUTY-1".into(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Function-call payload the agent posts to the control plane.
///
/// Wire format: `{"functionName","args":{"question","customerPhone"},"callId"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCall {
    pub function_name: String,
    pub args: FunctionArgs,
    pub call_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionArgs {
    pub question: String,
    pub customer_phone: String,
}

impl FunctionCall {
    /// Build a `request_help` call for one escalation.
    pub fn request_help(question: &str, customer_phone: &str, call_id: &str) -> Self {
        Self {
            function_name: "request_help".into(),
            args: FunctionArgs {
                question: question.to_string(),
                customer_phone: customer_phone.to_string(),
            },
            call_id: call_id.to_string(),
        }
    }
}

/// Control-plane reply to a function call. The notifier never interprets
/// this — it exists for the supervisor CLI and the simulate flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

// ─── Help request lifecycle ────────────────────────────────────────────────

/// Lifecycle state of a help request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Resolved,
    Expired,
}

/// One escalated customer question awaiting (or past) supervisor attention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub id: String,
    pub customer_phone: String,
    pub customer_question: String,
    pub call_id: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub supervisor_answer: Option<String>,
    pub supervisor_name: Option<String>,
    pub notified_customer: bool,
}

// ─── Knowledge base ────────────────────────────────────────────────────────

/// A learned question/answer pair. `question` is stored normalized
/// (see [`crate::matching::normalize_question`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub source_request_id: Option<String>,
    pub learned_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub use_count: u64,
    pub is_active: bool,
}

// ─── Salon context ─────────────────────────────────────────────────────────

/// One service on the salon's menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub price: String,
    pub duration: String,
}

/// Business facts the receptionist can answer from directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonContext {
    pub business_name: String,
    pub services: Vec<Service>,
    pub hours: String,
    pub location: String,
    pub phone: String,
}

impl Default for SalonContext {
    fn default() -> Self {
        let svc = |name: &str, price: &str, duration: &str| Service {
            name: name.into(),
            price: price.into(),
            duration: duration.into(),
        };
        Self {
            business_name: "Bella's Beauty Salon".into(),
            services: vec![
                svc("Haircut", "$45", "45 minutes"),
                svc("Hair Coloring", "$120", "2 hours"),
                svc("Manicure", "$35", "30 minutes"),
                svc("Pedicure", "$50", "45 minutes"),
                svc("Facial", "$80", "60 minutes"),
            ],
            hours: "Monday-Saturday: 9 AM - 7 PM, Sunday: 10 AM - 5 PM".into(),
            location: "123 Beauty Lane, New York, NY 10001".into(),
            phone: "+1-555-BEAUTY-1".into(),
        }
    }
}

// ─── Dashboard stats ───────────────────────────────────────────────────────

/// Counts for the supervisor dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
    pub expired: usize,
    pub knowledge_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_call_wire_format() {
        let call = FunctionCall::request_help(
            "Can I book a haircut for 5pm?",
            "+15551234567",
            "room-42",
        );
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["functionName"], "request_help");
        assert_eq!(json["args"]["question"], "Can I book a haircut for 5pm?");
        assert_eq!(json["args"]["customerPhone"], "+15551234567");
        assert_eq!(json["callId"], "room-42");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Expired).unwrap(),
            "\"expired\""
        );
    }

    #[test]
    fn notifier_defaults() {
        let config = NotifierConfig::default();
        assert_eq!(
            config.endpoint,
            "http://localhost:3000/api/agent/function-call"
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.fallback_phone.is_empty());
    }
}
