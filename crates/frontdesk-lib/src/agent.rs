//! Agent service — function-call dispatch, knowledge lookup, call triage,
//! and the resolve-and-learn loop.
//!
//! Supervisor and customer notifications are tracing events here; in
//! production they would go out via SMS or push.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use frontdesk_core::matching::{basic_answer, categorize};
use frontdesk_core::types::{FunctionArgs, FunctionCallResult, HelpRequest, SalonContext, Stats};

use crate::store::{HelpRequestStore, KnowledgeStore};

/// Line returned to the voice agent when an escalation is recorded.
pub const CHECKING_WITH_SUPERVISOR: &str =
    "Let me check with my supervisor and get back to you shortly.";

/// Line returned when recording the escalation itself fails.
const PROCESSING_TROUBLE: &str =
    "I apologize, but I'm having trouble processing your request. Please call us directly.";

/// Where a simulated call's answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    KnowledgeBase,
    BasicKnowledge,
    Escalated,
}

/// Outcome of one simulated call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateOutcome {
    pub call_id: String,
    pub handled: bool,
    pub response: String,
    pub source: AnswerSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Shared handle over the salon context and both stores.
#[derive(Clone)]
pub struct AgentService {
    pub salon: SalonContext,
    pub requests: HelpRequestStore,
    pub knowledge: KnowledgeStore,
}

impl AgentService {
    pub fn new(salon: SalonContext, requests: HelpRequestStore, knowledge: KnowledgeStore) -> Self {
        Self {
            salon,
            requests,
            knowledge,
        }
    }

    /// Dispatch a function call from the voice agent.
    pub fn handle_function_call(
        &self,
        function_name: &str,
        args: &FunctionArgs,
        call_id: &str,
    ) -> Result<FunctionCallResult, String> {
        match function_name {
            "request_help" => Ok(self.request_help(&args.question, &args.customer_phone, call_id)),
            other => Err(format!("unknown function: {other}")),
        }
    }

    fn request_help(&self, question: &str, customer_phone: &str, call_id: &str) -> FunctionCallResult {
        if question.trim().is_empty() || customer_phone.trim().is_empty() {
            warn!(call_id, "request_help with empty question or phone");
            return FunctionCallResult {
                success: false,
                message: PROCESSING_TROUBLE.to_string(),
                request_id: None,
            };
        }

        let request = self.requests.create(customer_phone, question, call_id);
        self.notify_supervisor(&request);

        FunctionCallResult {
            success: true,
            message: CHECKING_WITH_SUPERVISOR.to_string(),
            request_id: Some(request.id),
        }
    }

    /// High-confidence knowledge-base answer, or `None` if a human is needed.
    pub fn check_knowledge(&self, question: &str) -> Option<String> {
        let entry = self.knowledge.best_match(question)?;
        info!(
            question,
            matched = %entry.question,
            uses = entry.use_count,
            "knowledge base hit"
        );
        Some(entry.answer)
    }

    /// Triage one incoming question the way the live agent would:
    /// knowledge base, then salon basics, then escalate.
    pub fn simulate_call(&self, customer_phone: &str, message: &str) -> SimulateOutcome {
        let call_id = format!("call-{}", Uuid::new_v4());
        info!(%call_id, customer_phone, message, "incoming simulated call");

        if let Some(answer) = self.check_knowledge(message) {
            return SimulateOutcome {
                call_id,
                handled: true,
                response: answer,
                source: AnswerSource::KnowledgeBase,
                request_id: None,
            };
        }

        if let Some(answer) = basic_answer(&self.salon, message) {
            return SimulateOutcome {
                call_id,
                handled: true,
                response: answer,
                source: AnswerSource::BasicKnowledge,
                request_id: None,
            };
        }

        info!(%call_id, "no answer available, escalating to supervisor");
        let result = self.request_help(message, customer_phone, &call_id);
        SimulateOutcome {
            call_id,
            handled: false,
            response: result.message,
            source: AnswerSource::Escalated,
            request_id: result.request_id,
        }
    }

    /// Resolve a request with the supervisor's answer, learn it into the
    /// knowledge base, and notify the customer.
    pub fn resolve_request(
        &self,
        id: &str,
        answer: &str,
        supervisor_name: &str,
    ) -> Result<HelpRequest, String> {
        let request = self.requests.resolve(id, answer, supervisor_name)?;

        let category = categorize(&request.customer_question);
        self.knowledge
            .add(&request.customer_question, answer, category, Some(&request.id));
        info!(request_id = %request.id, category, "answer learned into knowledge base");

        self.notify_customer(&request);
        self.requests.mark_notified(&request.id);

        Ok(request)
    }

    pub fn stats(&self) -> Stats {
        let (total, pending, resolved, expired) = self.requests.counts();
        Stats {
            total,
            pending,
            resolved,
            expired,
            knowledge_entries: self.knowledge.len(),
        }
    }

    fn notify_supervisor(&self, request: &HelpRequest) {
        info!(
            request_id = %request.id,
            customer = %request.customer_phone,
            question = %request.customer_question,
            "supervisor notification: need help answering this question"
        );
    }

    fn notify_customer(&self, request: &HelpRequest) {
        info!(
            request_id = %request.id,
            customer = %request.customer_phone,
            answer = request.supervisor_answer.as_deref().unwrap_or_default(),
            "customer notification: supervisor answered"
        );
    }
}
