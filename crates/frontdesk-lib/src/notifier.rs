//! Escalation notifier — forwards unanswerable questions to the supervisor
//! control plane.
//!
//! One POST per invocation, bounded by a total timeout, no retries. The
//! caller-facing flow must never fail visibly: every transport error is
//! logged and absorbed, and the caller gets a fixed apology line with the
//! salon's fallback number instead.

use tracing::{debug, error};

use frontdesk_core::types::{FunctionCall, NotifierConfig};

/// Confirmation spoken to the caller after a successful hand-off.
pub const CONFIRMATION: &str =
    "I've sent your question to my supervisor. They'll call you back shortly!";

/// The one capability the voice session needs from this module: escalate a
/// question to a human. The session builder takes `impl Escalate` so tests
/// and future transports can swap the implementation.
pub trait Escalate {
    /// Forward `question` from `customer_phone` on call `call_id`.
    /// Always returns a caller-facing string; never fails.
    fn escalate(
        &self,
        question: &str,
        customer_phone: &str,
        call_id: &str,
    ) -> impl Future<Output = String> + Send;
}

/// Posts `request_help` function calls to the local control plane.
#[derive(Clone)]
pub struct EscalationNotifier {
    config: NotifierConfig,
    client: reqwest::Client,
}

impl EscalationNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Apology line returned when the control plane is unreachable.
    fn apology(&self) -> String {
        format!(
            "I'm having trouble reaching my supervisor right now. Please call us at {}.",
            self.config.fallback_phone
        )
    }
}

impl Escalate for EscalationNotifier {
    async fn escalate(&self, question: &str, customer_phone: &str, call_id: &str) -> String {
        let payload = FunctionCall::request_help(question, customer_phone, call_id);

        // The response body is never interpreted — receiving any HTTP
        // response counts as delivery.
        match self
            .client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(&payload)
            .send()
            .await
        {
            Ok(resp) => {
                debug!(
                    call_id,
                    status = %resp.status(),
                    "escalation delivered"
                );
                CONFIRMATION.to_string()
            }
            Err(e) => {
                error!(call_id, "error escalating to supervisor: {e}");
                self.apology()
            }
        }
    }
}
