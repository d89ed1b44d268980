//! In-memory stores for help requests and the learned knowledge base.
//!
//! Both are cheap cloneable handles over a shared `Mutex`. Persistence is
//! deliberately out of scope — the control plane is single-process and the
//! records are short-lived.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use frontdesk_core::matching::{normalize_question, similarity};
use frontdesk_core::types::{HelpRequest, KnowledgeEntry, RequestStatus};

/// Default lifetime of a pending request before it expires.
pub const DEFAULT_REQUEST_TTL_MINS: i64 = 30;

/// Listing cap for `all()` — newest first.
const LIST_LIMIT: usize = 100;

/// Knowledge search floor; anything below is noise.
const SEARCH_THRESHOLD: f64 = 0.5;

/// Confidence needed to answer from the knowledge base without a human.
const MATCH_THRESHOLD: f64 = 0.7;

// ─── Help requests ─────────────────────────────────────────────────────────

/// Store of escalated customer questions.
#[derive(Clone)]
pub struct HelpRequestStore {
    inner: Arc<Mutex<Vec<HelpRequest>>>,
    ttl: Duration,
}

impl Default for HelpRequestStore {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TTL_MINS)
    }
}

impl HelpRequestStore {
    pub fn new(ttl_mins: i64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
            ttl: Duration::minutes(ttl_mins),
        }
    }

    /// Record a new pending request.
    pub fn create(&self, customer_phone: &str, question: &str, call_id: &str) -> HelpRequest {
        let now = Utc::now();
        let request = HelpRequest {
            id: Uuid::new_v4().to_string(),
            customer_phone: customer_phone.to_string(),
            customer_question: question.to_string(),
            call_id: call_id.to_string(),
            status: RequestStatus::Pending,
            created_at: now,
            expires_at: now + self.ttl,
            resolved_at: None,
            supervisor_answer: None,
            supervisor_name: None,
            notified_customer: false,
        };
        self.lock().push(request.clone());
        request
    }

    pub fn get(&self, id: &str) -> Option<HelpRequest> {
        self.lock().iter().find(|r| r.id == id).cloned()
    }

    /// All requests, optionally filtered by status, newest first, capped.
    pub fn all(&self, status: Option<RequestStatus>) -> Vec<HelpRequest> {
        self.lock()
            .iter()
            .rev()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .take(LIST_LIMIT)
            .cloned()
            .collect()
    }

    pub fn pending(&self) -> Vec<HelpRequest> {
        self.all(Some(RequestStatus::Pending))
    }

    /// Attach the supervisor's answer and flip the request to resolved.
    pub fn resolve(
        &self,
        id: &str,
        answer: &str,
        supervisor_name: &str,
    ) -> Result<HelpRequest, String> {
        let mut guard = self.lock();
        let request = guard
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| format!("help request not found: {id}"))?;
        request.status = RequestStatus::Resolved;
        request.resolved_at = Some(Utc::now());
        request.supervisor_answer = Some(answer.to_string());
        request.supervisor_name = Some(supervisor_name.to_string());
        Ok(request.clone())
    }

    pub fn mark_notified(&self, id: &str) {
        if let Some(request) = self.lock().iter_mut().find(|r| r.id == id) {
            request.notified_customer = true;
        }
    }

    /// Flip stale pending requests to expired. Returns how many flipped.
    pub fn expire_old(&self) -> usize {
        let now = Utc::now();
        let mut count = 0;
        for request in self.lock().iter_mut() {
            if request.status == RequestStatus::Pending && request.expires_at <= now {
                request.status = RequestStatus::Expired;
                count += 1;
            }
        }
        count
    }

    pub fn counts(&self) -> (usize, usize, usize, usize) {
        let guard = self.lock();
        let total = guard.len();
        let mut pending = 0;
        let mut resolved = 0;
        let mut expired = 0;
        for r in guard.iter() {
            match r.status {
                RequestStatus::Pending => pending += 1,
                RequestStatus::Resolved => resolved += 1,
                RequestStatus::Expired => expired += 1,
            }
        }
        (total, pending, resolved, expired)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HelpRequest>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ─── Knowledge base ────────────────────────────────────────────────────────

/// Store of learned question/answer pairs.
#[derive(Clone, Default)]
pub struct KnowledgeStore {
    inner: Arc<Mutex<Vec<KnowledgeEntry>>>,
}

impl KnowledgeStore {
    /// Add a learned answer. The question is stored normalized.
    pub fn add(
        &self,
        question: &str,
        answer: &str,
        category: &str,
        source_request_id: Option<&str>,
    ) -> KnowledgeEntry {
        let entry = KnowledgeEntry {
            id: Uuid::new_v4().to_string(),
            question: normalize_question(question),
            answer: answer.to_string(),
            category: category.to_string(),
            source_request_id: source_request_id.map(str::to_string),
            learned_at: Utc::now(),
            last_used: None,
            use_count: 0,
            is_active: true,
        };
        self.lock().push(entry.clone());
        entry
    }

    /// Active entries scoring above the search floor, best first.
    pub fn search(&self, question: &str) -> Vec<(KnowledgeEntry, f64)> {
        let normalized = normalize_question(question);
        let mut results: Vec<(KnowledgeEntry, f64)> = self
            .lock()
            .iter()
            .filter(|e| e.is_active)
            .map(|e| (e.clone(), similarity(&normalized, &e.question)))
            .filter(|(_, score)| *score > SEARCH_THRESHOLD)
            .collect();
        results.sort_by(|a, b| b.1.total_cmp(&a.1));
        results
    }

    /// High-confidence match, recording the use. `None` means escalate.
    pub fn best_match(&self, question: &str) -> Option<KnowledgeEntry> {
        let normalized = normalize_question(question);
        let mut guard = self.lock();
        let (entry, score) = guard
            .iter_mut()
            .filter(|e| e.is_active)
            .map(|e| {
                let score = similarity(&normalized, &e.question);
                (e, score)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))?;
        if score <= MATCH_THRESHOLD {
            return None;
        }
        entry.use_count += 1;
        entry.last_used = Some(Utc::now());
        Some(entry.clone())
    }

    /// Active entries, newest first.
    pub fn all(&self) -> Vec<KnowledgeEntry> {
        self.lock()
            .iter()
            .rev()
            .filter(|e| e.is_active)
            .cloned()
            .collect()
    }

    /// Overwrite fields of an entry. `None` fields are left untouched.
    pub fn update(
        &self,
        id: &str,
        question: Option<&str>,
        answer: Option<&str>,
        category: Option<&str>,
    ) -> Result<KnowledgeEntry, String> {
        let mut guard = self.lock();
        let entry = guard
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| format!("knowledge entry not found: {id}"))?;
        if let Some(q) = question {
            entry.question = normalize_question(q);
        }
        if let Some(a) = answer {
            entry.answer = a.to_string();
        }
        if let Some(c) = category {
            entry.category = c.to_string();
        }
        Ok(entry.clone())
    }

    /// Hard delete. Returns whether an entry was removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut guard = self.lock();
        let before = guard.len();
        guard.retain(|e| e.id != id);
        guard.len() < before
    }

    pub fn deactivate(&self, id: &str) -> Result<(), String> {
        let mut guard = self.lock();
        let entry = guard
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| format!("knowledge entry not found: {id}"))?;
        entry.is_active = false;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().iter().filter(|e| e.is_active).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<KnowledgeEntry>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
