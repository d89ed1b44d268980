//! Question matching — normalization, word-overlap similarity, and the
//! canned answers the receptionist can give without any help.
//!
//! Pure functions, no I/O. The similarity measure is deliberately simple
//! word overlap; good enough for a single salon's question traffic.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::types::SalonContext;

// Compiled regexes — allocated once, reused across calls.
static RE_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[?.,!]").unwrap());
static RE_MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Normalize a question for matching: lowercase, strip `? . , !`,
/// collapse runs of whitespace, trim.
pub fn normalize_question(question: &str) -> String {
    let lower = question.to_lowercase();
    let stripped = RE_PUNCT.replace_all(&lower, "");
    RE_MULTI_SPACE
        .replace_all(stripped.trim(), " ")
        .into_owned()
}

/// Jaccard word overlap of two normalized questions, in `[0.0, 1.0]`.
pub fn similarity(q1: &str, q2: &str) -> f64 {
    let words1: HashSet<&str> = q1.split_whitespace().collect();
    let words2: HashSet<&str> = q2.split_whitespace().collect();
    if words1.is_empty() && words2.is_empty() {
        return 0.0;
    }
    let intersection = words1.intersection(&words2).count();
    let union = words1.union(&words2).count();
    intersection as f64 / union as f64
}

/// Bucket a question into a coarse category for the knowledge base.
pub fn categorize(question: &str) -> &'static str {
    let lower = question.to_lowercase();

    if lower.contains("price") || lower.contains("cost") || lower.contains('$') {
        return "pricing";
    }
    if lower.contains("appointment") || lower.contains("book") || lower.contains("schedule") {
        return "scheduling";
    }
    if lower.contains("cancel") || lower.contains("policy") || lower.contains("refund") {
        return "policy";
    }
    if lower.contains("hour") || lower.contains("open") || lower.contains("close") {
        return "hours";
    }
    "general"
}

/// Answer a question directly from the salon context, if it is one of the
/// basics (hours, location, phone, service list, per-service pricing).
/// Returns `None` when the question needs the knowledge base or a human.
pub fn basic_answer(salon: &SalonContext, question: &str) -> Option<String> {
    let lower = question.to_lowercase();

    // Hours
    if lower.contains("hour") || lower.contains("open") || lower.contains("close") {
        return Some(format!("We're open {}.", salon.hours));
    }

    // Location
    if lower.contains("where") || lower.contains("location") || lower.contains("address") {
        return Some(format!("We're located at {}.", salon.location));
    }

    // Phone
    if lower.contains("phone") || lower.contains("number") || lower.contains("contact") {
        return Some(format!("You can reach us at {}.", salon.phone));
    }

    // Services (general) — pricing questions fall through to the per-service match
    if lower.contains("service") && !lower.contains("price") && !lower.contains("cost") {
        let names: Vec<&str> = salon.services.iter().map(|s| s.name.as_str()).collect();
        return Some(format!(
            "We offer the following services: {}. Would you like pricing information?",
            names.join(", ")
        ));
    }

    // Specific service pricing
    for service in &salon.services {
        if lower.contains(&service.name.to_lowercase()) {
            return Some(format!(
                "{} costs {} and takes about {}.",
                service.name, service.price, service.duration
            ));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalize_question ──────────────────────────────────────────

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(
            normalize_question("Can I book a Haircut?!"),
            "can i book a haircut"
        );
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_question("  what   time  "), "what time");
    }

    #[test]
    fn normalize_empty() {
        assert_eq!(normalize_question(""), "");
    }

    // ── similarity ──────────────────────────────────────────────────

    #[test]
    fn identical_questions_match_fully() {
        let q = normalize_question("do you do hair coloring?");
        assert_eq!(similarity(&q, &q), 1.0);
    }

    #[test]
    fn disjoint_questions_score_zero() {
        assert_eq!(similarity("red green blue", "one two three"), 0.0);
    }

    #[test]
    fn partial_overlap_between_zero_and_one() {
        let s = similarity("can i book a haircut", "can i book a facial");
        assert!(s > 0.0 && s < 1.0, "got {s}");
    }

    #[test]
    fn both_empty_is_zero_not_nan() {
        assert_eq!(similarity("", ""), 0.0);
    }

    // ── categorize ──────────────────────────────────────────────────

    #[test]
    fn categorize_buckets() {
        assert_eq!(categorize("How much does a facial cost?"), "pricing");
        assert_eq!(categorize("Can I book for Tuesday?"), "scheduling");
        assert_eq!(categorize("What's your cancellation policy?"), "policy");
        assert_eq!(categorize("When do you open?"), "hours");
        assert_eq!(categorize("Do you take walk-ins?"), "general");
    }

    // ── basic_answer ────────────────────────────────────────────────

    #[test]
    fn answers_hours() {
        let salon = SalonContext::default();
        let a = basic_answer(&salon, "What are your hours?").unwrap();
        assert!(a.contains(&salon.hours));
    }

    #[test]
    fn answers_location() {
        let salon = SalonContext::default();
        let a = basic_answer(&salon, "Where are you located?").unwrap();
        assert!(a.contains("123 Beauty Lane"));
    }

    #[test]
    fn answers_service_pricing() {
        let salon = SalonContext::default();
        let a = basic_answer(&salon, "How much is a manicure?").unwrap();
        assert!(a.contains("$35"));
        assert!(a.contains("30 minutes"));
    }

    #[test]
    fn lists_services() {
        let salon = SalonContext::default();
        let a = basic_answer(&salon, "What services do you offer?").unwrap();
        assert!(a.contains("Haircut"));
        assert!(a.contains("Facial"));
    }

    #[test]
    fn unknown_question_returns_none() {
        let salon = SalonContext::default();
        assert!(basic_answer(&salon, "Is Sarah working on Friday?").is_none());
    }
}
