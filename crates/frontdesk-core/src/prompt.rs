//! Receptionist prompt — the system prompt and greeting handed to the
//! voice agent via `GET /api/agent/config`.

use crate::types::SalonContext;

/// Greeting the agent speaks when a caller connects.
pub const GREETING: &str = "Hello! Welcome to Bella's Beauty Salon. How can I help you today?";

/// Caller-facing line the agent says before escalating.
pub const ESCALATION_LINE: &str = "Let me check with my supervisor and get back to you shortly.";

/// Build the receptionist system prompt from the salon context.
pub fn system_prompt(salon: &SalonContext) -> String {
    let services = salon
        .services
        .iter()
        .map(|s| format!("- {}: {} ({})", s.name, s.price, s.duration))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a friendly receptionist for {name}, a professional beauty salon.\n\
         \n\
         SERVICES OFFERED:\n\
         {services}\n\
         \n\
         BUSINESS HOURS: {hours}\n\
         LOCATION: {location}\n\
         PHONE: {phone}\n\
         \n\
         INSTRUCTIONS:\n\
         1. Be warm, professional, and helpful\n\
         2. Answer questions about services, pricing, hours, and location\n\
         3. If asked about appointments, staff availability, or anything not in your knowledge, say: \"{escalation}\"\n\
         4. When you need help, call the request_help function with the customer's question and phone number\n\
         5. Keep responses concise and natural\n\
         \n\
         Remember: You're the first point of contact. Make customers feel welcome!",
        name = salon.business_name,
        services = services,
        hours = salon.hours,
        location = salon.location,
        phone = salon.phone,
        escalation = ESCALATION_LINE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_catalog_and_facts() {
        let salon = SalonContext::default();
        let prompt = system_prompt(&salon);
        assert!(prompt.contains("Bella's Beauty Salon"));
        assert!(prompt.contains("- Haircut: $45 (45 minutes)"));
        assert!(prompt.contains(&salon.hours));
        assert!(prompt.contains(&salon.location));
        assert!(prompt.contains("request_help"));
    }

    #[test]
    fn prompt_includes_escalation_line() {
        let prompt = system_prompt(&SalonContext::default());
        assert!(prompt.contains(ESCALATION_LINE));
    }
}
