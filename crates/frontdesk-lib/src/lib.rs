//! frontdesk-lib — Receptionist control-plane engine.
//!
//! Escalation notifier, in-memory help-request and knowledge stores, the
//! agent service, and the HTTP API. Depends on frontdesk-core for pure
//! types and question matching.

pub mod agent;
pub mod notifier;
pub mod server;
pub mod store;

// Re-export frontdesk-core for convenience
pub use frontdesk_core;
