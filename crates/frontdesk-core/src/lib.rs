//! frontdesk-core — Pure types and question matching.
//!
//! No async runtime, no I/O, no platform dependencies.

pub mod matching;
pub mod prompt;
pub mod types;
