// Data models module
// Rust structs that map to the chat widget's JSON payloads

pub mod chat;
pub mod lead;
pub mod reply;
pub mod service;

// Re-export all models for convenience
pub use chat::*;
pub use lead::*;
pub use reply::*;
pub use service::*;
