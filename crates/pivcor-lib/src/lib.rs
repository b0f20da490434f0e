// PIVCOR Lead Chat Library
// Rule-based lead qualification chatbot shared by the HTTP server and the terminal client

pub mod models;
pub mod services;
pub mod utils;

pub use utils::AppConfig;

/// Crate version reported by the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
