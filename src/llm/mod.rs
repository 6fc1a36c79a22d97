// src/llm/mod.rs
// Model provider clients and the structured-output contract

pub mod http_client;
pub mod logging;
pub mod openai;
pub mod prompt;
pub mod provider;
pub mod schema;

pub use openai::OpenAiClient;
pub use provider::{NormalizedUsage, StructuredProvider, StructuredRequest};
pub use schema::{OutputSchema, sentiment_schema};
