// src/lib.rs
// Comment sentiment service: one HTTP endpoint backed by a schema-constrained LLM call

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod services;
pub mod state;

pub use api::types::{CommentRequest, Rating, Sentiment, SentimentResponse};
pub use error::{ProviderError, SentimentError};
pub use state::AppState;
