// src/api/http/mod.rs

pub mod comment;
pub mod handlers;
pub mod router;

pub use comment::analyze_comment_handler;
pub use handlers::health_handler;
pub use router::{API_VERSION, create_router};
