// src/llm/schema.rs
// Output contract handed to the model provider

use serde::Serialize;
use serde_json::{Value, json};

use crate::api::types::{Rating, Sentiment};

/// Name the provider reports back for the sentiment contract
pub const SENTIMENT_SCHEMA_NAME: &str = "sentiment_schema";

/// A named JSON schema the provider must satisfy exactly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSchema {
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

impl OutputSchema {
    pub fn strict(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
            strict: true,
        }
    }
}

/// Schema for `{sentiment, rating}`: closed enum, bounded integer, nothing else
pub fn sentiment_schema() -> OutputSchema {
    let categories: Vec<&str> = Sentiment::ALL.iter().map(Sentiment::as_str).collect();

    OutputSchema::strict(
        SENTIMENT_SCHEMA_NAME,
        json!({
            "type": "object",
            "properties": {
                "sentiment": {
                    "type": "string",
                    "enum": categories
                },
                "rating": {
                    "type": "integer",
                    "minimum": Rating::MIN,
                    "maximum": Rating::MAX
                }
            },
            "required": ["sentiment", "rating"],
            "additionalProperties": false
        }),
    )
}
