// src/services/mod.rs

pub mod sentiment;

pub use sentiment::SentimentAnalyzer;
