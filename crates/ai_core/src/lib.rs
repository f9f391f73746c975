//! AI Core - generative-AI backend client
//!
//! Provides the [`InferenceEngine`] abstraction used to turn a prompt into
//! free text, and [`GeminiInferenceEngine`], a client for Google's
//! `generateContent` REST endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐     ┌──────────────────────┐
//! │  InferenceEngine  │◄────│ GeminiInferenceEngine│── POST /v1beta/models/{m}:generateContent
//! └───────────────────┘     └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ai_core::{GeminiInferenceEngine, InferenceConfig, InferenceEngine, InferenceRequest};
//!
//! let engine = GeminiInferenceEngine::new(InferenceConfig {
//!     api_key: Some("key".into()),
//!     ..Default::default()
//! })?;
//! let response = engine.generate(InferenceRequest::simple("Plan a day in Paris")).await?;
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
