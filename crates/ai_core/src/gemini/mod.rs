//! Gemini `generateContent` backend

mod client;

pub use client::GeminiInferenceEngine;
