//! HTTP request handlers

pub mod geo;
pub mod health;
pub mod trips;
