//! Traits and shared types every connector implements.

pub mod api;
pub mod configs;
pub mod errors;
pub mod types;
pub mod webhooks;
