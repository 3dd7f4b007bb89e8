//! workout-service: generates workout plans through an LLM chat-completion API.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;
