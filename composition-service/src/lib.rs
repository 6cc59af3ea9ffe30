//! composition-service: turns a music prompt into an AI-generated composition outline.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
