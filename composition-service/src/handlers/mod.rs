//! HTTP handlers for the composition service.

pub mod composition;
pub mod health;
pub mod index;
pub mod metrics;
