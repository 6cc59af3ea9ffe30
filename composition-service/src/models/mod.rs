pub mod composition;
pub mod health;

pub use composition::{Composition, CompositionRequest, CompositionResponse};
pub use health::HealthStatus;
