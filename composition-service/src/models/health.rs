use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub openai_configured: bool,
}

impl HealthStatus {
    pub fn healthy(openai_configured: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            openai_configured,
        }
    }
}
