use crate::models::{Composition, CompositionRequest, CompositionResponse};
use crate::services::metrics::{record_composition, record_provider_latency, Outcome};
use crate::services::providers::GenerationParams;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;
use std::time::Instant;

/// `detail` returned when no credential is configured.
pub const MISSING_CREDENTIAL_DETAIL: &str = "OpenAI API key not configured";

/// Generate a composition outline for the caller's prompt.
///
/// The credential is checked before anything is sent upstream. Every
/// provider failure is reported as a 500 whose detail starts with
/// `Generation failed:`.
pub async fn generate_composition(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CompositionRequest>,
) -> Result<Json<CompositionResponse>, AppError> {
    let Some(api_key) = state.credentials.api_key() else {
        tracing::warn!("Composition requested but no credential is configured");
        record_composition(Outcome::Unconfigured);
        return Err(AppError::ServiceUnavailable(
            MISSING_CREDENTIAL_DETAIL.to_string(),
        ));
    };

    let provider = &state.text_provider;
    let params = GenerationParams {
        max_tokens: Some(state.config.openai.max_tokens),
    };

    tracing::info!(
        provider = provider.name(),
        model = provider.model(),
        prompt_len = request.prompt.len(),
        length_bars = request.length_bars,
        "Generating composition"
    );

    let started = Instant::now();
    let result = provider
        .generate(&api_key, &request.model_prompt(), &params)
        .await;
    record_provider_latency(provider.name(), provider.model(), started.elapsed());

    match result {
        Ok(response) => {
            tracing::info!(
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                finish_reason = ?response.finish_reason,
                "Composition generated"
            );
            record_composition(Outcome::Generated);
            Ok(Json(CompositionResponse::generated(Composition::new(
                &request,
                response.text,
            ))))
        }
        Err(e) => {
            tracing::error!(error = %e, "Composition generation failed");
            record_composition(Outcome::Failed);
            Err(AppError::InternalError(anyhow::anyhow!(
                "Generation failed: {}",
                e
            )))
        }
    }
}
