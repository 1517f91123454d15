use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{debug, error, info, instrument};

use crate::constants::{SERVICE_NAME, SERVICE_VERSION};
use crate::engine::TextGenerator;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{HealthResponse, RerankRequest, RerankResponse, RootResponse};
use crate::gateway::state::AppState;
use crate::prompt::build_prompt;

/// `POST /rerank`: scores one vacancy title against one job description.
#[instrument(skip(state, payload))]
pub async fn rerank_handler<G>(
    State(state): State<AppState<G>>,
    payload: Result<Json<RerankRequest>, JsonRejection>,
) -> Result<Json<RerankResponse>, GatewayError>
where
    G: TextGenerator + 'static,
{
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected rerank payload");
        GatewayError::InvalidRequest(rejection.body_text())
    })?;

    let scorer = state.scorer().ok_or(GatewayError::NotReady)?;

    let prompt = build_prompt(
        Some(&request.instruction),
        &request.vacancy_title,
        &request.job_description,
    );

    debug!(
        vacancy_title_len = request.vacancy_title.len(),
        job_description_len = request.job_description.len(),
        prompt_len = prompt.len(),
        "Rendered rerank prompt"
    );

    let outcome = tokio::task::spawn_blocking(move || scorer.score(&prompt))
        .await
        .map_err(|e| {
            error!(error = %e, "Scoring task failed");
            GatewayError::Internal(e.to_string())
        })?
        .map_err(|e| {
            error!(error = %e, "Error processing request");
            GatewayError::from(e)
        })?;

    let probability = outcome.probability();
    let score = outcome.score();

    info!(
        probability,
        score,
        defaulted = outcome.is_defaulted(),
        "Processed request"
    );

    Ok(Json(RerankResponse { probability, score }))
}

/// `GET /health`: always 200; reports whether the scorer is installed.
#[instrument(skip(state))]
pub async fn health_handler<G>(State(state): State<AppState<G>>) -> Json<HealthResponse>
where
    G: TextGenerator + 'static,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.is_model_loaded(),
    })
}

/// `GET /`: static service metadata.
#[instrument]
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
    })
}
