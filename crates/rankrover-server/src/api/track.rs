use axum::{extract::State, Extension, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use rankrover_core::TrackReport;
use rankrover_llm::ChatClient;

use crate::middleware::RequestId;

use super::{normalize_count, ApiError, ApiResponse, AppState, ResponseMeta};

/// Body shared by all three tracking endpoints.
///
/// `keyword` and `brand` default to empty so a missing field reaches the
/// explicit validation below instead of a generic deserialize rejection.
#[derive(Debug, Deserialize)]
pub(super) struct TrackRequest {
    #[serde(default)]
    keyword: String,
    #[serde(default)]
    brand: String,
    #[serde(default)]
    count: Option<usize>,
}

fn validate(req: &TrackRequest, req_id: &RequestId) -> Result<(), ApiError> {
    if req.keyword.trim().is_empty() || req.brand.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0.clone(),
            "validation_error",
            "keyword and brand are required",
        ));
    }
    Ok(())
}

pub(super) async fn track_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<ApiResponse<TrackReport>>, ApiError> {
    validate(&req, &req_id)?;

    let Some(client) = state.providers.serpapi.as_ref() else {
        return Err(ApiError::new(
            req_id.0.clone(),
            "provider_not_configured",
            "SERPAPI_KEY is not set",
        ));
    };

    let options = rankrover_serpapi::TrackingOptions {
        count: normalize_count(req.count, state.config.tracker_search_count),
        max_retries: state.config.tracker_max_retries,
        backoff_base_ms: state.config.tracker_retry_backoff_base_ms,
    };

    let mut rng = StdRng::from_os_rng();
    let report =
        rankrover_serpapi::run_search_tracking(client, &req.keyword, &req.brand, options, &mut rng)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "search tracking run failed");
                ApiError::new(req_id.0.clone(), "upstream_error", e.to_string())
            })?;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn track_chatgpt(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<ApiResponse<TrackReport>>, ApiError> {
    let client = state.providers.openai.as_ref();
    run_chat_endpoint(&state, req_id, &req, client, "OPENAI_API_KEY").await
}

pub(super) async fn track_deepseek(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<ApiResponse<TrackReport>>, ApiError> {
    let client = state.providers.deepseek.as_ref();
    run_chat_endpoint(&state, req_id, &req, client, "DEEPSEEK_API_KEY").await
}

async fn run_chat_endpoint(
    state: &AppState,
    req_id: RequestId,
    req: &TrackRequest,
    client: Option<&ChatClient>,
    key_var: &str,
) -> Result<Json<ApiResponse<TrackReport>>, ApiError> {
    validate(req, &req_id)?;

    let Some(client) = client else {
        return Err(ApiError::new(
            req_id.0.clone(),
            "provider_not_configured",
            format!("{key_var} is not set"),
        ));
    };

    let options = rankrover_llm::TrackingOptions {
        count: normalize_count(req.count, state.config.tracker_search_count),
        max_retries: state.config.tracker_max_retries,
        backoff_base_ms: state.config.tracker_retry_backoff_base_ms,
    };

    let mut rng = StdRng::from_os_rng();
    let report =
        rankrover_llm::run_chat_tracking(client, &req.keyword, &req.brand, options, &mut rng).await;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}
