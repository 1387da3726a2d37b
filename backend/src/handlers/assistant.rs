//! AI assistant HTTP handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{ChatMessage, FarmContext};

use crate::error::{AppError, AppResult};
use crate::services::assistant::INSIGHTS_FAILURE_MESSAGE;
use crate::services::{AssistantService, DashboardService, FarmService};
use crate::AppState;

/// Request for one-shot farming insights
#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    /// Farm to build structured context from; optional
    pub farm_id: Option<Uuid>,
    /// Free-text query replacing the canned analysis prompt
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: String,
}

/// Generate farming insights from structured farm/weather/health context
pub async fn generate_insights(
    State(state): State<AppState>,
    Json(request): Json<InsightsRequest>,
) -> AppResult<Json<InsightsResponse>> {
    let mut farm = None;
    let mut snapshot = None;

    if let Some(farm_id) = request.farm_id {
        let fetched = FarmService::new(state.db.clone()).get(farm_id).await?;
        let dashboard =
            DashboardService::new(state.weather_client(), state.crop_health_client());
        // Failed sections degrade to N/A in the prompt, not to an error
        snapshot = dashboard.field_snapshot(&fetched.field_id).await.ok();
        farm = Some(fetched);
    }

    let service = AssistantService::new(state.gemini_client());
    let insights = service
        .generate_insights(
            farm.as_ref(),
            snapshot.as_ref().and_then(|s| s.weather.as_ref()),
            snapshot.as_ref().and_then(|s| s.crop_health.as_ref()),
            request.query,
        )
        .await
        .map_err(|e| {
            tracing::error!("Insight generation failed: {}", e);
            AppError::Assistant(INSIGHTS_FAILURE_MESSAGE.to_string())
        })?;

    Ok(Json(InsightsResponse { insights }))
}

/// Chat request: a message, optional farm context, optional prior turns
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: FarmContext,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Chat with the assistant. The multi-turn path is tried first, then the
/// single-turn path; a fixed retry message is returned when both fail.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    let service = AssistantService::new(state.gemini_client());
    let reply = service
        .chat_with_fallback(&request.message, &request.context, &request.history)
        .await;

    Ok(Json(ChatResponse { reply }))
}
