//! AI assistant bridge
//!
//! Wraps the generative-language client with three modes: one-shot insight
//! generation from structured farm context, single-turn context-injected
//! chat, and multi-turn chat replaying prior turns as conversation history.
//! The multi-turn path falls back to the single-turn path; when every path
//! fails, the caller gets a fixed retry message instead of an error page.

use std::fmt::Write as _;

use shared::{ChatMessage, ChatRole, CropHealthData, Farm, FarmContext, HealthIndex, WeatherData};

use crate::error::AppResult;
use crate::external::gemini::{GeminiClient, GeminiContent, GenerationConfig};

/// Fixed message surfaced when all chat paths fail
pub const CHAT_FALLBACK_MESSAGE: &str = "Failed to get AI response. Please try again.";

/// Fixed message surfaced when insight generation fails
pub const INSIGHTS_FAILURE_MESSAGE: &str = "Failed to generate AI insights. Please try again.";

/// Assistant service
#[derive(Clone)]
pub struct AssistantService {
    gemini: GeminiClient,
}

fn or_na<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".into())
}

fn latest_index(data: Option<&CropHealthData>, index: HealthIndex) -> Option<f64> {
    data.and_then(|d| d.latest_value(index)).map(|(_, v)| v)
}

impl AssistantService {
    /// Create a new AssistantService instance
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    /// One-shot farming insights from structured farm/weather/health context.
    ///
    /// A user query, when present, replaces the canned analysis prompt.
    pub async fn generate_insights(
        &self,
        farm: Option<&Farm>,
        weather: Option<&WeatherData>,
        crop_health: Option<&CropHealthData>,
        user_query: Option<String>,
    ) -> AppResult<String> {
        let prompt =
            user_query.unwrap_or_else(|| build_insights_prompt(farm, weather, crop_health));
        self.gemini.generate(prompt).await
    }

    /// Single-turn chat: context and history are injected into one prompt
    pub async fn chat(
        &self,
        message: &str,
        context: &FarmContext,
        history: &[ChatMessage],
    ) -> AppResult<String> {
        let prompt = build_context_prompt(message, context, history);
        self.gemini.generate(prompt).await
    }

    /// Multi-turn chat: prior turns are replayed as conversation history.
    /// Falls back to the single-turn path when the provider rejects the
    /// history form.
    pub async fn chat_advanced(
        &self,
        message: &str,
        context: &FarmContext,
        history: &[ChatMessage],
    ) -> AppResult<String> {
        let mut contents: Vec<GeminiContent> = history.iter().map(GeminiContent::from).collect();
        contents.push(GeminiContent::user(build_contextual_message(
            message, context,
        )));

        match self
            .gemini
            .generate_with(contents, Some(GenerationConfig::default()))
            .await
        {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!("Multi-turn chat failed, falling back to single-turn: {}", e);
                self.chat(message, context, history).await
            }
        }
    }

    /// Full chat flow with the terminal fallback applied: never fails,
    /// degrading to [`CHAT_FALLBACK_MESSAGE`] when every path errored.
    pub async fn chat_with_fallback(
        &self,
        message: &str,
        context: &FarmContext,
        history: &[ChatMessage],
    ) -> String {
        match self.chat_advanced(message, context, history).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("All chat paths failed: {}", e);
                CHAT_FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

/// Canned analysis prompt over the full farm context
fn build_insights_prompt(
    farm: Option<&Farm>,
    weather: Option<&WeatherData>,
    crop_health: Option<&CropHealthData>,
) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "As an expert agricultural AI assistant, analyze the following farm data and provide actionable insights:\n"
    );
    let _ = writeln!(prompt, "Farm Information:");
    let _ = writeln!(
        prompt,
        "- Field ID: {}",
        or_na(farm.map(|f| f.field_id.clone()))
    );
    let _ = writeln!(prompt, "- Crop: {}", or_na(farm.map(|f| f.crop.clone())));
    let _ = writeln!(
        prompt,
        "- Location: {}",
        or_na(farm.map(|f| f.location.clone()))
    );
    let _ = writeln!(
        prompt,
        "- Field Area: {} sq.m\n",
        or_na(crop_health.map(|c| c.field_area_sq_m))
    );

    let _ = writeln!(prompt, "Crop Health Indices:");
    let _ = writeln!(
        prompt,
        "- NDVI: {}",
        or_na(latest_index(crop_health, HealthIndex::Ndvi))
    );
    let _ = writeln!(
        prompt,
        "- EVI: {}",
        or_na(latest_index(crop_health, HealthIndex::Evi))
    );
    let _ = writeln!(
        prompt,
        "- LAI: {}",
        or_na(latest_index(crop_health, HealthIndex::Lai))
    );
    let _ = writeln!(
        prompt,
        "- NDMI: {}",
        or_na(latest_index(crop_health, HealthIndex::Ndmi))
    );
    let _ = writeln!(
        prompt,
        "- Soil Organic Carbon: {}%\n",
        or_na(latest_index(crop_health, HealthIndex::Soc))
    );

    let _ = writeln!(prompt, "Weather Forecast:");
    match weather {
        Some(weather) if !weather.daily.is_empty() => {
            for (i, day) in weather.daily.iter().take(3).enumerate() {
                let _ = writeln!(
                    prompt,
                    "Day {}: {}, Temp: {}°C, Rain: {}%",
                    i + 1,
                    day.description,
                    day.max_celsius(),
                    day.rain_percent()
                );
            }
        }
        _ => {
            let _ = writeln!(prompt, "Weather data unavailable");
        }
    }

    let _ = writeln!(
        prompt,
        "\nPlease provide:\n\
         1. Overall crop health assessment\n\
         2. Specific recommendations for irrigation, fertilization, and pest management\n\
         3. Weather-based action items for the next 3 days\n\
         4. Any alerts or warnings based on the data\n\
         5. Optimization suggestions for better yield\n\n\
         Keep the response practical, actionable, and farmer-friendly."
    );

    prompt
}

/// Single-turn prompt with context and the conversation so far inlined
fn build_context_prompt(message: &str, context: &FarmContext, history: &[ChatMessage]) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are an expert agricultural AI assistant helping farmers optimize their operations.\n"
    );
    let _ = writeln!(prompt, "Current Farm Context:");
    let _ = writeln!(prompt, "- Field ID: {}", or_na(context.field_id.clone()));
    let _ = writeln!(prompt, "- Crop: {}", or_na(context.crop.clone()));
    let _ = writeln!(prompt, "- Location: {}", or_na(context.location.clone()));
    let _ = writeln!(
        prompt,
        "- Field Area: {} sq.m",
        or_na(context.field_area_sq_m)
    );
    let _ = writeln!(
        prompt,
        "- Current Health Indices: NDVI: {}, EVI: {}, LAI: {}\n",
        or_na(context.ndvi),
        or_na(context.evi),
        or_na(context.lai)
    );

    let _ = writeln!(prompt, "Conversation History:");
    for turn in history {
        let role = match turn.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };
        let _ = writeln!(prompt, "{}: {}", role, turn.content);
    }

    let _ = writeln!(prompt, "\nUser Question: {}\n", message);
    let _ = writeln!(
        prompt,
        "Please provide a helpful, accurate, and practical response based on modern \
         agricultural practices and the farm context provided. Keep responses concise \
         but informative."
    );

    prompt
}

/// Contextual message for the multi-turn path: compact context plus the
/// question, sent as the newest user turn
fn build_contextual_message(message: &str, context: &FarmContext) -> String {
    format!(
        "Farm Context: Field ID: {}, Crop: {}, Location: {}\n\
         Health Indices: NDVI: {}, EVI: {}, LAI: {}\n\n\
         Question: {}",
        or_na(context.field_id.clone()),
        or_na(context.crop.clone()),
        or_na(context.location.clone()),
        or_na(context.ndvi),
        or_na(context.evi),
        or_na(context.lai),
        message
    )
}
