//! Chat message models for the AI assistant

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of an assistant conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Farm context injected into assistant prompts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FarmContext {
    pub field_id: Option<String>,
    pub crop: Option<String>,
    pub location: Option<String>,
    pub field_area_sq_m: Option<f64>,
    pub ndvi: Option<f64>,
    pub evi: Option<f64>,
    pub lai: Option<f64>,
}
