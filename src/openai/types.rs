// Files, fine-tuning and chat completion request/response types

use serde::{Deserialize, Serialize};

use crate::chat::Role;

/// Uploaded file handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
    #[serde(default)]
    pub purpose: Option<String>,
}

/// Fine-tuning job as returned on creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTuningJob {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub training_file: Option<String>,
    #[serde(default)]
    pub fine_tuned_model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hyperparameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateFineTuningJobRequest {
    pub training_file: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperparameters: Option<Hyperparameters>,
}

impl CreateFineTuningJobRequest {
    pub fn new(training_file: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            training_file: training_file.into(),
            model: model.into(),
            validation_file: None,
            suffix: None,
            hyperparameters: None,
        }
    }

    /// Apply the optional job settings; unset values stay out of the request
    pub fn with_options(mut self, options: &JobOptions) -> Self {
        self.validation_file = options.validation_file.clone();
        self.suffix = options.suffix.clone();
        self.hyperparameters = options
            .n_epochs
            .map(|n| Hyperparameters { n_epochs: Some(n) });
        self
    }
}

/// Optional fields for job creation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobOptions {
    pub validation_file: Option<String>,
    pub suffix: Option<String>,
    pub n_epochs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice; `None` when there is no choice or its
    /// content is absent or empty
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|text| !text.is_empty())
    }
}
