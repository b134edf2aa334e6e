// HTTP client for the OpenAI Files, Fine-tuning and Chat Completions APIs
//
// Works against any OpenAI-compatible base URL, which is also how the tests
// point it at a local mock server.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::Path;

use super::error::ServiceError;
use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, CreateFineTuningJobRequest, FileObject,
    FineTuningJob,
};
use super::TrainingService;
use crate::config::constants::{DEFAULT_BASE_MODEL, DEFAULT_BASE_URL, FINE_TUNE_PURPOSE};

const JSONL_MIME: &str = "application/jsonl";

/// Explicit handle for the training service: credential, endpoint, base model
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_key: String,
    pub base_url: String,
    pub base_model: String,
}

impl ServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            base_model: DEFAULT_BASE_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_base_model(mut self, base_model: impl Into<String>) -> Self {
        self.base_model = base_model.into();
        self
    }
}

pub struct OpenAIClient {
    client: Client,
    config: ServiceConfig,
}

impl OpenAIClient {
    /// No request timeout is set: a hung call hangs the run.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Upload a file with the given purpose tag
    pub async fn upload_file(&self, path: &Path, purpose: &str) -> Result<FileObject, ServiceError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ServiceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "training_data.jsonl".to_string());

        tracing::debug!(file = %file_name, bytes = bytes.len(), purpose, "Uploading file");

        let part = Part::bytes(bytes).file_name(file_name).mime_str(JSONL_MIME)?;
        let form = Form::new().text("purpose", purpose.to_string()).part("file", part);

        let response = self
            .client
            .post(self.url("files"))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        parse_response(response, "File upload").await
    }

    pub async fn create_job(
        &self,
        request: &CreateFineTuningJobRequest,
    ) -> Result<FineTuningJob, ServiceError> {
        tracing::debug!("Creating fine-tuning job: {:?}", request);

        let response = self
            .client
            .post(self.url("fine_tuning/jobs"))
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        parse_response(response, "Fine-tuning job creation").await
    }

    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ServiceError> {
        tracing::debug!("Sending chat completion request: {:?}", request);

        let response = self
            .client
            .post(self.url("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        parse_response(response, "Chat completion").await
    }
}

/// Turn a non-success status into `ServiceError::Api`, otherwise decode JSON
async fn parse_response<T: DeserializeOwned>(
    response: Response,
    operation: &'static str,
) -> Result<T, ServiceError> {
    let status = response.status();

    if !status.is_success() {
        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Api {
            operation,
            status,
            headers,
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ServiceError::Decode(format!("{} response: {} ({})", operation, e, body)))
}

#[async_trait]
impl TrainingService for OpenAIClient {
    async fn upload_training_file(&self, path: &Path) -> Result<FileObject, ServiceError> {
        self.upload_file(path, FINE_TUNE_PURPOSE).await
    }

    async fn create_fine_tuning_job(
        &self,
        request: &CreateFineTuningJobRequest,
    ) -> Result<FineTuningJob, ServiceError> {
        self.create_job(request).await
    }

    fn base_model(&self) -> &str {
        &self.config.base_model
    }
}
