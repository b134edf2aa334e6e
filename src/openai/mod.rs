// Training service access
//
// The pipeline talks to the service only through `TrainingService`, so a test
// double can stand in for the real HTTP client.

use async_trait::async_trait;
use std::path::Path;

pub mod client;
pub mod error;
pub mod types;

pub use client::{OpenAIClient, ServiceConfig};
pub use error::ServiceError;
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CreateFineTuningJobRequest,
    FileObject, FineTuningJob, Hyperparameters, JobOptions,
};

/// Operations the pipeline needs from a fine-tuning service
#[async_trait]
pub trait TrainingService: Send + Sync {
    /// Upload a JSONL dataset tagged as fine-tuning data
    async fn upload_training_file(&self, path: &Path) -> Result<FileObject, ServiceError>;

    /// Start a tuning job for an uploaded file
    async fn create_fine_tuning_job(
        &self,
        request: &CreateFineTuningJobRequest,
    ) -> Result<FineTuningJob, ServiceError>;

    /// Model new jobs are based on
    fn base_model(&self) -> &str;
}
