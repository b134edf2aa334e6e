// Pipeline stages and stage-attributed failures

use std::fmt;
use thiserror::Error;

use crate::openai::ServiceError;

/// Linear pipeline state: Parse → Build → Serialize → Upload → Submit → Done.
/// A failure at any stage is terminal and reported as a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Build,
    Serialize,
    Upload,
    Submit,
    Done,
}

impl Stage {
    /// Console line printed when the stage starts
    pub fn banner(self) -> &'static str {
        match self {
            Stage::Parse => "⏳ Parsing chat export...",
            Stage::Build => "⏳ Building chat-based examples...",
            Stage::Serialize => "⏳ Writing JSONL dataset...",
            Stage::Upload => "📤 Uploading file for fine-tuning...",
            Stage::Submit => "🚀 Creating chat fine-tuning job...",
            Stage::Done => "✅ Done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Parse => "parse",
            Stage::Build => "build",
            Stage::Serialize => "serialize",
            Stage::Upload => "upload",
            Stage::Submit => "submit",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Why a stage failed
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Local(#[from] anyhow::Error),
}

/// Terminal failure of a run, tagged with the stage it happened in
#[derive(Debug, Error)]
#[error("{stage} stage failed")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: StageError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: impl Into<StageError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// The service error behind this failure, if the service caused it
    pub fn service_error(&self) -> Option<&ServiceError> {
        match &self.source {
            StageError::Service(e) => Some(e),
            StageError::Local(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Parse.to_string(), "parse");
        assert_eq!(Stage::Submit.to_string(), "submit");
        assert_eq!(Stage::Done.banner(), "✅ Done");
    }

    #[test]
    fn test_error_names_stage() {
        let err = PipelineError::new(Stage::Serialize, anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "serialize stage failed");
        assert!(err.service_error().is_none());

        let chain: Vec<String> = anyhow::Error::new(err).chain().map(|e| e.to_string()).collect();
        assert_eq!(chain, vec!["serialize stage failed", "disk full"]);
    }
}
