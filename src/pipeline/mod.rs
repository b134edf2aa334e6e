// Chat export → JSONL dataset → uploaded file → fine-tuning job
//
// Every step is awaited in order; the first failure ends the run and is
// attributed to its stage. Nothing is retried or cleaned up, so a dataset
// that was written stays on disk even if the upload fails.

mod stage;

pub use stage::{PipelineError, Stage, StageError};

use anyhow::Context;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chat::{parse_export, BuildStats, ExampleBuilder};
use crate::dataset::write_dataset;
use crate::openai::{CreateFineTuningJobRequest, FileObject, FineTuningJob, JobOptions, TrainingService};

/// Outcome of the local stages (Parse, Build, Serialize)
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub path: PathBuf,
    /// Chat lines that matched the export format
    pub lines_parsed: usize,
    pub stats: BuildStats,
    /// First and last parsable timestamps of the conversation
    pub span: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl PreparedDataset {
    pub fn examples(&self) -> usize {
        self.stats.emitted
    }
}

/// Outcome of a full run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub dataset: PreparedDataset,
    pub file: FileObject,
    pub job: FineTuningJob,
}

/// Sequential dataset preparation and job submission
pub struct Pipeline<'a> {
    service: &'a dyn TrainingService,
    builder: ExampleBuilder,
    options: JobOptions,
    show_progress: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(service: &'a dyn TrainingService) -> Self {
        Self {
            service,
            builder: ExampleBuilder::default(),
            options: JobOptions::default(),
            show_progress: true,
        }
    }

    pub fn with_builder(mut self, builder: ExampleBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_job_options(mut self, options: JobOptions) -> Self {
        self.options = options;
        self
    }

    /// Suppress console progress lines (tracing output is unaffected)
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Run every stage: Parse → Build → Serialize → Upload → Submit → Done.
    pub async fn run(&self, input: &Path, output: &Path) -> Result<PipelineReport, PipelineError> {
        let dataset = prepare_dataset(&self.builder, input, output, self.show_progress)?;

        progress(self.show_progress, Stage::Upload);
        let file = self
            .service
            .upload_training_file(&dataset.path)
            .await
            .map_err(|e| PipelineError::new(Stage::Upload, e))?;
        tracing::info!(file_id = %file.id, "Uploaded training file");
        if self.show_progress {
            println!("File uploaded successfully! File ID: {}", file.id);
        }

        progress(self.show_progress, Stage::Submit);
        let request = CreateFineTuningJobRequest::new(file.id.clone(), self.service.base_model())
            .with_options(&self.options);
        let job = self
            .service
            .create_fine_tuning_job(&request)
            .await
            .map_err(|e| PipelineError::new(Stage::Submit, e))?;
        tracing::info!(job_id = %job.id, status = %job.status, "Created fine-tuning job");
        progress(self.show_progress, Stage::Done);

        Ok(PipelineReport { dataset, file, job })
    }
}

/// Run the local stages only: read and parse the export, build examples and
/// write them to `output`. Needs no credential and touches no network.
pub fn prepare_dataset(
    builder: &ExampleBuilder,
    input: &Path,
    output: &Path,
    show_progress: bool,
) -> Result<PreparedDataset, PipelineError> {
    progress(show_progress, Stage::Parse);
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read chat export: {}", input.display()))
        .map_err(|e| PipelineError::new(Stage::Parse, e))?;
    let lines = parse_export(&raw);
    tracing::info!(lines = lines.len(), "Parsed chat export");

    progress(show_progress, Stage::Build);
    let (examples, stats) = builder.build_with_stats(&lines);

    progress(show_progress, Stage::Serialize);
    write_dataset(&examples, output).map_err(|e| PipelineError::new(Stage::Serialize, e))?;
    if show_progress {
        println!("✅ Created JSONL file at: {}", output.display());
    }

    let mut timestamps = lines.iter().filter_map(|l| l.timestamp());
    let span = timestamps.next().map(|first| {
        let last = timestamps.last().unwrap_or(first);
        (first, last)
    });

    Ok(PreparedDataset {
        path: output.to_path_buf(),
        lines_parsed: lines.len(),
        stats,
        span,
    })
}

fn progress(enabled: bool, stage: Stage) {
    tracing::debug!(%stage, "Entering stage");
    if enabled {
        println!("{}", stage.banner());
    }
}
