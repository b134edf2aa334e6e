// Subcommand handlers

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;

use super::args::{DatasetArgs, GlobalArgs};
use crate::chat::{strip_speaker_prefix, system_prompt, ExampleBuilder, Role};
use crate::config::{api_key_from_env, load_config, Config};
use crate::dataset::{extract_participants, parse_jsonl_lenient};
use crate::openai::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, JobOptions, OpenAIClient,
    ServiceConfig, ServiceError,
};
use crate::pipeline::{prepare_dataset, Pipeline, PipelineError};

/// Options for `train` beyond the shared dataset paths
#[derive(Debug, Default, Clone)]
pub struct TrainArgs {
    pub dataset: DatasetArgs,
    pub model: Option<String>,
    pub suffix: Option<String>,
    pub n_epochs: Option<u32>,
}

pub async fn handle_train(global: &GlobalArgs, args: &TrainArgs) -> Result<()> {
    // Credential first: nothing is read, written or sent without it
    let api_key = api_key_from_env()?;

    let mut config = load_config(global.config.as_deref())?;
    apply_dataset_args(&mut config, &args.dataset);
    if let Some(model) = &args.model {
        config.base_model = model.clone();
    }
    if args.suffix.is_some() {
        config.suffix = args.suffix.clone();
    }
    if args.n_epochs.is_some() {
        config.n_epochs = args.n_epochs;
    }
    config.validate()?;

    let service = OpenAIClient::new(service_config(api_key, &config))?;
    let options = JobOptions {
        validation_file: config.validation_file.clone(),
        suffix: config.suffix.clone(),
        n_epochs: config.n_epochs,
    };

    let report = Pipeline::new(&service)
        .with_builder(ExampleBuilder::new(&config.skip_markers))
        .with_job_options(options)
        .run(&config.input_path, &config.output_path)
        .await?;

    println!("✅ Fine-tuning job started!");
    println!("Fine-tune job ID: {}", report.job.id);
    println!("Status: {}", report.job.status);
    Ok(())
}

pub fn handle_prepare(global: &GlobalArgs, args: &DatasetArgs) -> Result<()> {
    let mut config = load_config(global.config.as_deref())?;
    apply_dataset_args(&mut config, args);

    let prepared = prepare_dataset(
        &ExampleBuilder::new(&config.skip_markers),
        &config.input_path,
        &config.output_path,
        true,
    )?;

    println!("Parsed lines: {}", prepared.lines_parsed);
    println!(
        "Examples: {} ({} of {} pairs skipped)",
        prepared.examples(),
        prepared.stats.skipped,
        prepared.stats.pairs
    );
    if let Some((first, last)) = prepared.span {
        println!("Conversation span: {} → {}", first, last);
    }
    Ok(())
}

pub fn handle_participants(global: &GlobalArgs, dataset: Option<&std::path::Path>) -> Result<()> {
    let config = load_config(global.config.as_deref())?;
    let path = dataset.unwrap_or(config.output_path.as_path());

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    let participants = extract_participants(&parse_jsonl_lenient(&data));

    if participants.is_empty() {
        println!("No participants found in {}", path.display());
    } else {
        for name in participants {
            println!("{}", name);
        }
    }
    Ok(())
}

pub async fn handle_chat(
    global: &GlobalArgs,
    model: &str,
    responder: &str,
    writer: &str,
    message: &str,
) -> Result<()> {
    let api_key = api_key_from_env()?;
    let config = load_config(global.config.as_deref())?;

    let client = OpenAIClient::new(service_config(api_key, &config))?;
    let request = impersonation_request(&config, model, responder, writer, message);
    let response = client.chat_completion(&request).await?;

    println!("{}", render_reply(&response, responder));
    Ok(())
}

/// `responder: reply`, with any echoed speaker prefix removed.
/// A missing or empty reply renders as `No response`.
pub fn render_reply(response: &ChatCompletionResponse, responder: &str) -> String {
    let reply = response.text().unwrap_or("No response");
    format!("{}: {}", responder, strip_speaker_prefix(reply, responder))
}

/// Chat request asking `model` to answer `writer` as `responder`
pub fn impersonation_request(
    config: &Config,
    model: &str,
    responder: &str,
    writer: &str,
    message: &str,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::new(Role::System, system_prompt(responder)),
            ChatMessage::new(Role::User, format!("{}: {}", writer, message)),
        ],
        temperature: Some(config.chat_temperature),
        max_tokens: Some(config.chat_max_tokens),
    }
}

/// Operator-facing failure report: stage, then the service's status,
/// headers and body when the service rejected a call, else the error chain.
pub fn format_error(err: &anyhow::Error) -> String {
    let mut out = String::from("❌ ERROR OCCURRED\n");

    let pipeline = err.downcast_ref::<PipelineError>();
    if let Some(pipeline) = pipeline {
        let _ = writeln!(out, "Stage: {}", pipeline.stage);
    }

    let service = pipeline
        .and_then(PipelineError::service_error)
        .or_else(|| err.downcast_ref::<ServiceError>());

    match service {
        Some(ServiceError::Api {
            operation,
            status,
            headers,
            body,
        }) => {
            let _ = writeln!(out, "🔴 {} rejected", operation);
            let _ = writeln!(out, "🔴 Status: {}", status);
            let _ = writeln!(out, "🔴 Headers: {:?}", headers);
            let _ = writeln!(out, "🔴 Data: {}", body);
        }
        _ => {
            let _ = writeln!(out, "⚠️ {}", err);
            for cause in err.chain().skip(1) {
                let _ = writeln!(out, "   caused by: {}", cause);
            }
        }
    }

    out
}

fn apply_dataset_args(config: &mut Config, args: &DatasetArgs) {
    if let Some(input) = &args.input {
        config.input_path = input.clone();
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
}

fn service_config(api_key: String, config: &Config) -> ServiceConfig {
    ServiceConfig::new(api_key)
        .with_base_url(config.base_url.clone())
        .with_base_model(config.base_model.clone())
}
