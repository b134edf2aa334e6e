use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chattune",
    version,
    about = "Turn a chat export into a fine-tuning dataset and start a tuning job",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Explicit config file path
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct DatasetArgs {
    /// Chat export to read
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// JSONL dataset to write (overwritten)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the dataset, upload it and create a fine-tuning job (default)
    Train {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Base model to tune
        #[arg(long = "model")]
        model: Option<String>,

        /// Suffix for the tuned model name
        #[arg(long = "suffix")]
        suffix: Option<String>,

        /// Number of training epochs
        #[arg(long = "epochs")]
        n_epochs: Option<u32>,
    },

    /// Build and write the dataset only (no credential, no network)
    Prepare {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// List participants found in a written dataset
    Participants {
        /// Dataset to inspect (defaults to the configured output path)
        #[arg(long = "dataset")]
        dataset: Option<PathBuf>,
    },

    /// Talk to a tuned model as one of the participants
    Chat {
        /// Tuned model id (e.g. ft:gpt-4o-mini-2024-07-18:org::abc123)
        #[arg(long = "model")]
        model: String,

        /// Participant the model should impersonate
        #[arg(long = "as")]
        responder: String,

        /// Participant who is writing
        #[arg(long = "from")]
        writer: String,

        /// Message text
        #[arg(required = true)]
        message: Vec<String>,
    },
}
