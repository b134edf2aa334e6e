// CLI module
// Argument parsing and subcommand handlers

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DatasetArgs, GlobalArgs};
pub use commands::{
    format_error, handle_chat, handle_participants, handle_prepare, handle_train, render_reply,
    TrainArgs,
};
