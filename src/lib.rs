// chattune - chat export to fine-tuning job
// Library exports

pub mod chat;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod openai;
pub mod pipeline;
