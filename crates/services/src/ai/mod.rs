mod client;
mod config;

pub use client::{ChatCompletionsClient, ModelClient};
pub use config::ModelConfig;
