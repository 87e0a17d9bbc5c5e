mod payload;
mod prompt;
mod retry;
mod service;

pub use payload::{extract_payload, parse_record};
pub use prompt::PromptBuilder;
pub use retry::RetryPolicy;
pub use service::WordGenerator;
