pub mod ai;

pub use ai::{AiClient, GeneratedReport, OpenAiClient};
