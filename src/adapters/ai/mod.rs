//! Language model adapters.

mod mock;
mod openai;

pub use mock::{MockLanguageModel, QueuedReply};
pub use openai::{OpenAiConfig, OpenAiModel};
