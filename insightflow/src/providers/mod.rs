//! External completion service.
//!
//! The pipeline's `perplexity` phase and the completion-backed transcript
//! processor talk to a chat-completions API through [`CompletionService`].

mod completion;
#[cfg(feature = "http")]
mod perplexity;

pub use completion::{
    command_prompt, parse_chat_response, ChatMessage, ChatRequest, CompletionResponse,
    CompletionService,
};
#[cfg(test)]
pub use completion::MockCompletionService;
#[cfg(feature = "http")]
pub use perplexity::PerplexityClient;
