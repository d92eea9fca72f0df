//! Chat-completion transport for endpoint analysis.
//!
//! [`ChatRequest::for_context`] wraps an assembled endpoint context in the
//! fixed analysis prompt, [`HttpChatClient`] posts it to an OpenAI-compatible
//! provider and [`dispatch`] runs the call on a worker thread.

mod client;
pub mod config;
mod dispatch;
pub mod error;

pub use client::{
    ChatClient, ChatMessage, ChatRequest, HttpChatClient, CONNECT_TIMEOUT, SYSTEM_PROMPT,
    TEMPERATURE,
};
pub use config::{LlmConfig, Provider, API_KEY_ENV, CONFIG_FILE};
pub use dispatch::{dispatch, CancelHandle, PendingAnalysis};
pub use error::{ConfigError, TransportError};
