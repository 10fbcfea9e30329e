//! LLM client module for tripdaemon
//!
//! Provides best-effort completion requests for the enrichment layer. A
//! missing credential simply means no client is created; the planner always
//! has a deterministic path that needs none of this.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client if the configured credential is available
///
/// Returns `None` when the API key environment variable is unset; the caller
/// falls back to fully deterministic behavior in that case.
pub fn maybe_create_client(config: &LlmConfig) -> Option<Arc<dyn LlmClient>> {
    debug!(provider = %config.provider, model = %config.model, "maybe_create_client: called");
    if config.provider != "anthropic" {
        debug!(provider = %config.provider, "maybe_create_client: unknown provider, enrichment disabled");
        return None;
    }
    match AnthropicClient::from_config(config) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            debug!(error = %e, "maybe_create_client: no client, enrichment disabled");
            None
        }
    }
}
