//! Predictor trait and optional capability interfaces

use async_trait::async_trait;
use predikit_core::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionRequest,
    CompletionResponse, Result,
};

/// A user-supplied predictor component.
///
/// The accessors expose the optional capability interfaces the concrete type
/// implements. A predictor with no capabilities is valid; the server simply
/// exposes no inference surface for it.
pub trait Predictor: Send + Sync {
    /// Chat-template application, if supported
    fn as_chat_templating(&self) -> Option<&dyn ChatTemplating> {
        None
    }

    /// Plain text completion, if supported
    fn as_completion(&self) -> Option<&dyn TextCompletion> {
        None
    }

    /// Chat completion, if supported
    fn as_chat_completion(&self) -> Option<&dyn ChatCompletion> {
        None
    }
}

/// Renders a conversation into a single prompt string
#[async_trait]
pub trait ChatTemplating: Send + Sync {
    async fn apply_chat_template(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Serves plain text completions
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn create_completion(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

/// Serves chat completions
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

/// Capability flags derived from a predictor instance after construction.
///
/// Advisory metadata: request routing consults these to decide which API
/// surfaces to expose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// The component can render chat templates
    pub chat_template: bool,
    /// The component can serve plain completions
    pub completion: bool,
    /// The component can serve chat completions
    pub chat_completion: bool,
}

impl Capabilities {
    /// Derive the flags from a predictor's capability accessors
    pub fn probe(predictor: &dyn Predictor) -> Self {
        Self {
            chat_template: predictor.as_chat_templating().is_some(),
            completion: predictor.as_completion().is_some(),
            chat_completion: predictor.as_chat_completion().is_some(),
        }
    }

    /// True when at least one capability is present
    pub fn any(&self) -> bool {
        self.chat_template || self.completion || self.chat_completion
    }
}
