//! Echo predictor plugin for the Predikit server.
//!
//! A reference predictor used in development and deployment smoke tests: it
//! echoes prompts back, annotated with the model version it was provisioned
//! with. Requests the `model` handle so a full platform round-trip is
//! exercised at startup.

use async_trait::async_trait;
use predikit_core::{
    types, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    CompletionChoice, CompletionRequest, CompletionResponse, Error, Result, Usage,
};
use predikit_plugin::{ChatCompletion, Handles, ModelHandle, Predictor, TextCompletion};

/// Predictor that echoes the input back through the loaded model identity
pub struct EchoPredictor {
    model: ModelHandle,
}

impl EchoPredictor {
    /// Constructor invoked by the host with the provisioned handles
    pub fn from_handles(handles: Handles) -> Result<Box<dyn Predictor>> {
        let model = handles
            .model
            .ok_or_else(|| Error::provision("echo predictor requires the 'model' handle"))?;
        Ok(Box::new(Self { model }))
    }

    fn tag(&self) -> String {
        format!("[{} v{}]", self.model.name, self.model.version)
    }
}

impl Predictor for EchoPredictor {
    fn as_completion(&self) -> Option<&dyn TextCompletion> {
        Some(self)
    }

    fn as_chat_completion(&self) -> Option<&dyn ChatCompletion> {
        Some(self)
    }
}

#[async_trait]
impl TextCompletion for EchoPredictor {
    async fn create_completion(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let text = format!("{} {}", self.tag(), request.prompt);
        let completion_tokens = text.split_whitespace().count() as u32;

        Ok(CompletionResponse {
            id: types::response_id("cmpl"),
            object: "text_completion".to_string(),
            created: types::unix_timestamp(),
            model: request.model,
            choices: vec![CompletionChoice {
                index: 0,
                text,
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::new(request.prompt.split_whitespace().count() as u32, completion_tokens),
        })
    }
}

#[async_trait]
impl ChatCompletion for EchoPredictor {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let last_user = request
            .messages
            .iter()
            .rev()
            .find(|message| message.role == "user")
            .map(|message| message.content.as_str())
            .unwrap_or_default();
        let reply = format!("{} {}", self.tag(), last_user);
        let completion_tokens = reply.split_whitespace().count() as u32;

        Ok(ChatCompletionResponse {
            id: types::response_id("chatcmpl"),
            object: "chat.completion".to_string(),
            created: types::unix_timestamp(),
            model: request.model,
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage::assistant(reply),
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::new(0, completion_tokens),
        })
    }
}

predikit_plugin::declare_predictor! {
    requires: ["model"],
    construct: EchoPredictor::from_handles,
}
