//! Predikit Core
//!
//! Core types and utilities shared across Predikit components.
//!
//! This crate provides:
//! - Error types and result handling
//! - Chat and completion API types exchanged with predictor components

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionChoice,
    CompletionRequest, CompletionResponse, Usage,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionRequest,
        CompletionResponse, Usage,
    };
}
