//! Core traits and types for the coaching simulator
//!
//! This crate provides foundational types used across all other crates:
//! - Conversation turns and the rolling history window
//! - Completion request/response types
//! - The `CompletionModel` trait for pluggable providers
//! - Error types

pub mod completion;
pub mod conversation;
pub mod error;
pub mod traits;

pub use completion::{CompletionParams, CompletionRequest, Message, Role};
pub use conversation::{History, Turn, TurnRole};
pub use error::{Error, Result};
pub use traits::CompletionModel;
