//! Design assistant chat: replies to free-form questions about floor plans and keeps
//! per-user chat transcripts.
//!
//! A reply is first requested from a [`CompletionClient`]. When the client is unavailable
//! or fails, the [`FallbackResponder`] answers from a fixed keyword table, so a reply is
//! always produced for a non-blank message.

pub use self::{assistant::*, chat::*, client::*, fallback::*};

mod assistant;
mod chat;
mod client;
mod fallback;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CompletionError {
    #[display("message is required")]
    EmptyPrompt,
    #[display("no completion service configured")]
    Unavailable,
    #[display("completion service failed: {message}")]
    Failed { message: String },
}
