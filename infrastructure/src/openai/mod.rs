//! OpenAI-compatible chat-completions adapter.
//!
//! [`OpenAiGateway`] implements the
//! [`LlmGateway`](arena_application::LlmGateway) port over HTTPS. Each
//! [`OpenAiSession`] keeps its own message list, so the full exchange can be
//! stored as a round's message history.

pub mod gateway;
pub mod session;

pub use gateway::{OpenAiGateway, OpenAiSettings};
pub use session::OpenAiSession;
