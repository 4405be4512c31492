//! echobot Core - shared logic for the static chatbot stand-in
//!
//! This crate holds everything that does not need a socket:
//! - Wire types exchanged between the page and the function
//! - The bot-text sanitizer and markdown formatter
//! - The chat transcript and conversation model driven by clients
//! - Session id storage (the local-storage analogue)

pub mod markdown;
pub mod protocol;
pub mod session;
pub mod transcript;

// Re-exports for convenient access
pub use markdown::{markdown_to_html, sanitize_html};
pub use protocol::{
    ChatReply, ChatRequest, ChatResponse, ErrorBody, ResetReply, ResetRequest, ResetResponse,
    DEFAULT_SESSION_ID,
};
pub use session::{FileStore, MemoryStore, SessionError, SessionId, SessionStore, STORAGE_KEY};
pub use transcript::{Conversation, Entry, Message, Sender, Transcript};
