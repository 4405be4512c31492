//! Chat transcript and conversation flow
//!
//! [`Transcript`] is the list of rendered entries in the chat window.
//! [`Conversation`] wraps it with the session id and the request/reply
//! handling a client performs around `/chat` and `/reset`. Transport is
//! left to the caller: `begin_*` hands out the request body, `finish_*`
//! takes whatever came back.

use crate::markdown::{markdown_to_html, sanitize_html};
use crate::protocol::{non_empty, ChatReply, ChatRequest, ResetReply, ResetRequest};
use crate::session::{SessionId, SessionStore};
use std::fmt::{self, Display};

/// First bot message shown in an empty chat
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your AI assistant. How can I help you today?";

/// Shown when the server cannot be reached
pub const CONNECTION_ERROR: &str = "Error: Could not connect to the server.";

/// Shown after a successful reset
pub const RESET_NOTICE: &str = "Conversation has been reset. Start a new chat!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A single chat message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    /// Render as the chat window markup.
    ///
    /// User text is escaped into a paragraph; bot text goes through the
    /// markdown formatter.
    pub fn render_html(&self) -> String {
        let content = match self.sender {
            Sender::User => format!("<p>{}</p>", sanitize_html(&self.text)),
            Sender::Bot => markdown_to_html(&self.text),
        };
        format!(
            "<div class=\"message {}\"><div class=\"message-content\">{}</div></div>",
            self.sender.css_class(),
            content
        )
    }
}

/// One row of the chat window
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Message(Message),
    /// The three-dot "bot is typing" indicator
    Typing,
}

impl Entry {
    pub fn render_html(&self) -> String {
        match self {
            Entry::Message(message) => message.render_html(),
            Entry::Typing => "<div class=\"typing-indicator message bot\" id=\"typing-indicator\">\
                <span></span><span></span><span></span></div>"
                .to_string(),
        }
    }
}

/// Ordered chat window contents. The first entry is always the welcome message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(WELCOME_MESSAGE)
    }
}

impl Transcript {
    pub fn new(welcome: impl Into<String>) -> Self {
        Self {
            entries: vec![Entry::Message(Message::bot(welcome))],
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Messages only, skipping the typing indicator
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            Entry::Typing => None,
        })
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages().last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(Entry::Message(Message::user(text)));
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.entries.push(Entry::Message(Message::bot(text)));
    }

    pub fn is_typing(&self) -> bool {
        self.entries.iter().any(|entry| *entry == Entry::Typing)
    }

    /// Append the typing indicator; no-op when one is already shown
    pub fn show_typing(&mut self) {
        if !self.is_typing() {
            self.entries.push(Entry::Typing);
        }
    }

    pub fn hide_typing(&mut self) {
        self.entries.retain(|entry| *entry != Entry::Typing);
    }

    /// Drop everything after the welcome message
    pub fn clear_to_welcome(&mut self) {
        self.entries.truncate(1);
    }

    pub fn render_html(&self) -> String {
        self.entries.iter().map(Entry::render_html).collect()
    }
}

impl Display for Transcript {
    /// Plain-text view, one message per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in self.messages() {
            let who = match message.sender {
                Sender::User => "You",
                Sender::Bot => "Bot",
            };
            writeln!(f, "{}: {}", who, message.text)?;
        }
        Ok(())
    }
}

/// Client-side conversation: transcript plus the remembered session id
pub struct Conversation<S: SessionStore> {
    transcript: Transcript,
    store: S,
    session: Option<SessionId>,
}

impl<S: SessionStore> Conversation<S> {
    /// Start a conversation, picking up any session id the store remembers
    pub fn new(store: S) -> Self {
        Self::with_transcript(store, Transcript::default())
    }

    pub fn with_transcript(store: S, transcript: Transcript) -> Self {
        let session = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load stored session id");
                None
            }
        };

        Self {
            transcript,
            store,
            session,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a user message and build the `/chat` body.
    ///
    /// Returns `None` when the trimmed input is empty; nothing changes then.
    pub fn begin_send(&mut self, raw: &str) -> Option<ChatRequest> {
        let message = raw.trim();
        if message.is_empty() {
            return None;
        }

        self.transcript.push_user(message);
        self.transcript.show_typing();

        Some(ChatRequest {
            message: Some(message.to_string()),
            session_id: self.session.as_ref().map(|id| id.to_string()),
        })
    }

    /// Apply the outcome of a `/chat` call.
    pub fn finish_send<E: Display>(&mut self, outcome: Result<ChatReply, E>) {
        self.transcript.hide_typing();

        match outcome {
            Ok(reply) => {
                self.adopt_session(reply.session_id.as_deref());

                if let Some(response) = non_empty(reply.response.as_deref()) {
                    self.transcript.push_bot(response);
                } else if let Some(error) = non_empty(reply.error.as_deref()) {
                    self.transcript.push_bot(format!("Error: {}", error));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                self.transcript.push_bot(CONNECTION_ERROR);
            }
        }
    }

    /// Clear the window back to the welcome message and build the `/reset` body.
    pub fn begin_reset(&mut self) -> ResetRequest {
        self.transcript.clear_to_welcome();
        ResetRequest {
            session_id: self.session.as_ref().map(|id| id.to_string()),
        }
    }

    /// Like [`begin_reset`](Self::begin_reset), but switch to a freshly
    /// generated session id first.
    pub fn begin_new_session(&mut self) -> ResetRequest {
        let id = SessionId::generate();
        self.adopt_session(Some(id.as_str()));
        self.begin_reset()
    }

    /// Apply the outcome of a `/reset` call.
    ///
    /// Failures are only logged; the window stays cleared.
    pub fn finish_reset<E: Display>(&mut self, outcome: Result<ResetReply, E>) {
        match outcome {
            Ok(reply) => {
                if let Some(status) = reply.status.as_deref() {
                    tracing::info!(status, "Conversation reset");
                }
                self.adopt_session(reply.session_id.as_deref());
                self.transcript.push_bot(RESET_NOTICE);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reset request failed");
            }
        }
    }

    fn adopt_session(&mut self, id: Option<&str>) {
        let Some(id) = non_empty(id) else {
            return;
        };

        let id = SessionId::new(id);
        if let Err(e) = self.store.save(&id) {
            tracing::warn!(error = %e, "Could not persist session id");
        }
        self.session = Some(id);
    }
}
