// src/client/session.rs
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use super::{
    conversation::{Conversation, Message},
    reply::extract_reply_text,
    transport::{ChatTransport, TransportError},
};

pub const GREETING: &str = "**Hello!** I’m your AI Risk Sentinel. Describe your use case to uncover hidden compliance risks. 🛡️";
pub const GENERIC_FAILURE: &str = "Sorry, I'm having trouble connecting to the AI agent right now.";

const FLOATING_SUGGESTIONS: &[&str] = &[
    "What are the main AI risks?",
    "How do I ensure compliance?",
    "Is my Chatbot high risk?",
];

const COPILOT_SUGGESTIONS: &[&str] = &[
    "Summarize Risks",
    "Check ISO Gaps",
    "Draft Compliance Report",
    "Analyze New Regulations",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Widget {
    Floating,
    Copilot,
}

impl Widget {
    pub fn greeting(self) -> Option<&'static str> {
        match self {
            Widget::Floating => Some(GREETING),
            Widget::Copilot => None,
        }
    }

    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            Widget::Floating => FLOATING_SUGGESTIONS,
            Widget::Copilot => COPILOT_SUGGESTIONS,
        }
    }

    pub fn failure_text(self, err: &TransportError) -> String {
        match self {
            Widget::Floating => format!("Error: {err}"),
            Widget::Copilot => GENERIC_FAILURE.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    EmptyInput,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Replied(Message),
    Rejected(Rejection),
}

/// Clears the pending flag when the exchange finishes or is dropped.
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PendingGuard(flag))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Client-side chat state for one widget instance. At most one request is
/// in flight; every accepted send appends one user and one assistant message.
pub struct ChatSession<T> {
    widget: Widget,
    transport: T,
    conversation: RwLock<Conversation>,
    input: RwLock<String>,
    pending: AtomicBool,
}

impl<T: ChatTransport> ChatSession<T> {
    pub fn new(widget: Widget, transport: T) -> Self {
        let mut conversation = Conversation::new();
        if let Some(greeting) = widget.greeting() {
            conversation.push(Message::assistant(greeting));
        }

        Self {
            widget,
            transport,
            conversation: RwLock::new(conversation),
            input: RwLock::new(String::new()),
            pending: AtomicBool::new(false),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.conversation.read().await.messages().to_vec()
    }

    pub async fn has_started(&self) -> bool {
        self.conversation.read().await.has_user_messages()
    }

    pub async fn visible_suggestions(&self) -> &'static [&'static str] {
        let conversation = self.conversation.read().await;
        let visible = match self.widget {
            Widget::Floating => conversation.len() == 1,
            Widget::Copilot => !conversation.has_user_messages(),
        };
        if visible { self.widget.suggestions() } else { &[] }
    }

    pub async fn input(&self) -> String {
        self.input.read().await.clone()
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        *self.input.write().await = text.into();
    }

    /// Fill the input with a visible suggestion. Does not send.
    pub async fn choose_suggestion(&self, index: usize) -> Option<&'static str> {
        let choice = *self.visible_suggestions().await.get(index)?;
        self.set_input(choice).await;
        Some(choice)
    }

    /// Send the current input. It is cleared only if the send is accepted.
    pub async fn submit(&self) -> SendOutcome {
        let text = self.input().await;
        if text.trim().is_empty() {
            return SendOutcome::Rejected(Rejection::EmptyInput);
        }
        let Some(_guard) = PendingGuard::acquire(&self.pending) else {
            return SendOutcome::Rejected(Rejection::Pending);
        };
        self.input.write().await.clear();
        self.exchange(&text).await
    }

    /// Drive the returned future to completion: dropping it mid-request
    /// leaves the user message without its reply.
    pub async fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Rejected(Rejection::EmptyInput);
        }
        let Some(_guard) = PendingGuard::acquire(&self.pending) else {
            tracing::debug!("send ignored while a request is pending");
            return SendOutcome::Rejected(Rejection::Pending);
        };
        self.exchange(text).await
    }

    async fn exchange(&self, text: &str) -> SendOutcome {
        self.conversation.write().await.push(Message::user(text));

        let content = match self.transport.post_message(text).await {
            Ok(data) => extract_reply_text(&data),
            Err(err) => {
                tracing::error!(error = %err, "chat request failed");
                self.widget.failure_text(&err)
            }
        };

        let reply = Message::assistant(content);
        self.conversation.write().await.push(reply.clone());
        SendOutcome::Replied(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn floating_failure_includes_reason() {
        let err = TransportError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Flow backend error: 503 Service Unavailable".to_string(),
        };
        assert_eq!(
            Widget::Floating.failure_text(&err),
            "Error: Flow backend error: 503 Service Unavailable"
        );
        assert_eq!(Widget::Copilot.failure_text(&err), GENERIC_FAILURE);
    }

    #[test]
    fn only_floating_greets() {
        assert_eq!(Widget::Floating.greeting(), Some(GREETING));
        assert!(Widget::Copilot.greeting().is_none());
    }

    #[test]
    fn pending_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        let guard = PendingGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(PendingGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(PendingGuard::acquire(&flag).is_some());
    }
}
