//! Chat widget logic: conversation state, reply decoding and the transport
//! used to reach `/api/chat`.

pub mod conversation;
pub mod reply;
pub mod session;
pub mod transport;

pub use conversation::{Conversation, Message, Role};
pub use reply::{FALLBACK_REPLY, ReplyShape, extract_reply_text};
pub use session::{ChatSession, Rejection, SendOutcome, Widget};
pub use transport::{ChatTransport, HttpChatTransport, TransportError};
