//! Typed stream events.

use eventsource_stream::Event as MessageEvent;

use crate::StreamError;

/// Event name used when a message carries no `event:` field.
pub const DEFAULT_EVENT: &str = "message";

/// Event carrying a freshly rendered board fragment.
pub const BOARD_UPDATE: &str = "board-update";
/// Event carrying a freshly rendered scoreboard fragment.
pub const SCORE_UPDATE: &str = "score-update";

/// Container replaced by [`BOARD_UPDATE`].
pub const BOARD_CONTAINER: &str = "board-container";
/// Container replaced by [`SCORE_UPDATE`].
pub const SCORE_CONTAINER: &str = "score-container";

/// A game event decoded from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// New board markup.
    BoardUpdate(String),
    /// New scoreboard markup.
    ScoreUpdate(String),
    /// Any other named event.
    Other { name: String, data: String },
}

impl StreamEvent {
    /// The event name as it appeared on the wire.
    pub fn name(&self) -> &str {
        match self {
            StreamEvent::BoardUpdate(_) => BOARD_UPDATE,
            StreamEvent::ScoreUpdate(_) => SCORE_UPDATE,
            StreamEvent::Other { name, .. } => name,
        }
    }

    /// The HTML fragment (or raw data) carried by the event.
    pub fn payload(&self) -> &str {
        match self {
            StreamEvent::BoardUpdate(html) | StreamEvent::ScoreUpdate(html) => html,
            StreamEvent::Other { data, .. } => data,
        }
    }
}

impl From<MessageEvent> for StreamEvent {
    fn from(message: MessageEvent) -> Self {
        match message.event.as_str() {
            BOARD_UPDATE => StreamEvent::BoardUpdate(message.data),
            SCORE_UPDATE => StreamEvent::ScoreUpdate(message.data),
            "" => StreamEvent::Other {
                name: DEFAULT_EVENT.to_string(),
                data: message.data,
            },
            _ => StreamEvent::Other {
                name: message.event,
                data: message.data,
            },
        }
    }
}

/// Build a message event with no id or retry, as a server would send it.
pub fn message_event(name: impl Into<String>, data: impl Into<String>) -> MessageEvent {
    MessageEvent {
        event: name.into(),
        data: data.into(),
        id: String::new(),
        retry: None,
    }
}

/// What an event source yields: the equivalent of `EventSource`'s
/// `open`, `message` and `error` callbacks.
#[derive(Debug)]
pub enum SourceEvent {
    /// Connection established.
    Open,
    /// A message arrived.
    Message(MessageEvent),
    /// The connection failed or dropped.
    Error(StreamError),
}
