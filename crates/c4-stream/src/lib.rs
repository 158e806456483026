//! Live game updates over server-sent events.
//!
//! This crate subscribes to the game's event stream and patches the page's
//! content containers as updates arrive:
//!
//! - **Source**: `EventSource`-style subscription over `reqwest-eventsource`
//! - **Dispatch**: event name to container routing with per-route post-update hooks
//! - **Updater**: page lifecycle handling and logging around a subscription

pub mod dispatch;
mod error;
mod event;
pub mod source;
mod updater;

pub use dispatch::{ContentSink, Dispatcher, PostUpdateHook, Route};
pub use error::{SinkError, StreamError};
pub use event::{
    BOARD_CONTAINER, BOARD_UPDATE, DEFAULT_EVENT, SCORE_CONTAINER, SCORE_UPDATE, SourceEvent,
    StreamEvent, message_event,
};
pub use eventsource_stream::Event as MessageEvent;
pub use source::{
    Connector, DEFAULT_RETRY, EventSourceConfig, HttpConnector, HttpEventSource, Subscription,
};
pub use updater::{Lifecycle, STREAM_PATH, StreamUpdater, stream_url};
