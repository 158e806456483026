//! Page lifecycle around a single event-stream subscription.

use futures_util::{Stream, StreamExt};
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};

use crate::dispatch::{ContentSink, Dispatcher};
use crate::source::Connector;
use crate::{SourceEvent, StreamError, StreamEvent};

/// Path of the game's event stream, relative to the server origin.
pub const STREAM_PATH: &str = "/game/stream";

/// Page lifecycle signals that (re)establish the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// The page finished loading.
    PageReady,
    /// New content was loaded and processed on the page.
    ContentLoaded,
}

/// Join a server origin and a stream path.
pub fn stream_url(origin: &str, path: &str) -> String {
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Subscribes to the game stream and applies its events to a page.
///
/// All failures are logged; nothing is surfaced to the page.
#[derive(Debug)]
pub struct StreamUpdater<S> {
    url: String,
    dispatcher: Dispatcher<S>,
    connected: bool,
}

impl<S: ContentSink + 'static> StreamUpdater<S> {
    /// Create an updater for the given stream URL.
    pub fn new(url: impl Into<String>, dispatcher: Dispatcher<S>) -> Self {
        Self {
            url: url.into(),
            dispatcher,
            connected: false,
        }
    }

    /// Updater for `/game/stream` on the given origin with the game routes.
    pub fn for_server(origin: &str) -> Self {
        Self::new(stream_url(origin, STREAM_PATH), Dispatcher::game())
    }

    /// The stream URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether a subscription is currently open.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// React to a lifecycle signal.
    ///
    /// Opens a subscription unless one is already open. Returns the new
    /// stream, or `None` when nothing was opened.
    pub fn on_lifecycle<C: Connector>(
        &mut self,
        connector: &C,
        signal: Lifecycle,
    ) -> Option<C::Stream> {
        if self.connected {
            debug!(?signal, "event stream already established");
            return None;
        }

        match connector.open(&self.url) {
            Ok(stream) => {
                info!(url = %self.url, ?signal, "subscribed to event stream");
                self.connected = true;
                Some(stream)
            }
            Err(StreamError::Unsupported) => {
                error!("SSE not supported");
                None
            }
            Err(e) => {
                error!(error = %e, url = %self.url, "failed to open event stream");
                None
            }
        }
    }

    /// Mark the current subscription as finished so the next lifecycle
    /// signal opens a new one.
    pub fn on_stream_end(&mut self) {
        if self.connected {
            warn!(url = %self.url, "event stream closed");
        }
        self.connected = false;
    }

    /// Handle one event from the subscription.
    ///
    /// Returns the id of the container that was updated, if any.
    pub fn handle(&self, sink: &mut S, event: SourceEvent) -> Option<&str> {
        match event {
            SourceEvent::Open => {
                info!(url = %self.url, "SSE connection opened");
                None
            }
            SourceEvent::Error(e) => {
                error!(error = %e, "SSE connection error");
                None
            }
            SourceEvent::Message(message) => {
                let event = StreamEvent::from(message);
                match self.dispatcher.dispatch(sink, &event) {
                    Ok(Some(target)) => {
                        debug!(event = event.name(), container = target, "update received");
                        Some(target)
                    }
                    Ok(None) => {
                        trace!(event = event.name(), "ignoring unrouted event");
                        None
                    }
                    Err(e) => {
                        error!(event = event.name(), error = %e, "failed to apply update");
                        None
                    }
                }
            }
        }
    }

    /// Drive a subscription until it ends or shutdown is signalled.
    pub async fn run<St>(
        &mut self,
        sink: &mut S,
        mut stream: St,
        mut shutdown_rx: watch::Receiver<bool>,
    ) where
        St: Stream<Item = SourceEvent> + Unpin,
    {
        loop {
            tokio::select! {
                biased;

                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("stream updater shutting down");
                        break;
                    }
                }

                next = stream.next() => match next {
                    Some(event) => {
                        self.handle(sink, event);
                    }
                    None => break,
                },
            }
        }

        self.on_stream_end();
    }
}
