//! HTTP event source.
//!
//! Wraps `reqwest_eventsource::EventSource`, which speaks the browser
//! `EventSource` protocol: `Accept: text/event-stream`, `Last-Event-ID` on
//! reconnect and the server's `retry:` field replacing the reconnection delay.
//! A spawned task forwards its `Open`, `Message` and error events to a
//! [`Subscription`]. Bad statuses and content types end the subscription
//! instead of reconnecting.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use reqwest_eventsource::retry::Constant;
use reqwest_eventsource::{Event, EventSource};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, trace, warn};

use crate::{SourceEvent, StreamError};

/// Reconnection delay used until the server sends a `retry:` field.
pub const DEFAULT_RETRY: Duration = Duration::from_secs(3);

/// Buffered events between the connection task and the consumer.
const CHANNEL_CAPACITY: usize = 64;

/// Anything that can open an event stream for a URL.
pub trait Connector {
    /// The stream of events produced by a connection.
    type Stream: Stream<Item = SourceEvent> + Unpin;

    /// Open a subscription. [`StreamError::Unsupported`] means the transport
    /// is unavailable and no subscription should be attempted.
    fn open(&self, url: &str) -> Result<Self::Stream, StreamError>;
}

/// Configuration for an [`HttpEventSource`].
#[derive(Debug, Clone)]
pub struct EventSourceConfig {
    /// Absolute URL of the stream endpoint.
    pub url: String,
    /// Initial reconnection delay.
    pub retry: Duration,
    /// TCP connect timeout per attempt.
    pub connect_timeout: Duration,
}

impl EventSourceConfig {
    /// Defaults for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            retry: DEFAULT_RETRY,
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Override the initial reconnection delay.
    pub fn with_retry(mut self, retry: Duration) -> Self {
        self.retry = retry;
        self
    }
}

/// Event source over a reqwest client.
pub struct HttpEventSource {
    url: String,
    source: EventSource,
}

impl HttpEventSource {
    /// Prepare the request for a source. Nothing is sent until
    /// [`HttpEventSource::connect`].
    pub fn new(config: EventSourceConfig) -> Result<Self, StreamError> {
        // No overall request timeout: the response body never completes.
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;

        let request = http.get(&config.url).header(CACHE_CONTROL, "no-cache");
        let mut source =
            EventSource::new(request).map_err(|_| StreamError::Request(config.url.clone()))?;
        source.set_retry_policy(Box::new(Constant::new(config.retry, None)));

        Ok(Self {
            url: config.url,
            source,
        })
    }

    /// Start the connection task. Must be called within a tokio runtime.
    pub fn connect(self) -> Subscription {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move { self.run(tx, shutdown_rx).await });

        Subscription {
            events: ReceiverStream::new(rx),
            shutdown_tx,
            task,
        }
    }

    /// Forward events until shutdown, a fatal error, or the subscription
    /// being dropped.
    async fn run(mut self, tx: mpsc::Sender<SourceEvent>, mut shutdown_rx: watch::Receiver<bool>) {
        info!(url = %self.url, "connecting to event stream");

        loop {
            let next = tokio::select! {
                biased;

                _ = shutdown_rx.changed() => {
                    debug!("event source received shutdown signal");
                    break;
                }

                next = self.source.next() => next,
            };

            let event = match next {
                Some(Ok(Event::Open)) => {
                    info!(url = %self.url, "event stream connected");
                    SourceEvent::Open
                }
                Some(Ok(Event::Message(message))) => {
                    trace!(event = %message.event, len = message.data.len(), "event received");
                    SourceEvent::Message(message)
                }
                Some(Err(err)) => {
                    let err = StreamError::from(err);
                    if err.is_fatal() {
                        warn!(error = %err, "event stream failed permanently");
                        let _ = tx.send(SourceEvent::Error(err)).await;
                        break;
                    }
                    warn!(error = %err, "event stream dropped, reconnecting");
                    SourceEvent::Error(err)
                }
                None => {
                    debug!("event source closed");
                    break;
                }
            };

            if tx.send(event).await.is_err() {
                debug!("event stream consumer gone");
                break;
            }
        }

        self.source.close();
    }
}

/// A live subscription: a lazy, unbounded, non-restartable stream of
/// [`SourceEvent`]s. Dropping it closes the connection.
pub struct Subscription {
    events: ReceiverStream<SourceEvent>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Stop the connection task. Already buffered events can still be read.
    pub fn close(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Stream for Subscription {
    type Item = SourceEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_next_unpin(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        self.task.abort();
    }
}

/// [`Connector`] opening an [`HttpEventSource`] per call.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    retry: Duration,
}

impl HttpConnector {
    /// Connector with the given initial reconnection delay.
    pub fn new(retry: Duration) -> Self {
        Self { retry }
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY)
    }
}

impl Connector for HttpConnector {
    type Stream = Subscription;

    fn open(&self, url: &str) -> Result<Subscription, StreamError> {
        let config = EventSourceConfig::new(url).with_retry(self.retry);
        Ok(HttpEventSource::new(config)?.connect())
    }
}
