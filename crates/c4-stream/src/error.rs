//! Error types for the event stream.

use thiserror::Error;

/// Errors that can occur while receiving or applying stream updates.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The transport cannot open event streams at all.
    #[error("event streams are not supported by this transport")]
    Unsupported,

    /// The request for this URL cannot be replayed on reconnect.
    #[error("event stream request for {0} cannot be retried")]
    Request(String),

    /// HTTP request or body read failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200 OK.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Server answered with a body that is not an event stream.
    #[error("unexpected content type: {0:?}")]
    ContentType(String),

    /// The body was not a well-formed event stream.
    #[error("malformed event stream: {0}")]
    Protocol(String),

    /// Server closed the stream.
    #[error("stream ended")]
    Ended,

    /// Applying an update to the document failed.
    #[error("document error: {0}")]
    Sink(#[from] SinkError),
}

impl StreamError {
    /// Whether the connection must not be retried.
    ///
    /// Mirrors `EventSource`: a bad status or content type fails the
    /// connection for good, everything else is reconnected.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StreamError::Unsupported
                | StreamError::Request(_)
                | StreamError::Status(_)
                | StreamError::ContentType(_)
        )
    }
}

impl From<reqwest_eventsource::Error> for StreamError {
    fn from(err: reqwest_eventsource::Error) -> Self {
        use reqwest_eventsource::Error;

        match err {
            Error::Transport(e) => StreamError::Http(e),
            Error::InvalidStatusCode(status, _) => StreamError::Status(status.as_u16()),
            Error::InvalidContentType(content_type, _) => {
                StreamError::ContentType(content_type.to_str().unwrap_or_default().to_string())
            }
            Error::StreamEnded => StreamError::Ended,
            other => StreamError::Protocol(other.to_string()),
        }
    }
}

/// Errors reported by a [`ContentSink`](crate::ContentSink).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// No element with the given id exists in the document.
    #[error("no element with id `{0}`")]
    MissingElement(String),
}
