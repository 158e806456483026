//! Event name to container routing.
//!
//! Every route replaces one container's content; a route may also carry a
//! post-update hook that runs on the container after the replacement (the
//! board uses this to re-activate declarative bindings in the new markup).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::event::{BOARD_CONTAINER, BOARD_UPDATE, SCORE_CONTAINER, SCORE_UPDATE, StreamEvent};
use crate::SinkError;

/// The document a dispatcher writes into.
pub trait ContentSink {
    /// Replace the full content of the element with the given id.
    fn replace_content(&mut self, target: &str, html: &str) -> Result<(), SinkError>;

    /// Scan the element's subtree for declarative binding attributes and
    /// activate them. Returns the number of bindings now active.
    fn process_bindings(&mut self, target: &str) -> Result<usize, SinkError>;
}

/// Hook run on a container after its content has been replaced.
pub type PostUpdateHook<S> = Arc<dyn Fn(&mut S, &str) -> Result<(), SinkError> + Send + Sync>;

/// Hook that re-runs declarative binding over the updated container.
pub fn process_bindings<S: ContentSink + 'static>() -> PostUpdateHook<S> {
    Arc::new(|sink: &mut S, target: &str| {
        let count = sink.process_bindings(target)?;
        trace!(container = %target, count, "bindings processed");
        Ok(())
    })
}

/// Where an event's payload goes.
pub struct Route<S> {
    target: String,
    post_update: Option<PostUpdateHook<S>>,
}

impl<S> Route<S> {
    /// Id of the container this route replaces.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether a post-update hook runs after replacement.
    pub fn has_post_update(&self) -> bool {
        self.post_update.is_some()
    }
}

impl<S> Clone for Route<S> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            post_update: self.post_update.clone(),
        }
    }
}

impl<S> fmt::Debug for Route<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("target", &self.target)
            .field("post_update", &self.post_update.is_some())
            .finish()
    }
}

/// Routes stream events to content containers.
pub struct Dispatcher<S> {
    routes: HashMap<String, Route<S>>,
}

impl<S> Default for Dispatcher<S> {
    fn default() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }
}

impl<S> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.routes.iter()).finish()
    }
}

impl<S: ContentSink + 'static> Dispatcher<S> {
    /// Create a dispatcher with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// The game page wiring: board updates rebind, score updates don't.
    pub fn game() -> Self {
        Self::new()
            .route_with_hook(BOARD_UPDATE, BOARD_CONTAINER, process_bindings())
            .route(SCORE_UPDATE, SCORE_CONTAINER)
    }

    /// Route an event name to a container, replacing content only.
    pub fn route(mut self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.routes.insert(
            event.into(),
            Route {
                target: target.into(),
                post_update: None,
            },
        );
        self
    }

    /// Route an event name to a container and run `hook` after replacement.
    pub fn route_with_hook(
        mut self,
        event: impl Into<String>,
        target: impl Into<String>,
        hook: PostUpdateHook<S>,
    ) -> Self {
        self.routes.insert(
            event.into(),
            Route {
                target: target.into(),
                post_update: Some(hook),
            },
        );
        self
    }

    /// Look up the route for an event name.
    pub fn route_for(&self, event: &str) -> Option<&Route<S>> {
        self.routes.get(event)
    }

    /// Apply one event to the sink.
    ///
    /// Returns the id of the updated container, or `None` when no route
    /// matches the event name.
    pub fn dispatch(&self, sink: &mut S, event: &StreamEvent) -> Result<Option<&str>, SinkError> {
        let Some(route) = self.routes.get(event.name()) else {
            return Ok(None);
        };

        sink.replace_content(&route.target, event.payload())?;
        if let Some(hook) = &route.post_update {
            hook(sink, &route.target)?;
        }

        Ok(Some(&route.target))
    }
}
