//! The page document.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use c4_stream::{BOARD_CONTAINER, ContentSink, SCORE_CONTAINER, SinkError};
use c4_theme::{ThemeSurface, ThemeTarget};
use regex::Regex;
use tracing::trace;

use crate::bindings::{Binding, scan_bindings};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Default, Clone)]
struct Container {
    html: String,
    bindings: Vec<Binding>,
}

/// In-memory page: content containers by id, theme attributes on root and
/// body, and an optional theme toggle.
#[derive(Debug, Clone)]
pub struct Page {
    containers: BTreeMap<String, Container>,
    root_theme: Option<String>,
    body_theme: Option<String>,
    toggle: Option<bool>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// The game page: board and score containers plus a theme toggle.
    pub fn new() -> Self {
        Self::builder()
            .container(BOARD_CONTAINER)
            .container(SCORE_CONTAINER)
            .theme_toggle()
            .build()
    }

    /// Start an empty page.
    pub fn builder() -> PageBuilder {
        PageBuilder::default()
    }

    /// Raw HTML of a container.
    pub fn html(&self, id: &str) -> Option<&str> {
        self.containers.get(id).map(|c| c.html.as_str())
    }

    /// Readable text of a container.
    pub fn text(&self, id: &str) -> Option<String> {
        self.html(id).map(html_to_text)
    }

    /// Bindings active in a container.
    pub fn bindings(&self, id: &str) -> &[Binding] {
        self.containers
            .get(id)
            .map(|c| c.bindings.as_slice())
            .unwrap_or_default()
    }

    /// Checked state of the theme toggle, if the page has one.
    pub fn toggle_checked(&self) -> Option<bool> {
        self.toggle
    }

    fn container_mut(&mut self, id: &str) -> Result<&mut Container, SinkError> {
        self.containers
            .get_mut(id)
            .ok_or_else(|| SinkError::MissingElement(id.to_string()))
    }
}

impl ContentSink for Page {
    fn replace_content(&mut self, target: &str, html: &str) -> Result<(), SinkError> {
        let container = self.container_mut(target)?;
        container.html = html.to_string();
        container.bindings.clear();
        Ok(())
    }

    fn process_bindings(&mut self, target: &str) -> Result<usize, SinkError> {
        let container = self.container_mut(target)?;
        container.bindings = scan_bindings(&container.html);
        trace!(container = %target, count = container.bindings.len(), "bindings activated");
        Ok(container.bindings.len())
    }
}

impl ThemeSurface for Page {
    fn theme_attribute(&self, target: ThemeTarget) -> Option<String> {
        match target {
            ThemeTarget::Root => self.root_theme.clone(),
            ThemeTarget::Body => self.body_theme.clone(),
        }
    }

    fn set_theme_attribute(&mut self, target: ThemeTarget, value: &str) {
        let slot = match target {
            ThemeTarget::Root => &mut self.root_theme,
            ThemeTarget::Body => &mut self.body_theme,
        };
        *slot = Some(value.to_string());
    }

    fn set_toggle_checked(&mut self, checked: bool) -> bool {
        match &mut self.toggle {
            Some(state) => {
                *state = checked;
                true
            }
            None => false,
        }
    }
}

/// Builder for pages with custom markup.
#[derive(Debug, Default)]
pub struct PageBuilder {
    containers: Vec<String>,
    toggle: bool,
}

impl PageBuilder {
    /// Add an empty container with the given id.
    pub fn container(mut self, id: impl Into<String>) -> Self {
        self.containers.push(id.into());
        self
    }

    /// Include the theme toggle control.
    pub fn theme_toggle(mut self) -> Self {
        self.toggle = true;
        self
    }

    pub fn build(self) -> Page {
        Page {
            containers: self
                .containers
                .into_iter()
                .map(|id| (id, Container::default()))
                .collect(),
            root_theme: None,
            body_theme: None,
            toggle: self.toggle.then_some(false),
        }
    }
}

/// Strip tags, decode the common entities and collapse whitespace.
pub fn html_to_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    SPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}
