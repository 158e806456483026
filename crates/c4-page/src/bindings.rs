//! Declarative binding scan.
//!
//! Finds htmx-style attributes (`hx-post`, `data-hx-target`, ...) inside the
//! tags of an HTML fragment. A binding is active once its container has been
//! processed; replacing the container's markup drops its bindings until the
//! next scan.

use std::sync::LazyLock;

use regex::Regex;

static TAG_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[a-zA-Z][^\s/>]*").unwrap());

/// One attribute at the start of the input: name, then an optional quoted or
/// unquoted value.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

/// One activated declarative attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Attribute name without the `data-` prefix, lower-cased (`hx-post`).
    pub attribute: String,
    /// Attribute value; empty for bare attributes like `hx-boost`.
    pub value: String,
}

impl Binding {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

/// Scan an HTML fragment for declarative binding attributes, in document order.
pub fn scan_bindings(html: &str) -> Vec<Binding> {
    let mut bindings = Vec::new();
    let mut pos = 0;

    while let Some(open) = TAG_OPEN_RE.find_at(html, pos) {
        pos = scan_attributes(html, open.end(), &mut bindings);
    }

    bindings
}

/// Walk the attributes of one tag left to right, consuming quoted values
/// whole. Returns the offset just past the tag's closing `>`.
fn scan_attributes(html: &str, mut pos: usize, bindings: &mut Vec<Binding>) -> usize {
    loop {
        let rest = &html[pos..];
        let attrs = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        pos += rest.len() - attrs.len();

        let Some(next) = attrs.chars().next() else {
            return pos;
        };
        if next == '>' {
            return pos + 1;
        }

        let Some(caps) = ATTR_RE.captures(attrs) else {
            // Stray quote or `=`.
            pos += next.len_utf8();
            continue;
        };
        pos += caps[0].len();

        let name = caps[1].to_ascii_lowercase();
        let attribute = name.strip_prefix("data-").unwrap_or(&name);
        if !attribute.starts_with("hx-") {
            continue;
        }

        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        bindings.push(Binding::new(attribute, value));
    }
}
