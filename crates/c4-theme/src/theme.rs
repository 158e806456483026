//! Theme tokens.

use std::fmt;
use std::str::FromStr;

use crate::{ColorScheme, ThemeError};

/// Legacy spelling of [`Theme::Corporate`] written by older page scripts.
const LEGACY_CORPORATE: &str = "corperate";

/// The two page themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Light-leaning theme.
    Corporate,
    /// Dark-leaning theme.
    Business,
}

impl Theme {
    /// Canonical token, as written to the DOM and to storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Corporate => "corporate",
            Theme::Business => "business",
        }
    }

    /// Theme matching an OS color scheme.
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Theme::Business,
            ColorScheme::Light => Theme::Corporate,
        }
    }

    /// Whether this is the dark-leaning theme.
    pub fn is_dark(self) -> bool {
        self == Theme::Business
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Corporate => Theme::Business,
            Theme::Business => Theme::Corporate,
        }
    }

    /// Next theme given the raw attribute currently on the page.
    ///
    /// Only a recognisable `corporate` flips to `business`; anything else,
    /// including a missing attribute, lands on `corporate`.
    pub fn toggle_from(current: Option<&str>) -> Self {
        match current.and_then(|raw| raw.parse::<Theme>().ok()) {
            Some(Theme::Corporate) => Theme::Business,
            _ => Theme::Corporate,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            "corporate" | LEGACY_CORPORATE => Ok(Theme::Corporate),
            "business" => Ok(Theme::Business),
            _ => Err(ThemeError::UnknownTheme(s.to_string())),
        }
    }
}
