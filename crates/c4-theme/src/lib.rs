//! Light/dark theme preference for the game page.
//!
//! The preferred theme is the stored one if the user picked one, otherwise
//! whatever the OS color scheme suggests. Applying a theme writes the
//! `data-theme` attribute on the document root and body and persists it.

mod error;
mod preference;
pub mod scheme;
pub mod storage;
mod surface;
mod theme;

pub use error::ThemeError;
pub use preference::ThemePreference;
pub use scheme::{ColorScheme, ColorSchemeSource, SystemColorScheme, watch_color_scheme};
pub use storage::{FileStore, MemoryStore, PreferenceStore, THEME_KEY};
pub use surface::{THEME_ATTRIBUTE, THEME_TOGGLE_CLASS, ThemeSurface, ThemeTarget};
pub use theme::Theme;
