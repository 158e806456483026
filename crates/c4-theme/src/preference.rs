//! Theme state: stored choice, OS hint, and how they reach the page.

use tracing::{debug, trace, warn};

use crate::storage::{PreferenceStore, THEME_KEY};
use crate::{ColorScheme, ColorSchemeSource, Theme, ThemeError, ThemeSurface, ThemeTarget};

/// Theme preference over an injected store and color scheme source.
///
/// An explicit stored choice always wins over the OS color scheme. Note that
/// applying a theme persists it, so the OS hint only matters until the first
/// theme is applied (or after [`ThemePreference::clear_preference`]).
#[derive(Debug)]
pub struct ThemePreference<S, C> {
    store: S,
    scheme: C,
}

impl<S: PreferenceStore, C: ColorSchemeSource> ThemePreference<S, C> {
    pub fn new(store: S, scheme: C) -> Self {
        Self { store, scheme }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The stored theme, if one is set and recognisable.
    ///
    /// Legacy spellings are normalised. Unrecognised values are logged and
    /// treated as absent.
    pub fn stored_theme(&self) -> Result<Option<Theme>, ThemeError> {
        let Some(raw) = self.store.get(THEME_KEY)?.filter(|v| !v.is_empty()) else {
            return Ok(None);
        };

        match raw.parse::<Theme>() {
            Ok(theme) => {
                if raw != theme.as_str() {
                    debug!(stored = %raw, theme = %theme, "normalized stored theme token");
                }
                Ok(Some(theme))
            }
            Err(_) => {
                warn!(stored = %raw, "ignoring unrecognized stored theme");
                Ok(None)
            }
        }
    }

    /// Stored theme, or the one matching the OS color scheme. No side effects.
    pub fn preferred_theme(&self) -> Result<Theme, ThemeError> {
        match self.stored_theme()? {
            Some(theme) => Ok(theme),
            None => Ok(Theme::for_scheme(self.scheme.color_scheme())),
        }
    }

    /// Write the theme to root and body and persist it.
    pub fn set_theme<T: ThemeSurface>(
        &mut self,
        surface: &mut T,
        theme: Theme,
    ) -> Result<(), ThemeError> {
        surface.set_theme_attribute(ThemeTarget::Root, theme.as_str());
        surface.set_theme_attribute(ThemeTarget::Body, theme.as_str());
        self.store.set(THEME_KEY, theme.as_str())?;
        debug!(theme = %theme, "theme applied");
        Ok(())
    }

    /// Flip the theme currently on the root element and apply the result.
    pub fn toggle_theme<T: ThemeSurface>(&mut self, surface: &mut T) -> Result<Theme, ThemeError> {
        let current = surface.theme_attribute(ThemeTarget::Root);
        let next = Theme::toggle_from(current.as_deref());
        self.set_theme(surface, next)?;
        Ok(next)
    }

    /// Initial page load: apply the preferred theme and sync the toggle.
    ///
    /// The toggle is checked when the light theme is active.
    pub fn on_page_load<T: ThemeSurface>(&mut self, surface: &mut T) -> Result<Theme, ThemeError> {
        let theme = self.preferred_theme()?;
        self.set_theme(surface, theme)?;

        let checked = self.preferred_theme()? == Theme::Corporate;
        if !surface.set_toggle_checked(checked) {
            trace!("no theme toggle on page");
        }

        Ok(theme)
    }

    /// OS color scheme changed. Applies the matching theme only when no
    /// explicit choice is stored; returns the applied theme.
    ///
    /// Any non-empty stored value counts as explicit, recognised or not.
    pub fn on_color_scheme_change<T: ThemeSurface>(
        &mut self,
        surface: &mut T,
        scheme: ColorScheme,
    ) -> Result<Option<Theme>, ThemeError> {
        if let Some(stored) = self.store.get(THEME_KEY)?.filter(|v| !v.is_empty()) {
            debug!(?scheme, stored = %stored, "keeping explicit theme preference");
            return Ok(None);
        }

        let theme = Theme::for_scheme(scheme);
        self.set_theme(surface, theme)?;
        Ok(Some(theme))
    }

    /// Forget the explicit choice so the OS scheme applies again.
    pub fn clear_preference(&mut self) -> Result<(), ThemeError> {
        self.store.clear(THEME_KEY)?;
        debug!("theme preference cleared");
        Ok(())
    }
}
