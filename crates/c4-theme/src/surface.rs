//! The part of the document the theme touches.

/// Attribute carrying the active theme token.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Class of the checkbox-like theme toggle control.
pub const THEME_TOGGLE_CLASS: &str = "theme-controller";

/// Elements that carry [`THEME_ATTRIBUTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeTarget {
    /// The document root (`<html>`).
    Root,
    /// The `<body>` element.
    Body,
}

/// Document operations needed to apply a theme.
pub trait ThemeSurface {
    /// Current `data-theme` value on the element.
    fn theme_attribute(&self, target: ThemeTarget) -> Option<String>;

    /// Set `data-theme` on the element.
    fn set_theme_attribute(&mut self, target: ThemeTarget, value: &str);

    /// Set the toggle control's checked state. Returns `false` when the page
    /// has no toggle.
    fn set_toggle_checked(&mut self, checked: bool) -> bool;
}
