//! Property tests for theme preference resolution.

use c4_theme::{
    ColorScheme, FileStore, MemoryStore, PreferenceStore, THEME_KEY, Theme, ThemePreference,
    ThemeSurface, ThemeTarget,
};
use proptest::prelude::*;

#[derive(Debug, Default, Clone, PartialEq)]
struct Attributes {
    root: Option<String>,
    body: Option<String>,
    toggle: bool,
}

impl ThemeSurface for Attributes {
    fn theme_attribute(&self, target: ThemeTarget) -> Option<String> {
        match target {
            ThemeTarget::Root => self.root.clone(),
            ThemeTarget::Body => self.body.clone(),
        }
    }

    fn set_theme_attribute(&mut self, target: ThemeTarget, value: &str) {
        match target {
            ThemeTarget::Root => self.root = Some(value.to_string()),
            ThemeTarget::Body => self.body = Some(value.to_string()),
        }
    }

    fn set_toggle_checked(&mut self, checked: bool) -> bool {
        self.toggle = checked;
        true
    }
}

fn theme() -> impl Strategy<Value = Theme> {
    prop_oneof![Just(Theme::Corporate), Just(Theme::Business)]
}

fn scheme() -> impl Strategy<Value = ColorScheme> {
    prop_oneof![Just(ColorScheme::Light), Just(ColorScheme::Dark)]
}

proptest! {
    /// A stored choice wins regardless of the OS scheme.
    #[test]
    fn stored_theme_wins(stored in theme(), os in scheme()) {
        let pref = ThemePreference::new(MemoryStore::with_entry(THEME_KEY, stored.as_str()), os);
        prop_assert_eq!(pref.preferred_theme().unwrap(), stored);
    }

    /// Without a stored choice, dark iff the OS says dark.
    #[test]
    fn os_scheme_decides_without_stored_theme(os in scheme()) {
        let pref = ThemePreference::new(MemoryStore::new(), os);
        prop_assert_eq!(pref.preferred_theme().unwrap().is_dark(), os == ColorScheme::Dark);
    }

    /// Applying the same theme twice looks the same as applying it once.
    #[test]
    fn set_theme_is_idempotent(t in theme(), os in scheme()) {
        let mut once = ThemePreference::new(MemoryStore::new(), os);
        let mut once_surface = Attributes::default();
        once.set_theme(&mut once_surface, t).unwrap();

        let mut twice = ThemePreference::new(MemoryStore::new(), os);
        let mut twice_surface = Attributes::default();
        twice.set_theme(&mut twice_surface, t).unwrap();
        twice.set_theme(&mut twice_surface, t).unwrap();

        prop_assert_eq!(once_surface, twice_surface);
        prop_assert_eq!(
            once.store().get(THEME_KEY).unwrap(),
            twice.store().get(THEME_KEY).unwrap()
        );
    }

    /// After page load, OS changes never move an explicit choice.
    #[test]
    fn os_changes_never_override_stored_choice(
        stored in theme(),
        changes in prop::collection::vec(scheme(), 0..8),
    ) {
        let store = MemoryStore::with_entry(THEME_KEY, stored.as_str());
        let mut pref = ThemePreference::new(store, ColorScheme::Light);
        let mut surface = Attributes::default();
        pref.on_page_load(&mut surface).unwrap();

        for change in changes {
            prop_assert_eq!(pref.on_color_scheme_change(&mut surface, change).unwrap(), None);
        }

        prop_assert_eq!(surface.root.as_deref(), Some(stored.as_str()));
        let persisted = pref.store().get(THEME_KEY).unwrap();
        prop_assert_eq!(persisted.as_deref(), Some(stored.as_str()));
    }
}

#[test]
fn file_backed_preference_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut pref = ThemePreference::new(FileStore::open(dir.path()).unwrap(), ColorScheme::Dark);
    let mut surface = Attributes::default();
    pref.on_page_load(&mut surface).unwrap();
    pref.toggle_theme(&mut surface).unwrap();
    drop(pref);

    let pref = ThemePreference::new(FileStore::open(dir.path()).unwrap(), ColorScheme::Dark);
    assert_eq!(pref.preferred_theme().unwrap(), Theme::Corporate);
}
