//! `c4 theme` subcommands.

use std::path::Path;

use c4_page::Page;
use c4_theme::{
    ColorSchemeSource, FileStore, PreferenceStore, SystemColorScheme, Theme, ThemePreference,
};
use clap::Subcommand;
use miette::{IntoDiagnostic, Result};
use tracing::info;

#[derive(Subcommand, Debug, Clone)]
pub enum ThemeAction {
    /// Show the preferred theme and where it comes from
    Show,
    /// Store an explicit theme (corporate or business)
    Set {
        #[arg(value_name = "THEME")]
        theme: String,
    },
    /// Flip the current theme and store the result
    Toggle,
    /// Forget the stored theme and follow the OS color scheme again
    Clear,
}

pub fn run(action: ThemeAction, state_dir: &Path) -> Result<()> {
    let store = FileStore::open(state_dir).into_diagnostic()?;
    info!(path = %store.path().display(), "using preference store");

    let mut preference = ThemePreference::new(store, SystemColorScheme);
    let line = execute(&mut preference, action)?;
    println!("{}", line);
    Ok(())
}

/// Apply one action and describe the outcome.
fn execute<S, C>(preference: &mut ThemePreference<S, C>, action: ThemeAction) -> Result<String>
where
    S: PreferenceStore,
    C: ColorSchemeSource,
{
    let mut page = Page::new();

    match action {
        ThemeAction::Show => {
            let theme = preference.preferred_theme().into_diagnostic()?;
            let source = if preference.stored_theme().into_diagnostic()?.is_some() {
                "stored"
            } else {
                "system"
            };
            Ok(format!("{} ({})", theme, source))
        }
        ThemeAction::Set { theme } => {
            let theme: Theme = theme.parse().into_diagnostic()?;
            preference.set_theme(&mut page, theme).into_diagnostic()?;
            Ok(theme.to_string())
        }
        ThemeAction::Toggle => {
            preference.on_page_load(&mut page).into_diagnostic()?;
            let theme = preference.toggle_theme(&mut page).into_diagnostic()?;
            Ok(theme.to_string())
        }
        ThemeAction::Clear => {
            preference.clear_preference().into_diagnostic()?;
            let theme = preference.preferred_theme().into_diagnostic()?;
            Ok(format!("cleared, following system ({})", theme))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c4_theme::{ColorScheme, MemoryStore, THEME_KEY};

    fn preference(stored: Option<&str>) -> ThemePreference<MemoryStore, ColorScheme> {
        let store = match stored {
            Some(value) => MemoryStore::with_entry(THEME_KEY, value),
            None => MemoryStore::new(),
        };
        ThemePreference::new(store, ColorScheme::Dark)
    }

    #[test]
    fn test_show_reports_source() {
        assert_eq!(execute(&mut preference(None), ThemeAction::Show).unwrap(), "business (system)");
        assert_eq!(
            execute(&mut preference(Some("corperate")), ThemeAction::Show).unwrap(),
            "corporate (stored)"
        );
    }

    #[test]
    fn test_set_stores_canonical_token() {
        let mut pref = preference(None);
        let out = execute(&mut pref, ThemeAction::Set { theme: "Corporate".into() }).unwrap();
        assert_eq!(out, "corporate");
        assert_eq!(pref.stored_theme().unwrap(), Some(Theme::Corporate));
    }

    #[test]
    fn test_set_rejects_unknown_theme() {
        let mut pref = preference(None);
        assert!(execute(&mut pref, ThemeAction::Set { theme: "dracula".into() }).is_err());
        assert_eq!(pref.stored_theme().unwrap(), None);
    }

    #[test]
    fn test_toggle_from_system_theme() {
        let mut pref = preference(None);
        assert_eq!(execute(&mut pref, ThemeAction::Toggle).unwrap(), "corporate");
        assert_eq!(execute(&mut pref, ThemeAction::Toggle).unwrap(), "business");
    }

    #[test]
    fn test_clear_falls_back_to_system() {
        let mut pref = preference(Some("corporate"));
        let out = execute(&mut pref, ThemeAction::Clear).unwrap();
        assert_eq!(out, "cleared, following system (business)");
        assert_eq!(pref.stored_theme().unwrap(), None);
    }
}
