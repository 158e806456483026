//! OS color scheme detection and change notification.

use std::time::Duration;

use dark_light::{Mode as OsThemeMode, detect as detect_os_theme};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// The OS-level color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    /// Scheme from a `prefers-color-scheme: dark` match.
    pub fn from_dark(dark: bool) -> Self {
        if dark { ColorScheme::Dark } else { ColorScheme::Light }
    }
}

/// Anything that reports the current color scheme.
pub trait ColorSchemeSource {
    fn color_scheme(&self) -> ColorScheme;

    fn prefers_dark(&self) -> bool {
        self.color_scheme() == ColorScheme::Dark
    }
}

/// A fixed scheme.
impl ColorSchemeSource for ColorScheme {
    fn color_scheme(&self) -> ColorScheme {
        *self
    }
}

/// Reads the scheme from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemColorScheme;

impl ColorSchemeSource for SystemColorScheme {
    fn color_scheme(&self) -> ColorScheme {
        match detect_os_theme() {
            OsThemeMode::Dark => ColorScheme::Dark,
            _ => ColorScheme::Light,
        }
    }
}

/// Poll `source` every `interval` and publish changes.
///
/// The returned receiver starts at the current scheme and is updated only
/// when the scheme actually changes. The task exits on shutdown or once
/// every receiver is gone.
pub fn watch_color_scheme<C>(
    source: C,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> (watch::Receiver<ColorScheme>, JoinHandle<()>)
where
    C: ColorSchemeSource + Send + 'static,
{
    let (tx, rx) = watch::channel(source.color_scheme());

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately; the initial value is already published.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    debug!("color scheme watcher shutting down");
                    return;
                }
                _ = tx.closed() => return,
                _ = ticker.tick() => {
                    let scheme = source.color_scheme();
                    let changed = tx.send_if_modified(|current| {
                        if *current == scheme {
                            false
                        } else {
                            *current = scheme;
                            true
                        }
                    });
                    if changed {
                        info!(?scheme, "OS color scheme changed");
                    }
                }
            }
        }
    });

    (rx, handle)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Scheme that tests can flip at runtime.
    #[derive(Clone)]
    struct SwitchableScheme(Arc<Mutex<ColorScheme>>);

    impl ColorSchemeSource for SwitchableScheme {
        fn color_scheme(&self) -> ColorScheme {
            *self.0.lock().unwrap()
        }
    }

    #[test]
    fn test_fixed_scheme() {
        assert!(ColorScheme::Dark.prefers_dark());
        assert!(!ColorScheme::Light.prefers_dark());
        assert_eq!(ColorScheme::from_dark(true), ColorScheme::Dark);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_publishes_changes() {
        let scheme = SwitchableScheme(Arc::new(Mutex::new(ColorScheme::Light)));
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let (mut rx, _handle) =
            watch_color_scheme(scheme.clone(), Duration::from_secs(1), shutdown_rx);

        assert_eq!(*rx.borrow(), ColorScheme::Light);

        *scheme.0.lock().unwrap() = ColorScheme::Dark;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ColorScheme::Dark);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_stops_on_shutdown() {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (_rx, handle) =
            watch_color_scheme(ColorScheme::Light, Duration::from_secs(1), shutdown_rx);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
