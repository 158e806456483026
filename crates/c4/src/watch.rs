//! `c4 watch`: the live page.
//!
//! Applies the theme on load, subscribes to the game stream, prints each
//! container as it changes and follows OS color scheme changes until Ctrl-C.

use std::future;
use std::path::PathBuf;
use std::time::Duration;

use c4_page::Page;
use c4_stream::{
    BOARD_CONTAINER, Dispatcher, HttpConnector, Lifecycle, SourceEvent, StreamUpdater,
    Subscription, stream_url,
};
use c4_theme::{FileStore, SystemColorScheme, ThemePreference, watch_color_scheme};
use futures_util::StreamExt;
use miette::{IntoDiagnostic, Result};
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub server_url: String,
    pub stream_path: String,
    pub retry: Duration,
    pub color_poll: Duration,
    pub state_dir: PathBuf,
}

pub async fn run(opts: WatchOptions) -> Result<()> {
    // Create shutdown channel
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    // Handle shutdown signals
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let mut page = Page::new();

    let store = FileStore::open(&opts.state_dir).into_diagnostic()?;
    let mut theme = ThemePreference::new(store, SystemColorScheme);
    let applied = theme.on_page_load(&mut page).into_diagnostic()?;
    println!("theme: {}", applied);

    let (mut scheme_rx, _scheme_task) =
        watch_color_scheme(SystemColorScheme, opts.color_poll, shutdown_rx.clone());
    let mut scheme_open = true;

    let connector = HttpConnector::new(opts.retry);
    let mut updater: StreamUpdater<Page> = StreamUpdater::new(
        stream_url(&opts.server_url, &opts.stream_path),
        Dispatcher::game(),
    );
    let mut stream = updater.on_lifecycle(&connector, Lifecycle::PageReady);

    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    info!("shutting down");
                    break;
                }
            }

            changed = scheme_rx.changed(), if scheme_open => {
                if changed.is_err() {
                    scheme_open = false;
                    continue;
                }
                let scheme = *scheme_rx.borrow_and_update();
                match theme.on_color_scheme_change(&mut page, scheme) {
                    Ok(Some(applied)) => println!("theme: {}", applied),
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "failed to apply OS color scheme"),
                }
            }

            event = next_event(&mut stream) => match event {
                Some(event) => {
                    let Some(target) = updater.handle(&mut page, event) else {
                        continue;
                    };
                    print_container(&page, target);

                    // New board markup has been processed; the page announces
                    // loaded content, which only reconnects a dropped stream.
                    if target == BOARD_CONTAINER
                        && let Some(s) = updater.on_lifecycle(&connector, Lifecycle::ContentLoaded)
                    {
                        stream = Some(s);
                    }
                }
                None => {
                    updater.on_stream_end();
                    stream = None;
                }
            },
        }
    }

    if let Some(subscription) = stream.take() {
        subscription.close();
    }

    Ok(())
}

/// Next event from the subscription; never resolves without one.
async fn next_event(stream: &mut Option<Subscription>) -> Option<SourceEvent> {
    match stream.as_mut() {
        Some(subscription) => subscription.next().await,
        None => future::pending().await,
    }
}

fn print_container(page: &Page, id: &str) {
    if let Some(text) = page.text(id) {
        println!("[{}] {}", id, text);
    }
}
