//! In-memory model of the live game page.
//!
//! [`Page`] holds the markup the stream updater writes into and the theme
//! attributes the theme preference manages, so both components can run
//! against one document without a browser.

mod bindings;
mod page;

pub use bindings::{Binding, scan_bindings};
pub use page::{Page, PageBuilder, html_to_text};
