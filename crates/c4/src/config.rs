//! Logging and state location settings.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Crates whose logs the CLI shows.
const LOG_TARGETS: &[&str] = &["c4", "c4_stream", "c4_theme", "c4_page"];

/// Parse a log level name. Unknown names fall back to `info`.
pub fn parse_log_level(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" => "error",
        _ => "info",
    }
}

fn directives(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Log filter: an explicit level wins, then `RUST_LOG`, then `info`.
pub fn log_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(directives(parse_log_level(level))),
        None => EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| directives("info")),
        ),
    }
}

/// Preference directory: explicit, else `<data dir>/c4`, else `./.c4`.
pub fn state_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::data_dir()
            .map(|dir| dir.join("c4"))
            .unwrap_or_else(|| PathBuf::from(".c4"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), "debug");
        assert_eq!(parse_log_level("WARN"), "warn");
        assert_eq!(parse_log_level(" error "), "error");
        assert_eq!(parse_log_level("verbose"), "info");
        assert_eq!(parse_log_level(""), "info");
    }

    #[test]
    fn test_directives_cover_all_crates() {
        assert_eq!(
            directives("debug"),
            "c4=debug,c4_stream=debug,c4_theme=debug,c4_page=debug"
        );
    }

    #[test]
    fn test_explicit_state_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(state_dir(Some(dir.path().to_path_buf())), dir.path());
    }

    #[test]
    fn test_default_state_dir_ends_in_c4() {
        let dir = state_dir(None);
        assert!(dir.ends_with("c4") || dir.ends_with(".c4"));
    }
}
