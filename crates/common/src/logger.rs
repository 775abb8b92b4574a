use std::env;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Installs the global subscriber. Output goes to stderr so stdout stays
/// reserved for the balance listing.
pub fn setup_logger() {
    let filter = build_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

    tracing_subscriber::fmt()
        // .with_file(true)
        // .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .compact()
        .with_env_filter(filter)
        .init();
}

/// `RUST_LOG` is taken as-is when it is set and parses; the quiet
/// transport defaults only apply otherwise.
fn build_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_directives_are_not_overridden() {
        let filter = build_filter(Some("reqwest=debug")).to_string();
        assert!(filter.contains("reqwest=debug"), "filter: {}", filter);
        assert!(!filter.contains("reqwest=warn"), "filter: {}", filter);
        assert!(!filter.contains("hyper=warn"), "filter: {}", filter);
    }

    #[test]
    fn test_defaults_when_unset_or_blank() {
        for rust_log in [None, Some(""), Some("  ")] {
            let filter = build_filter(rust_log).to_string();
            assert!(filter.contains("hyper=warn"), "filter: {}", filter);
            assert!(filter.contains("reqwest=warn"), "filter: {}", filter);
        }
    }
}
