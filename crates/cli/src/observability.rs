//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set. Otherwise the level follows the runner's debug
//! switch: `debug` for this workspace's crates when step debugging is on,
//! `info` when it is off.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; anything else is plain text.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

fn default_directives(debug: bool) -> &'static str {
    if debug {
        "info,cli=debug,pipeline=debug,github=debug,listener=debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init(debug: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(false).without_time())
            .init(),
    }
}
