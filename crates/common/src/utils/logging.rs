//! Tracing bootstrap for the account server.
//!
//! Auth spans (`service::auth`) carry the username but never passwords;
//! filters below only decide how much of them reaches stdout.

use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const COMPACT_FILTER: &str = "info,tower_http=info,axum=info";
const JSON_FILTER: &str = "info,service::auth=debug";

/// Output flavour selected by `[server] log_format` or `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; anything else, or nothing, is compact.
    pub fn from_switch(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }

    fn default_filter(self) -> &'static str {
        match self {
            LogFormat::Compact => COMPACT_FILTER,
            LogFormat::Json => JSON_FILTER,
        }
    }
}

fn env_filter(format: LogFormat) -> EnvFilter {
    // RUST_LOG wins, e.g. RUST_LOG=info,service::auth=trace
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format.default_filter()))
}

/// Human-readable request and account events for local runs.
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter(LogFormat::Compact))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// One JSON object per event; login rejections show up at debug.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter(LogFormat::Json))
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

pub fn init_logging_from_format(format: Option<&str>) {
    match LogFormat::from_switch(format) {
        LogFormat::Json => init_logging_json(),
        LogFormat::Compact => init_logging_default(),
    }
}
