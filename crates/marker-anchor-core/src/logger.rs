//! Logging setup for hosts and tools.
//!
//! Both backends read the filter from [`LOG_ENV`] first, so a host can bump a
//! single crate without recompiling, e.g.
//! `MARKER_ANCHOR_LOG=marker_anchor_tracking::plane=trace`.

use std::io::Write;
use std::time::Instant;

use log::LevelFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "MARKER_ANCHOR_LOG";

/// Module path relative to the workspace, `marker_anchor_tracking::plane` → `tracking::plane`.
fn short_target(target: &str) -> &str {
    target
        .strip_prefix("marker_anchor_")
        .or_else(|| target.strip_prefix("marker_anchor::"))
        .unwrap_or(target)
}

/// Install an `env_logger` backend writing `[elapsed LEVEL module] message`.
///
/// `level` applies when [`LOG_ENV`] is unset. Fails if a logger is
/// already installed.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let started = Instant::now();
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::new().filter(LOG_ENV))
        .format(move |buf, record| {
            writeln!(
                buf,
                "[{:8.3}s {:>5} {}] {}",
                started.elapsed().as_secs_f64(),
                record.level(),
                short_target(record.target()),
                record.args()
            )
        })
        .try_init()
}

/// Output layout for [`init_tracing`].
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceFormat {
    /// Single-line human output with uptime stamps.
    #[default]
    Compact,
    /// One JSON object per event, including the enclosing span.
    Json,
}

/// Install a `tracing` subscriber filtered by [`LOG_ENV`] (default `info`).
///
/// `log` records from the crates are forwarded into the subscriber.
#[cfg(feature = "tracing")]
pub fn init_tracing(
    format: TraceFormat,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE);
    match format {
        TraceFormat::Compact => builder
            .compact()
            .with_timer(fmt::time::Uptime::default())
            .try_init(),
        TraceFormat::Json => builder.json().with_current_span(true).try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_drop_the_workspace_prefix() {
        assert_eq!(short_target("marker_anchor_tracking::plane"), "tracking::plane");
        assert_eq!(short_target("marker_anchor::replay"), "replay");
        assert_eq!(short_target("my_host::scene"), "my_host::scene");
    }
}
