use std::io;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// 0 = warn, 1 = debug (hyper noise suppressed), 2+ = trace. `RUST_LOG` overrides.
pub fn filter_directive(verbose_level: u8) -> &'static str {
    match verbose_level {
        0 => "warn",
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    }
}

/// Logs go to a daily rolling file; the terminal belongs to the TUI.
pub fn init_logging(verbose_level: u8, log_file: &Path) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose_level)));

    let log_dir = log_file
        .parent()
        .ok_or_else(|| io::Error::other("log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;
    let log_filename = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::other("invalid log filename"))?;
    // "pokewish.log" rotates as pokewish.2026-01-17 etc.
    let log_prefix = log_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(log_filename);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);
    let fmt_layer = fmt::layer()
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false)
        .with_writer(file_appender);

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|err| io::Error::other(format!("failed to install logger: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(filter_directive(0), "warn");
        assert!(filter_directive(1).starts_with("debug"));
        assert_eq!(filter_directive(2), "trace");
        assert_eq!(filter_directive(9), "trace");
    }

    #[test]
    fn test_log_file_without_parent_is_rejected() {
        assert!(init_logging(0, Path::new("")).is_err());
    }
}
