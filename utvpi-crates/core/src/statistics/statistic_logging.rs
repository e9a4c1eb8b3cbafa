//! Where statistics go. Until [`configure_statistic_logging`] is called, they are dropped.

use std::fmt::Display;
use std::io::stdout;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

struct StatisticSink {
    /// Printed in front of every statistic: `{prefix} {name}={value}`.
    prefix: &'static str,
    casing: Option<Case>,
    writer: Box<dyn Write + Send>,
}

static STATISTIC_SINK: OnceLock<Mutex<StatisticSink>> = OnceLock::new();

/// Enable statistic logging.
///
/// Statistics are written as `{prefix} {name}={value}` lines to `writer`, or to stdout if no
/// writer is given. If `casing` is set, names are converted to it first. Only the first call has
/// an effect.
pub fn configure_statistic_logging(
    prefix: &'static str,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send>>,
) {
    let _ = STATISTIC_SINK.get_or_init(|| {
        Mutex::new(StatisticSink {
            prefix,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

/// Write one statistic, if statistic logging has been configured.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(sink) = STATISTIC_SINK.get() else {
        return;
    };

    let Ok(mut sink) = sink.lock() else {
        return;
    };

    let name = match sink.casing {
        Some(casing) => name.to_string().to_case(casing),
        None => name.to_string(),
    };
    let prefix = sink.prefix;
    let _ = writeln!(sink.writer, "{prefix} {name}={value}");
}

/// Whether [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    STATISTIC_SINK.get().is_some()
}
