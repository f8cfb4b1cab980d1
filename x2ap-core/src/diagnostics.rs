//! Diagnostic sink injected into pack/unpack calls
//!
//! Codec code never logs through a global handler. Each top-level call is
//! handed a sink and every cursor created for that call reports through it.

use log::Level;

/// Log target used by `LogSink`
pub const LOG_TARGET: &str = "x2ap";

/// Receiver for diagnostic events raised while packing or unpacking
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait DiagnosticSink {
    /// Report a single event
    fn report(&self, level: Level, message: &str);
}

/// Sink forwarding every event to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, level: Level, message: &str) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }
}

/// Sink discarding every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _level: Level, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(sink: &dyn DiagnosticSink) {
        sink.report(Level::Warn, "skipped IE 42");
    }

    #[test]
    fn test_mock_sink_receives_event() {
        let mut sink = MockDiagnosticSink::new();
        sink.expect_report()
            .withf(|level, message| *level == Level::Warn && message == "skipped IE 42")
            .times(1)
            .return_const(());
        emit(&sink);
    }

    #[test]
    fn test_null_and_log_sinks_accept_events() {
        emit(&NullSink);
        emit(&LogSink);
    }
}
