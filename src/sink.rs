//! Destinations for service-reported error payloads.
//!
//! The HTTP client hands every `output` payload of an `isBoom` response to an
//! [`ErrorSink`] exactly once before failing the call.

use serde_json::Value;
use std::io::Write;

/// Log target used by [`LogSink`].
pub const LOG_TARGET: &str = "jsonfetch::service";

/// Records diagnostic payloads reported by remote services.
///
/// Implementations may be called from many tasks at once.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorSink: Send + Sync {
    fn record(&self, diagnostic: &Value);
}

/// Writes each diagnostic as a single JSON line to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl ErrorSink for StderrSink {
    fn record(&self, diagnostic: &Value) {
        let mut stderr = std::io::stderr().lock();
        // Nothing sensible to do if stderr is gone
        let _ = writeln!(stderr, "{}", diagnostic);
    }
}

/// Forwards each diagnostic to the `log` facade at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn record(&self, diagnostic: &Value) {
        log::error!(target: LOG_TARGET, "{}", diagnostic);
    }
}

impl<T: ErrorSink + ?Sized> ErrorSink for std::sync::Arc<T> {
    fn record(&self, diagnostic: &Value) {
        (**self).record(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_stderr_sink_accepts_any_payload() {
        let sink = StderrSink;
        sink.record(&json!({"message": "bad"}));
        sink.record(&Value::Null);
    }

    #[test_log::test]
    fn test_log_sink_accepts_any_payload() {
        LogSink.record(&json!({"statusCode": 400, "payload": {"error": "Bad Request"}}));
    }

    #[test]
    fn test_arc_sink_forwards_to_inner() {
        let mut mock = MockErrorSink::new();
        mock.expect_record()
            .withf(|diagnostic| diagnostic == &json!({"message": "bad"}))
            .times(1)
            .return_const(());

        let sink = Arc::new(mock);
        sink.record(&json!({"message": "bad"}));
    }

    #[test]
    fn test_sink_usable_as_trait_object() {
        let sinks: Vec<Box<dyn ErrorSink>> = vec![Box::new(StderrSink), Box::new(LogSink)];
        for sink in &sinks {
            sink.record(&json!("diagnostic"));
        }
    }
}
