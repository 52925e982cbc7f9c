//! Trace sink handed to the tally so callers choose where diagnostics go.

/// Receives one line per notable tally decision.
pub trait TraceSink {
    fn trace(&mut self, stage: &str, message: &str);
}

/// Forwards to the `log` facade at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn trace(&mut self, stage: &str, message: &str) {
        log::debug!(target: "round_robin_tally", "[{}] {}", stage, message);
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn trace(&mut self, _stage: &str, _message: &str) {}
}

/// Collects "stage: message" lines, handy in tests.
impl TraceSink for Vec<String> {
    fn trace(&mut self, stage: &str, message: &str) {
        self.push(format!("{}: {}", stage, message));
    }
}
