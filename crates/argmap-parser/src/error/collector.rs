//! Collector for diagnostics reported while interpreting a script.

use crate::error::{Diagnostic, ParseError};

/// Accumulates the diagnostics of one parse.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(ParseError)` with the errors
    ///   first, then the warnings.
    /// - Otherwise returns the warnings.
    pub(crate) fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if !self.has_errors {
            return Ok(self.diagnostics);
        }

        let (mut errors, warnings): (Vec<_>, Vec<_>) = self
            .diagnostics
            .into_iter()
            .partition(|d| d.severity().is_error());
        errors.extend(warnings);
        Err(ParseError::new(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert_eq!(collector.finish(), Ok(Vec::new()));
    }

    #[test]
    fn test_collector_keeps_warnings_on_success() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("test warning"));

        assert!(!collector.has_errors());
        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_collector_orders_errors_first() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::error("error 1"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics()[0].message(), "error 1");
        assert_eq!(err.diagnostics()[1].message(), "warning 1");
    }
}
