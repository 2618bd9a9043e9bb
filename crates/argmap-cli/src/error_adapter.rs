//! Rendering of [`ArgmapError`] and script warnings through miette.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceCode, SourceSpan};

use argmap::ArgmapError;
use argmap_parser::Diagnostic;

/// A script diagnostic together with the script its labels point into.
#[derive(Debug)]
pub struct ScriptReport<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> ScriptReport<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Display for ScriptReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.diag.line() {
            write!(f, "line {line}: ")?;
        }
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for ScriptReport<'_> {}

impl MietteDiagnostic for ScriptReport<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let code = self.diag.code()?;
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        if self.diag.severity().is_warning() {
            Some(Severity::Warning)
        } else {
            Some(Severity::Error)
        }
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let help = self.diag.help()?;
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.diag.labels().is_empty() {
            return None;
        }
        let labels = self.diag.labels().iter().map(|label| {
            let span = SourceSpan::new(label.span().start().into(), label.span().len());
            let text = Some(label.message().to_owned());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(text, span)
            } else {
                LabeledSpan::new_with_span(text, span)
            }
        });
        Some(Box::new(labels))
    }
}

/// An error with no script location, coded by the stage that failed.
#[derive(Debug)]
struct StageReport<'a>(&'a ArgmapError);

impl fmt::Display for StageReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for StageReport<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for StageReport<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let stage = match self.0 {
            ArgmapError::Io(_) => "io",
            ArgmapError::Parse { .. } => "parse",
            ArgmapError::Graph(_) => "graph",
            ArgmapError::Layout(_) => "layout",
        };
        Some(Box::new(format!("argmap::{stage}")))
    }
}

/// Splits `err` into miette reports: one per diagnostic of a parse error,
/// a single one otherwise.
pub fn reports(err: &ArgmapError) -> Vec<Box<dyn MietteDiagnostic + '_>> {
    match err {
        ArgmapError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Box::new(ScriptReport::new(diag, src)) as Box<dyn MietteDiagnostic + '_>)
            .collect(),
        _ => {
            let report: Box<dyn MietteDiagnostic + '_> = Box::new(StageReport(err));
            vec![report]
        }
    }
}

/// Renders a report with miette's graphical handler.
pub fn render(report: &dyn MietteDiagnostic) -> String {
    let mut out = String::new();
    match miette::GraphicalReportHandler::new().render_report(&mut out, report) {
        Ok(()) => out,
        Err(err) => format!("{report} (rendering failed: {err})"),
    }
}
