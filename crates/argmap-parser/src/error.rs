//! Error and diagnostic system for the argmap script parser.
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with an optional error code, the 1-based script
//! line it refers to, labelled source spans and help text. Diagnostics are
//! wrapped in [`ParseError`] when a parse fails.
//!
//! # Example
//!
//! ```
//! # use argmap_parser::error::{Diagnostic, ErrorCode};
//! # use argmap_parser::Span;
//! let diag = Diagnostic::error("variable \"t\" is unknown")
//!     .with_code(ErrorCode::E200)
//!     .with_line(3)
//!     .with_label(Span::new(21..22), "not defined on an earlier line")
//!     .with_help("define `t` before referring to it");
//!
//! assert_eq!(diag.to_string(), "error[E200]: line 3: variable \"t\" is unknown");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
