//! # Argmap Parser
//!
//! Parser and serializer for the argmap script language, a line-oriented
//! text format for argument graphs:
//!
//! ```text
//! a: rain
//! b: wet ground
//! c: a supports b
//! style claim.maxWidth 200
//! position a at 20 40
//! ```
//!
//! Each line binds a variable to a claim (`VAR: TEXT`) or a relation
//! (`VAR: SOURCES supports TARGET`, with `attacks`, `warrants` and
//! `undercuts` as the other kinds), sets a numeric style property, or
//! places a claim. Either kind of binding line may start with `assume`.
//!
//! ## Usage
//!
//! ```
//! # use argmap_core::style::StyleConfig;
//! # use argmap_parser::{parse, serialize, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let mut style = StyleConfig::default();
//!     let graph = parse("a: rain\nb: wet ground\nc: a supports b", &mut style)?;
//!     assert_eq!(graph.relation_count(), 1);
//!
//!     let text = serialize(&graph);
//!     let reparsed = parse(&text, &mut style)?;
//!     assert_eq!(reparsed.claim_count(), 2);
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod parser;
mod serializer;
mod span;

pub use error::{Diagnostic, ParseError};
pub use serializer::serialize;
pub use span::Span;

use log::{debug, info};

use argmap_core::{graph::Graph, style::StyleConfig};

use elaborate::Builder;

/// Parses a script into a new graph.
///
/// The parse is atomic: on failure neither a graph nor any style change
/// escapes. On success, `style` lines of the script have been applied to
/// `style`. Warnings are dropped; use [`parse_into`] to keep them.
///
/// # Errors
///
/// Returns a [`ParseError`] whose first diagnostic is the error that
/// stopped the parse, carrying the 1-based line number.
pub fn parse(source: &str, style: &mut StyleConfig) -> Result<Graph, ParseError> {
    let mut graph = Graph::new();
    let mut staged = style.clone();

    parse_into(source, &mut graph, &mut staged)?;

    *style = staged;
    info!(
        claims = graph.claim_count(),
        relations = graph.relation_count();
        "Script parsed"
    );
    Ok(graph)
}

/// Parses a script into an existing graph.
///
/// Variables are local to this call; they cannot refer to elements that
/// were in `graph` before. On failure, `graph` and `style` keep every
/// change made by the lines before the failing one.
///
/// Returns the warnings raised while parsing.
///
/// # Errors
///
/// Returns a [`ParseError`] if a line is not a valid instruction or cannot
/// be applied to the graph.
pub fn parse_into(
    source: &str,
    graph: &mut Graph,
    style: &mut StyleConfig,
) -> Result<Vec<Diagnostic>, ParseError> {
    let warnings = Builder::new(source, graph, style).build()?;
    for warning in &warnings {
        debug!(warning:%; "Script warning");
    }
    Ok(warnings)
}
