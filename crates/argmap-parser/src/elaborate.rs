//! Elaboration of script lines into a graph.
//!
//! The [`Builder`] walks the script line by line, recognizes each line with
//! the [`parser`](crate::parser) and applies it to the target graph and
//! style. Variables are bound as lines are processed, so a line can only
//! refer to variables bound on earlier lines. The first error stops the
//! walk; warnings are collected and processing continues.

use std::collections::HashMap;

use log::{debug, trace};

use argmap_core::{
    GraphError,
    geometry::Point,
    graph::{ClaimAttrs, Element, Graph, RelationAttrs, RelationKind},
    style::{StyleConfig, StyleError},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser::{self, Instruction},
    span::{Span, Spanned},
};

type Result<T> = std::result::Result<T, Diagnostic>;

pub(crate) struct Builder<'src, 'g> {
    source: &'src str,
    graph: &'g mut Graph,
    style: &'g mut StyleConfig,
    /// Element bound to each variable, spanned by its binding site
    variables: HashMap<&'src str, Spanned<Element>>,
    collector: DiagnosticCollector,
}

impl<'src, 'g> Builder<'src, 'g> {
    pub(crate) fn new(source: &'src str, graph: &'g mut Graph, style: &'g mut StyleConfig) -> Self {
        Self {
            source,
            graph,
            style,
            variables: HashMap::new(),
            collector: DiagnosticCollector::new(),
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    /// Applies every line of the script.
    ///
    /// Returns the warnings on success. Line numbers in diagnostics are
    /// 1-based physical lines, blank lines included.
    pub(crate) fn build(mut self) -> std::result::Result<Vec<Diagnostic>, ParseError> {
        let mut instructions = 0usize;

        for (index, line) in self.source.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                continue;
            }

            let number = index + 1;
            if let Err(diagnostic) = self.build_line(number, line) {
                self.collector.emit(diagnostic.with_line(number));
                break;
            }
            instructions += 1;
        }

        debug!(
            instructions,
            variables = self.variables.len(),
            failed = self.collector.has_errors();
            "Script elaborated"
        );
        self.collector.finish()
    }

    fn build_line(&mut self, number: usize, line: &'src str) -> Result<()> {
        let Some(instruction) = parser::instruction(line) else {
            let trimmed = line.trim();
            return Err(Diagnostic::error(format!("unknown instruction \"{trimmed}\""))
                .with_code(ErrorCode::E100)
                .with_label(self.locate(trimmed), "not a claim, relation, style or position")
                .with_help(
                    "expected `VAR: TEXT`, `VAR: SOURCES supports TARGET`, \
                     `style PATH NUMBER` or `position VAR at X Y`",
                ));
        };
        trace!(line = number, instruction:? = instruction; "Instruction recognized");

        match instruction {
            Instruction::Claim {
                variable,
                assume,
                text,
            } => {
                self.build_claim(variable, assume, text);
                Ok(())
            }
            Instruction::Relation {
                variable,
                assume,
                sources,
                kind,
                target,
            } => self.build_relation(line, variable, assume, &sources, kind, target),
            Instruction::Style { path, value } => {
                self.apply_style(number, path, value);
                Ok(())
            }
            Instruction::Position { variable, x, y } => self.build_position(variable, x, y),
        }
    }

    // ============================================================================
    // Instructions
    // ============================================================================

    fn build_claim(&mut self, variable: &'src str, assume: bool, text: &str) {
        let attrs = ClaimAttrs::new()
            .with_assumption(assume)
            .with_variable(variable);
        let claim = self.graph.add_claim(text, attrs);
        self.bind(variable, claim.into());
    }

    fn build_relation(
        &mut self,
        line: &'src str,
        variable: &'src str,
        assume: bool,
        sources: &[&'src str],
        kind: RelationKind,
        target: &'src str,
    ) -> Result<()> {
        let sources = sources
            .iter()
            .map(|source| self.resolve(source))
            .collect::<Result<Vec<_>>>()?;
        let target = self.resolve(target)?;

        let attrs = RelationAttrs::new()
            .with_assumption(assume)
            .with_variable(variable);
        let relation = self
            .graph
            .add_relation(sources, target, kind, attrs)
            .map_err(|err| self.graph_error(line, err))?;

        self.bind(variable, relation.into());
        Ok(())
    }

    fn apply_style(&mut self, number: usize, path: &'src str, value: f32) {
        match self.style.set(path, value) {
            Ok(()) => debug!(path, value; "Style property set"),
            Err(err) => {
                let (label, help) = match &err {
                    StyleError::UnknownPath(_) => (
                        "unknown property",
                        "settable properties are `scale`, `padding.*`, `claim.padding.*`, \
                         `claim.fontSize`, `claim.lineHeight`, `claim.maxWidth` and \
                         `relation.size`",
                    ),
                    StyleError::InvalidValue { .. } => (
                        "invalid value",
                        "`scale` and `claim.fontSize` must be greater than zero",
                    ),
                };
                self.collector.emit(
                    Diagnostic::warning(format!("cannot set style property: {err}"))
                        .with_code(ErrorCode::W400)
                        .with_line(number)
                        .with_label(self.locate(path), label)
                        .with_help(help),
                );
            }
        }
    }

    fn build_position(&mut self, variable: &'src str, x: i32, y: i32) -> Result<()> {
        let binding = self.lookup(variable)?;

        match *binding.inner() {
            Element::Claim(claim) => {
                self.graph
                    .set_claim_position(claim, Point::new(x as f32, y as f32));
                Ok(())
            }
            Element::Relation(_) => Err(Diagnostic::error(format!(
                "variable \"{variable}\" is a relation and has no position"
            ))
            .with_code(ErrorCode::E201)
            .with_label(self.locate(variable), "refers to a relation")
            .with_secondary_label(binding.span(), "bound here")
            .with_help("only claims can be positioned")),
        }
    }

    // ============================================================================
    // Variables
    // ============================================================================

    fn bind(&mut self, variable: &'src str, element: Element) {
        let binding = Spanned::new(element, self.locate(variable));
        if self.variables.insert(variable, binding).is_some() {
            debug!(variable; "Variable rebound");
        }
    }

    fn lookup(&self, variable: &'src str) -> Result<Spanned<Element>> {
        self.variables.get(variable).copied().ok_or_else(|| {
            Diagnostic::error(format!("variable \"{variable}\" is unknown"))
                .with_code(ErrorCode::E200)
                .with_label(self.locate(variable), "not defined on an earlier line")
                .with_help(format!("define `{variable}` before referring to it"))
        })
    }

    fn resolve(&self, variable: &'src str) -> Result<Element> {
        self.lookup(variable).map(|binding| *binding.inner())
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    fn locate(&self, part: &str) -> Span {
        Span::locate(self.source, part)
    }

    fn graph_error(&self, line: &str, err: GraphError) -> Diagnostic {
        let code = match err {
            GraphError::NoSources => ErrorCode::E301,
            GraphError::TypeMismatch { .. } => ErrorCode::E300,
        };
        Diagnostic::error(err.to_string())
            .with_code(code)
            .with_label(self.locate(line.trim()), "in this relation")
            .with_help("relations run from claims to claims or to other relations")
    }
}
