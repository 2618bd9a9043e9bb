use std::fmt;

use crate::{
    geometry::{Bounds, Point, Size},
    measure::TextMetrics,
};

/// Handle of a claim inside a [`Graph`](super::Graph).
///
/// Handles are never reused, so a handle outliving its claim is detected
/// as a deleted claim rather than silently aliasing a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(pub(super) usize);

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "claim#{}", self.0)
    }
}

/// Attributes attached to a claim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimAttrs {
    /// Unstated premise, drawn greyed out
    pub assumption: bool,
    /// Named scope, drawn with a per-scope border colour
    pub scope: Option<String>,
    /// Synthetic merge point of a multi-source relation
    pub compound: bool,
    /// Script variable the claim was bound to when parsed
    pub variable: Option<String>,
}

impl ClaimAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assumption(mut self, assumption: bool) -> Self {
        self.assumption = assumption;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub(super) fn compound() -> Self {
        Self {
            compound: true,
            ..Self::default()
        }
    }
}

/// A proposition in the argument graph.
///
/// A claim is placed at its anchor plus a transient drag offset; the offset
/// is zero unless the claim is being dragged. The box size comes from text
/// metrics which are cleared whenever the text changes and recomputed by
/// [`Graph::measure_claims`](super::Graph::measure_claims).
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    text: String,
    attrs: ClaimAttrs,
    anchor: Point,
    offset: Point,
    metrics: Option<TextMetrics>,
}

impl Claim {
    pub(super) fn new(text: String, attrs: ClaimAttrs) -> Self {
        Self {
            text,
            attrs,
            anchor: Point::default(),
            offset: Point::default(),
            metrics: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attrs(&self) -> &ClaimAttrs {
        &self.attrs
    }

    pub fn is_compound(&self) -> bool {
        self.attrs.compound
    }

    pub fn is_assumption(&self) -> bool {
        self.attrs.assumption
    }

    /// Committed position of the top-left corner
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Uncommitted drag offset
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Effective top-left corner: anchor plus drag offset
    pub fn position(&self) -> Point {
        self.anchor.add_point(self.offset)
    }

    /// Wrapped lines and box size, `None` until measured
    pub fn metrics(&self) -> Option<&TextMetrics> {
        self.metrics.as_ref()
    }

    /// Whether the metrics must be recomputed before layout.
    pub fn needs_measure(&self) -> bool {
        self.metrics.is_none()
    }

    /// Box size, `None` for a regular claim that has not been measured.
    ///
    /// Compound claims are always zero-sized.
    pub fn size(&self) -> Option<Size> {
        if self.is_compound() {
            return Some(Size::default());
        }
        self.metrics.as_ref().map(TextMetrics::size)
    }

    /// Box at the effective position; unmeasured claims occupy no space.
    pub fn bounds(&self) -> Bounds {
        self.position().to_bounds(self.size().unwrap_or_default())
    }

    pub(super) fn set_text(&mut self, text: String) {
        self.text = text;
        self.metrics = None;
    }

    pub(super) fn set_attrs(&mut self, attrs: ClaimAttrs) {
        self.attrs = attrs;
    }

    pub(super) fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    pub(super) fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Moves the drag offset into the anchor.
    pub(super) fn commit_offset(&mut self) {
        self.anchor = self.position();
        self.offset = Point::default();
    }

    pub(super) fn set_metrics(&mut self, metrics: TextMetrics) {
        self.metrics = Some(metrics);
    }
}
