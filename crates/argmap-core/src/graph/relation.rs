use std::fmt;

use super::{ClaimId, Element};

/// Handle of a relation inside a [`Graph`](super::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationId(pub(super) usize);

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relation#{}", self.0)
    }
}

/// The kind of a relation.
///
/// Conditions and exceptions are written `warrant` and `undercut` in
/// scripts; together they form the *context* of the element they target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Support,
    Attack,
    Condition,
    Exception,
}

/// Glyph drawn at the target end of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Arrow,
    Cross,
    /// No end marker, used for edges into compound claims
    Line,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Support,
        RelationKind::Attack,
        RelationKind::Condition,
        RelationKind::Exception,
    ];

    /// Script keyword, without the trailing `s`
    pub fn keyword(self) -> &'static str {
        match self {
            RelationKind::Support => "support",
            RelationKind::Attack => "attack",
            RelationKind::Condition => "warrant",
            RelationKind::Exception => "undercut",
        }
    }

    /// Inverse of [`RelationKind::keyword`].
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Conditions and exceptions group with their target.
    pub fn is_contextual(self) -> bool {
        matches!(self, RelationKind::Condition | RelationKind::Exception)
    }

    /// Contextual relations are drawn dashed
    pub fn is_dashed(self) -> bool {
        self.is_contextual()
    }

    pub fn glyph(self) -> Glyph {
        match self {
            RelationKind::Support | RelationKind::Condition => Glyph::Arrow,
            RelationKind::Attack | RelationKind::Exception => Glyph::Cross,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Attributes attached to a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationAttrs {
    pub assumption: bool,
    /// Set on the outgoing edge of a compound claim
    pub merged: bool,
    pub variable: Option<String>,
}

impl RelationAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assumption(mut self, assumption: bool) -> Self {
        self.assumption = assumption;
        self
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }
}

/// A typed edge from a claim to a claim or another relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    source: ClaimId,
    target: Element,
    kind: RelationKind,
    attrs: RelationAttrs,
}

impl Relation {
    pub(super) fn new(
        source: ClaimId,
        target: Element,
        kind: RelationKind,
        attrs: RelationAttrs,
    ) -> Self {
        Self {
            source,
            target,
            kind,
            attrs,
        }
    }

    pub fn source(&self) -> ClaimId {
        self.source
    }

    pub fn target(&self) -> Element {
        self.target
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn attrs(&self) -> &RelationAttrs {
        &self.attrs
    }

    pub fn is_merged(&self) -> bool {
        self.attrs.merged
    }

    pub fn is_assumption(&self) -> bool {
        self.attrs.assumption
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_round_trip() {
        for kind in RelationKind::ALL {
            assert_eq!(RelationKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(RelationKind::from_keyword("condition"), None);
        assert_eq!(RelationKind::from_keyword("Support"), None);
        assert_eq!(RelationKind::Condition.to_string(), "warrant");
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(RelationKind::Support.glyph(), Glyph::Arrow);
        assert_eq!(RelationKind::Condition.glyph(), Glyph::Arrow);
        assert_eq!(RelationKind::Attack.glyph(), Glyph::Cross);
        assert_eq!(RelationKind::Exception.glyph(), Glyph::Cross);
    }

    #[test]
    fn test_contextual_kinds() {
        assert!(!RelationKind::Support.is_contextual());
        assert!(!RelationKind::Attack.is_contextual());
        assert!(RelationKind::Condition.is_contextual());
        assert!(RelationKind::Exception.is_dashed());
    }
}
