use thiserror::Error;

/// Structural errors raised by the graph model's mutation API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A relation was requested with an empty source list.
    #[error("no source claims provided")]
    NoSources,

    /// An argument did not have the category the operation expects.
    ///
    /// `found` names the category of the offending value, e.g. `"relation"`
    /// or `"deleted claim"`.
    #[error("{role} should be {expected}, is {found}")]
    TypeMismatch {
        role: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl GraphError {
    pub(crate) fn bad_source(found: &'static str) -> Self {
        Self::TypeMismatch {
            role: "source",
            expected: "a claim",
            found,
        }
    }

    pub(crate) fn bad_target(found: &'static str) -> Self {
        Self::TypeMismatch {
            role: "target",
            expected: "a claim or relation",
            found,
        }
    }
}
