//! Error codes for the argmap diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Syntax errors
//! - `E2xx` - Reference errors
//! - `E3xx` - Structural errors reported by the graph model
//! - `W4xx` - Configuration warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unknown instruction.
    ///
    /// The line is not a claim, relation, style or position instruction.
    E100,

    // =========================================================================
    // Reference Errors (E2xx)
    // =========================================================================
    /// Unknown variable.
    ///
    /// A variable was referenced before it was defined.
    E200,

    /// Position of a relation.
    ///
    /// A `position` line names a variable bound to a relation; only claims
    /// can be placed.
    E201,

    // =========================================================================
    // Structural Errors (E3xx)
    // =========================================================================
    /// Type mismatch.
    ///
    /// A relation source is not a claim, or its target is neither a claim
    /// nor a relation.
    E300,

    /// Relation without sources.
    E301,

    // =========================================================================
    // Configuration Warnings (W4xx)
    // =========================================================================
    /// Unknown style property.
    ///
    /// A `style` line names a path that is not a numeric style property, or
    /// a value the property cannot take. The line is skipped.
    W400,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::W400 => "W400",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unknown instruction",
            ErrorCode::E200 => "unknown variable",
            ErrorCode::E201 => "relations have no position",
            ErrorCode::E300 => "type mismatch",
            ErrorCode::E301 => "no source claims",
            ErrorCode::W400 => "style property not set",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
        assert_eq!(ErrorCode::W400.to_string(), "W400");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "unknown instruction");
        assert_eq!(ErrorCode::E200.description(), "unknown variable");
        assert_eq!(ErrorCode::W400.description(), "style property not set");
    }
}
