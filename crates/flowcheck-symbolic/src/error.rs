//! Errors raised while building and evaluating enum domains.

use std::fmt;

/// Errors raised by the enum model and interval lifting (§4.5, §4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolicError {
    /// A declared enum variable has no members.
    EmptyEnum { variable: String },
    /// An `==`/`!=` comparison used a literal that is not one of the enum's members.
    LiteralNotInEnum { variable: String, literal: String },
    /// An ordering comparison (`gt`/`ge`/`lt`/`le`) was used against a
    /// non-numeric enum, which only supports `eq`/`ne`.
    OrderingOnNonNumericEnum { variable: String },
    /// An ordering comparison's satisfying set was empty after lowering
    /// (no enum member satisfies the inequality).
    UnsatisfiableOrdering { variable: String },
}

impl fmt::Display for SymbolicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicError::EmptyEnum { variable } => {
                write!(f, "enum domain '{}' has no members", variable)
            }
            SymbolicError::LiteralNotInEnum { variable, literal } => {
                write!(f, "'{}' is not a member of enum '{}'", literal, variable)
            }
            SymbolicError::OrderingOnNonNumericEnum { variable } => {
                write!(f, "ordering comparison used against non-numeric enum '{}'", variable)
            }
            SymbolicError::UnsatisfiableOrdering { variable } => {
                write!(f, "no member of enum '{}' satisfies the comparison", variable)
            }
        }
    }
}

impl std::error::Error for SymbolicError {}

/// Alias for `std::result::Result<T, SymbolicError>`.
pub type SymbolicResult<T> = std::result::Result<T, SymbolicError>;
