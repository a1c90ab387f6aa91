//! Error taxonomy for parsing, resolving, and lowering guard expressions (§7).

use flowcheck_base::Span;
use std::fmt;

/// Errors raised while turning a guard expression's source text into a
/// typed, enum-lowered [`crate::Ast`].
#[derive(Debug)]
pub enum AstError {
    /// The expression text is not in the grammar (§4.1).
    Parse { position: usize, message: String },
    /// A dotted identifier could not be resolved against scope.
    UnknownIdentifier { name: String, span: Span },
    /// A macro call's argument kinds did not match its declared signature.
    MacroTypeError { macro_name: String, message: String, span: Span },
    /// An operator's operand types did not satisfy its typing rule.
    Type { expr: String, got: String, expected: String, span: Span },
    /// Enum lowering failed: literal not a member, or an inequality over a
    /// non-numeric enum, or the lowered set was empty.
    EnumDomain { variable: String, message: String, span: Span },
}

impl fmt::Display for AstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstError::Parse { position, message } => {
                write!(f, "parse error at position {}: {}", position, message)
            }
            AstError::UnknownIdentifier { name, span } => {
                write!(f, "unknown identifier '{}' at {}..{}", name, span.start, span.end)
            }
            AstError::MacroTypeError { macro_name, message, span } => {
                write!(f, "macro '{}' at {}..{}: {}", macro_name, span.start, span.end, message)
            }
            AstError::Type { expr, got, expected, span } => write!(
                f,
                "type error in '{}' at {}..{}: expected {}, got {}",
                expr, span.start, span.end, expected, got
            ),
            AstError::EnumDomain { variable, message, span } => write!(
                f,
                "enum domain error for '{}' at {}..{}: {}",
                variable, span.start, span.end, message
            ),
        }
    }
}

impl std::error::Error for AstError {}

/// Alias for `std::result::Result<T, AstError>`.
pub type AstResult<T> = std::result::Result<T, AstError>;
