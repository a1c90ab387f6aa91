//! Loader error taxonomy (§7).

use std::fmt;

/// Errors raised while reading and validating a questionnaire XML document.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read (missing, permissions, not valid UTF-8).
    Io { path: String, message: String },
    /// The document is not well-formed XML.
    MalformedXml { message: String },
    /// A page body referenced a variable name that was never declared in
    /// `<variables>` or synthesized from `<preloads>`.
    UndeclaredVariable { page_uid: String, variable: String },
    /// The same enum variable's `<responseDomain>` produced a different
    /// `uid -> value` mapping on two different pages.
    EnumConflict { variable: String, first_page: String, second_page: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, message } => write!(f, "failed to read '{}': {}", path, message),
            LoadError::MalformedXml { message } => write!(f, "malformed XML: {}", message),
            LoadError::UndeclaredVariable { page_uid, variable } => write!(
                f,
                "page '{}' references undeclared variable '{}'",
                page_uid, variable
            ),
            LoadError::EnumConflict { variable, first_page, second_page } => write!(
                f,
                "enum '{}' declared with conflicting answer options on pages '{}' and '{}'",
                variable, first_page, second_page
            ),
        }
    }
}

impl std::error::Error for LoadError {}

/// Alias for `std::result::Result<T, LoadError>`.
pub type LoadResult<T> = std::result::Result<T, LoadError>;
