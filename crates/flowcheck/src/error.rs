//! The orchestrator's top-level error type, wrapping each stage's error (§7).

use std::fmt;

/// One stage's failure, wrapped for [`crate::Report`].
#[derive(Debug)]
pub enum Error {
    Load(flowcheck_loader::LoadError),
    Ast(flowcheck_ast::AstError),
    Symbolic(flowcheck_symbolic::SymbolicError),
    Graph(flowcheck_graph::GraphError),
}

impl Error {
    /// The machine-readable kind name from the error taxonomy table, used
    /// for `--format json` rendering.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Load(flowcheck_loader::LoadError::Io { .. }) => "LoadError",
            Error::Load(flowcheck_loader::LoadError::MalformedXml { .. }) => "LoadError",
            Error::Load(flowcheck_loader::LoadError::UndeclaredVariable { .. }) => "UndeclaredVariable",
            Error::Load(flowcheck_loader::LoadError::EnumConflict { .. }) => "EnumConflict",
            Error::Ast(flowcheck_ast::AstError::Parse { .. }) => "ParseError",
            Error::Ast(flowcheck_ast::AstError::UnknownIdentifier { .. }) => "UnknownIdentifier",
            Error::Ast(flowcheck_ast::AstError::MacroTypeError { .. }) => "MacroTypeError",
            Error::Ast(flowcheck_ast::AstError::Type { .. }) => "TypeError",
            Error::Ast(flowcheck_ast::AstError::EnumDomain { .. }) => "EnumDomainError",
            Error::Symbolic(_) => "EnumDomainError",
            Error::Graph(flowcheck_graph::GraphError::InDegree { .. }) => "InDegreeError",
            Error::Graph(flowcheck_graph::GraphError::Propagation { .. }) => "PropagationError",
            Error::Graph(flowcheck_graph::GraphError::Soundness { .. }) => "SoundnessError",
            Error::Graph(flowcheck_graph::GraphError::Disjointness { .. }) => "DisjointnessError",
            Error::Graph(flowcheck_graph::GraphError::Reachability { .. }) => "ReachabilityError",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Load(e) => write!(f, "{}", e),
            Error::Ast(e) => write!(f, "{}", e),
            Error::Symbolic(e) => write!(f, "{}", e),
            Error::Graph(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<flowcheck_loader::LoadError> for Error {
    fn from(e: flowcheck_loader::LoadError) -> Error {
        Error::Load(e)
    }
}

impl From<flowcheck_ast::AstError> for Error {
    fn from(e: flowcheck_ast::AstError) -> Error {
        Error::Ast(e)
    }
}

impl From<flowcheck_symbolic::SymbolicError> for Error {
    fn from(e: flowcheck_symbolic::SymbolicError) -> Error {
        Error::Symbolic(e)
    }
}

impl From<flowcheck_graph::GraphError> for Error {
    fn from(e: flowcheck_graph::GraphError) -> Error {
        Error::Graph(e)
    }
}
