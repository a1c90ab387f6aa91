//! Graph engine error taxonomy (§7).

use std::fmt;

/// Errors raised while constructing or evaluating the page graph.
#[derive(Debug)]
pub enum GraphError {
    /// Zero or more than one node had in-degree zero.
    InDegree { zero_in_degree_nodes: Vec<String> },
    /// A full BFS pass made no progress; the remaining nodes are listed.
    Propagation { stalled: Vec<String> },
    /// A node's outbound disjunction is not a tautology.
    Soundness { offenders: Vec<String> },
    /// Two outbound edges of a node share a satisfying cell.
    Disjointness { node: String, edge_a: String, edge_b: String },
    /// A sink's predicate is not `true` after propagation.
    Reachability { offenders: Vec<(String, String)> },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::InDegree { zero_in_degree_nodes } => write!(
                f,
                "expected exactly one zero-in-degree node (the source); found {}: {}",
                zero_in_degree_nodes.len(),
                zero_in_degree_nodes.join(", ")
            ),
            GraphError::Propagation { stalled } => {
                write!(f, "predicate propagation made no progress; stalled on: {}", stalled.join(", "))
            }
            GraphError::Soundness { offenders } => {
                write!(f, "outbound guards are not a tautology at: {}", offenders.join(", "))
            }
            GraphError::Disjointness { node, edge_a, edge_b } => write!(
                f,
                "node '{}' has overlapping outbound guards toward '{}' and '{}'",
                node, edge_a, edge_b
            ),
            GraphError::Reachability { offenders } => {
                let rendered: Vec<String> = offenders.iter().map(|(n, p)| format!("{} (requires {})", n, p)).collect();
                write!(f, "unreachable sink(s): {}", rendered.join("; "))
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Alias for `std::result::Result<T, GraphError>`.
pub type GraphResult<T> = std::result::Result<T, GraphError>;
