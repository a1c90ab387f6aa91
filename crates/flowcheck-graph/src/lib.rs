//! # flowcheck-graph
//!
//! The page graph and the checks run over it (§4.7): an in-degree precheck,
//! BFS predicate propagation with edge-filter tightening, a soundness
//! check (every node's outbound guards disjoin to `true`), a disjointness
//! check (no two outbound edges of a node are simultaneously satisfiable),
//! and a terminal-reachability check (every sink's predicate converges to
//! `true`).
//!
//! # Module Structure
//!
//! - [`graph`] — [`Graph`], [`Edge`], in-degree precheck
//! - [`propagate`] — [`propagate::evaluate_node_predicates`], edge-filter tightening
//! - [`checks`] — soundness, disjointness, reachability
//! - [`error`] — [`GraphError`]

pub mod checks;
pub mod error;
pub mod graph;
pub mod propagate;

pub use checks::{disjointness_check, graph_disjointness_check, graph_soundness_check, reachability_check};
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, NodeId};
pub use propagate::{evaluate_edge_filters, evaluate_node_predicates, normalize};

use flowcheck_base::Interner;
use flowcheck_symbolic::{EnumDomain, GuardExpr};
use std::collections::HashMap;

/// Runs the full graph engine over `graph`: in-degree precheck, predicate
/// propagation, edge-filter tightening, then soundness, disjointness, and
/// reachability, in that order. Returns the final reaching predicate of
/// every node alongside the (now edge-tightened) graph.
///
/// Matches the original checker's top-level `main` pipeline: the first
/// violation encountered is returned rather than collecting every failure
/// across all four checks, since later checks assume the earlier ones held.
pub fn run(mut graph: Graph, enums: &[EnumDomain], interner: &Interner) -> GraphResult<(Graph, HashMap<NodeId, GuardExpr>)> {
    graph.check_in_degree()?;
    let preds = evaluate_node_predicates(&graph, enums)?;
    evaluate_edge_filters(&mut graph, &preds, enums);
    graph_soundness_check(&graph, enums)?;
    graph_disjointness_check(&graph, enums)?;
    reachability_check(&graph, &preds, enums, interner)?;
    Ok((graph, preds))
}
