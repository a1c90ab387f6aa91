//! Soundness, disjointness, and terminal-reachability checks (§4.7).

use crate::error::GraphError;
use crate::graph::{Edge, Graph, NodeId};
use flowcheck_base::Interner;
use flowcheck_symbolic::{brute_force, is_tautology, EnumDomain, GuardExpr};
use std::collections::HashMap;

/// A node with no out-edges trivially satisfies soundness (there's nothing
/// to cover); otherwise its out-edges' filters must disjoin to `true`.
fn soundness_check(edges: &[Edge], enums: &[EnumDomain]) -> bool {
    if edges.is_empty() {
        return true;
    }
    let disjunction = GuardExpr::or_all(edges.iter().map(|e| e.filter.clone()));
    is_tautology(&disjunction, enums)
}

/// Every node reachable from the source must be sound: its out-edges must
/// cover every case admitted by its own reaching predicate. Call after
/// [`crate::propagate::evaluate_edge_filters`] has tightened the edges.
///
/// # Errors
///
/// Returns [`GraphError::Soundness`] naming every offending node.
pub fn graph_soundness_check(graph: &Graph, enums: &[EnumDomain]) -> Result<(), GraphError> {
    let offenders: Vec<NodeId> = graph
        .bfs_order()
        .into_iter()
        .filter(|node| !soundness_check(graph.out_edges(node), enums))
        .collect();
    if offenders.is_empty() {
        Ok(())
    } else {
        Err(GraphError::Soundness { offenders })
    }
}

/// No two out-edges of the same node may be satisfiable at once: for every
/// brute-force cell, at most one edge's filter may evaluate to `true`.
///
/// # Errors
///
/// Returns the first [`GraphError::Disjointness`] violation found, naming
/// the node and the two overlapping edge targets.
pub fn disjointness_check(node: &str, edges: &[Edge], enums: &[EnumDomain]) -> Result<(), GraphError> {
    if edges.len() < 2 {
        return Ok(());
    }
    let tables: Vec<Vec<GuardExpr>> = edges.iter().map(|e| brute_force(&e.filter, enums)).collect();
    let cell_count = tables.first().map(Vec::len).unwrap_or(0);

    for cell in 0..cell_count {
        let mut satisfied: Vec<&Edge> = Vec::new();
        for (edge, table) in edges.iter().zip(&tables) {
            if table[cell].is_true() {
                satisfied.push(edge);
            }
        }
        if satisfied.len() > 1 {
            return Err(GraphError::Disjointness {
                node: node.to_string(),
                edge_a: satisfied[0].target.clone(),
                edge_b: satisfied[1].target.clone(),
            });
        }
    }
    Ok(())
}

/// Runs [`disjointness_check`] over every node reachable from the source.
pub fn graph_disjointness_check(graph: &Graph, enums: &[EnumDomain]) -> Result<(), GraphError> {
    for node in graph.bfs_order() {
        disjointness_check(&node, graph.out_edges(&node), enums)?;
    }
    Ok(())
}

/// Every zero-out-degree node reachable from the source must have a
/// predicate of exactly `true`: a questionnaire taker can always reach it.
///
/// # Errors
///
/// Returns [`GraphError::Reachability`] listing every sink whose predicate
/// did not converge to `true`, with the predicate rendered for diagnostics.
pub fn reachability_check(
    graph: &Graph,
    preds: &HashMap<NodeId, GuardExpr>,
    enums: &[EnumDomain],
    interner: &Interner,
) -> Result<(), GraphError> {
    let offenders: Vec<(String, String)> = graph
        .bfs_order()
        .into_iter()
        .filter(|node| graph.out_edges(node).is_empty())
        .filter_map(|node| {
            let pred = preds.get(&node).cloned().unwrap_or_else(|| GuardExpr::bool(false));
            if pred.is_true() {
                None
            } else {
                let rendered = crate::propagate::normalize(&pred, enums).render(interner);
                Some((node, rendered))
            }
        })
        .collect();
    if offenders.is_empty() {
        Ok(())
    } else {
        Err(GraphError::Reachability { offenders })
    }
}
