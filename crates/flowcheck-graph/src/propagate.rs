//! BFS predicate propagation and edge-filter tightening (§4.7).
//!
//! Grounded on `evaluate_node_predicates` in the original checker: the
//! source's predicate starts at `true`; every other node's predicate starts
//! at `false` and is repeatedly tightened to the disjunction of `pred(u) &
//! filter(u, v)` over its in-edges until a full pass makes no progress.

use crate::error::GraphError;
use crate::graph::{Graph, NodeId};
use flowcheck_symbolic::{is_contradiction, is_tautology, simplify_enums, EnumDomain, GuardExpr};
use std::collections::HashMap;

/// Collapses `expr` to a bare `true`/`false` literal when it brute-forces to
/// one on every cell of `enums`, otherwise keeps the [`simplify_enums`]
/// form. This extra collapse is what lets a predicate that has become
/// tautological under propagation compare equal to `GuardExpr::bool(true)`
/// later, rather than merely simplifying to some logically-equivalent
/// expression.
pub fn normalize(expr: &GuardExpr, enums: &[EnumDomain]) -> GuardExpr {
    if is_tautology(expr, enums) {
        GuardExpr::bool(true)
    } else if is_contradiction(expr, enums) {
        GuardExpr::bool(false)
    } else {
        simplify_enums(expr, enums)
    }
}

/// Runs BFS-requeue-until-no-progress predicate propagation, returning each
/// node's reaching predicate.
///
/// # Errors
///
/// Returns [`GraphError::Propagation`] if a full pass over every node still
/// reachable from the source makes no change to any predicate — this can
/// only happen in the presence of a cycle whose entry predicate depends on
/// itself.
pub fn evaluate_node_predicates(graph: &Graph, enums: &[EnumDomain]) -> Result<HashMap<NodeId, GuardExpr>, GraphError> {
    let bfs_reachable: std::collections::HashSet<NodeId> = graph.bfs_order().into_iter().collect();
    let mut preds: HashMap<NodeId, GuardExpr> = graph.nodes.iter().map(|n| (n.clone(), GuardExpr::bool(false))).collect();
    preds.insert(graph.source.clone(), GuardExpr::bool(true));

    loop {
        let mut changed = false;
        let mut stalled = Vec::new();

        for node in graph.nodes.iter().filter(|n| bfs_reachable.contains(*n)) {
            if *node == graph.source {
                continue;
            }
            let incoming = graph.in_edges(node);
            let reaching = incoming.into_iter().map(|(src, edge)| {
                let src_pred = preds.get(src).cloned().unwrap_or_else(|| GuardExpr::bool(false));
                GuardExpr::and(src_pred, edge.filter.clone())
            });
            let next = normalize(&GuardExpr::or_all(reaching), enums);

            let current = preds.get(node).cloned().unwrap_or_else(|| GuardExpr::bool(false));
            if next != current {
                changed = true;
                preds.insert(node.clone(), next);
            } else if current.is_false() {
                stalled.push(node.clone());
            }
        }

        if !changed {
            // A node with a still-false predicate and at least one in-edge
            // never made progress; that's a genuine stall, not convergence.
            let genuinely_stalled: Vec<NodeId> = stalled
                .into_iter()
                .filter(|n| !graph.in_edges(n).is_empty())
                .collect();
            if genuinely_stalled.is_empty() {
                return Ok(preds);
            }
            return Err(GraphError::Propagation { stalled: genuinely_stalled });
        }
    }
}

/// Tightens every edge's filter to `pred(source) & filter`, simplified
/// against `enums`. Run once `preds` has converged.
pub fn evaluate_edge_filters(graph: &mut Graph, preds: &HashMap<NodeId, GuardExpr>, enums: &[EnumDomain]) {
    for node in graph.nodes.clone() {
        let pred = preds.get(&node).cloned().unwrap_or_else(|| GuardExpr::bool(false));
        let tightened: Vec<_> = graph
            .out_edges(&node)
            .iter()
            .map(|edge| {
                let tightened_filter = normalize(&GuardExpr::and(pred.clone(), edge.filter.clone()), enums);
                crate::graph::Edge { target: edge.target.clone(), filter: tightened_filter }
            })
            .collect();
        graph.set_out_edges(&node, tightened);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use flowcheck_base::Interner;
    use flowcheck_symbolic::{GuardType, MemberKey};
    use std::collections::HashMap as Map;

    #[test]
    fn source_predicate_is_true_and_propagates_through_tautological_split() {
        let mut interner = Interner::new();
        let domain = EnumDomain::new(&mut interner, "p1", GuardType::String, vec![MemberKey::Str("y".into()), MemberKey::Str("n".into())]).unwrap();

        let mut edges: Map<NodeId, Vec<Edge>> = Map::new();
        edges.insert(
            "1".to_string(),
            vec![
                Edge { target: "2".to_string(), filter: domain.eq(&MemberKey::Str("y".into())).unwrap() },
                Edge { target: "3".to_string(), filter: domain.eq(&MemberKey::Str("n".into())).unwrap() },
            ],
        );
        let graph = Graph::new("1".to_string(), vec!["1".to_string(), "2".to_string(), "3".to_string()], edges);

        let preds = evaluate_node_predicates(&graph, &[domain]).unwrap();
        assert!(preds["1"].is_true());
        assert!(!preds["2"].is_false());
        assert!(!preds["3"].is_false());
    }

    #[test]
    fn unreachable_node_keeps_false_predicate() {
        let mut edges: Map<NodeId, Vec<Edge>> = Map::new();
        edges.insert("1".to_string(), vec![Edge { target: "2".to_string(), filter: GuardExpr::bool(true) }]);
        let graph = Graph::new("1".to_string(), vec!["1".to_string(), "2".to_string(), "3".to_string()], edges);

        let preds = evaluate_node_predicates(&graph, &[]).unwrap();
        assert!(preds["3"].is_false());
    }
}
