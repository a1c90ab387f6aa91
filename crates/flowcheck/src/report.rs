//! The orchestrator's output type (§6): `Report{ok, errors, graph}`.

use crate::error::Error;
use flowcheck_base::Interner;
use flowcheck_graph::Graph;
use serde::Serialize;

/// One reported failure, rendered for both text and `--format json` output.
#[derive(Debug, Clone, Serialize)]
pub struct ReportError {
    pub kind: &'static str,
    pub message: String,
}

impl ReportError {
    fn from_error(err: &Error) -> ReportError {
        ReportError { kind: err.kind(), message: err.to_string() }
    }
}

/// One edge in the rendered graph: its target and its tightened filter,
/// rendered in the surface guard syntax.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeReport {
    pub target: String,
    pub filter: String,
}

/// One node in the rendered graph: its reaching predicate and its (now
/// edge-tightened) outbound edges.
#[derive(Debug, Clone, Serialize)]
pub struct NodeReport {
    pub uid: String,
    pub predicate: String,
    pub edges: Vec<EdgeReport>,
}

/// The checked, edge-tightened graph, rendered for output.
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub source: String,
    pub nodes: Vec<NodeReport>,
}

impl GraphReport {
    pub fn render(graph: &Graph, preds: &std::collections::HashMap<String, flowcheck_symbolic::GuardExpr>, interner: &Interner) -> GraphReport {
        let nodes = graph
            .nodes
            .iter()
            .map(|uid| NodeReport {
                uid: uid.clone(),
                predicate: preds.get(uid).map(|p| p.render(interner)).unwrap_or_else(|| "false".to_string()),
                edges: graph
                    .out_edges(uid)
                    .iter()
                    .map(|e| EdgeReport { target: e.target.clone(), filter: e.filter.render(interner) })
                    .collect(),
            })
            .collect();
        GraphReport { source: graph.source.clone(), nodes }
    }
}

/// The result of [`crate::check`]: whether the questionnaire passed every
/// check, the failures encountered if not, and the checked graph if so.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub ok: bool,
    pub errors: Vec<ReportError>,
    pub graph: Option<GraphReport>,
}

impl Report {
    pub fn success(graph: GraphReport) -> Report {
        Report { ok: true, errors: Vec::new(), graph: Some(graph) }
    }

    pub fn failure(errors: Vec<Error>) -> Report {
        Report { ok: false, errors: errors.iter().map(ReportError::from_error).collect(), graph: None }
    }

    /// Renders this report as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
