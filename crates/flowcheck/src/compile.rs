//! Builds the scope and the page graph from a loaded questionnaire (§4.2, §4.7).

use crate::error::Error;
use crate::intervals::IntervalDomain;
use flowcheck_ast::{parse, resolve, Scope};
use flowcheck_base::{Interner, Symbol};
use flowcheck_graph::{Edge, Graph, NodeId};
use flowcheck_loader::{Page, Questionnaire, VarType};
use flowcheck_symbolic::{EnumDomain, GuardExpr, GuardType};
use std::collections::HashMap;

fn guard_type(typ: VarType) -> GuardType {
    match typ {
        VarType::String => GuardType::String,
        VarType::Number => GuardType::Number,
        VarType::Boolean => GuardType::Boolean,
        // The base enum variable is compared against quoted answer-option
        // uids, so it is scoped as a string; `zofar.asNumber` is how a
        // guard reaches the derived `{var}_NUM` domain instead.
        VarType::Enum => GuardType::String,
    }
}

pub fn build_scope(questionnaire: &Questionnaire) -> Scope {
    Scope::root(questionnaire.variables.values().map(|v| (v.name.clone(), guard_type(v.typ))))
}

/// Compiles one transition's condition into its edge filter, applying the
/// literal `"true"`/`"false"` short-circuit (§6) without invoking the
/// parser, then lowering enum relops and, in turn, interval relops.
fn compile_condition(
    condition: Option<&str>,
    scope: &Scope,
    enums: &[EnumDomain],
    interval_domains: &HashMap<Symbol, IntervalDomain>,
    interner: &mut Interner,
) -> Result<GuardExpr, Error> {
    match condition {
        None | Some("true") => Ok(GuardExpr::bool(true)),
        Some("false") => Ok(GuardExpr::bool(false)),
        Some(src) => {
            let ast = parse(src)?;
            let span = ast.span();
            let resolved = resolve(&ast, scope, interner)?;
            let enum_lowered = flowcheck_ast::lower_enums(resolved, enums, span)?;
            Ok(crate::intervals::lower_intervals(enum_lowered, interval_domains))
        }
    }
}

/// Builds this page's outbound edges, applying cascading exclusion: the
/// first transition in document order whose condition is the literal
/// `"true"` (or omitted, which defaults to `"true"`) is the page's sole
/// effective transition — later sibling transitions are unreachable and are
/// dropped with a debug-level log line rather than contributing dead edges.
fn build_edges(
    page: &Page,
    scope: &Scope,
    enums: &[EnumDomain],
    interval_domains: &HashMap<Symbol, IntervalDomain>,
    interner: &mut Interner,
) -> Result<Vec<Edge>, Error> {
    let mut edges = Vec::with_capacity(page.transitions.len());
    for transition in &page.transitions {
        let filter = compile_condition(transition.condition.as_deref(), scope, enums, interval_domains, interner)?;
        let unconditional = filter.is_true();
        edges.push(Edge { target: transition.target_uid.clone(), filter });
        if unconditional {
            let dropped = page.transitions.len() - edges.len();
            if dropped > 0 {
                log::debug!(
                    "page '{}': transition to '{}' is unconditional; dropping {} later sibling transition(s)",
                    page.uid,
                    transition.target_uid,
                    dropped
                );
            }
            break;
        }
    }
    Ok(edges)
}

/// Builds the page graph, rooted at the first page in document order.
///
/// # Errors
///
/// Propagates the first guard-compilation error encountered, in document
/// order over pages and then transitions within a page.
pub fn build_graph(
    questionnaire: &Questionnaire,
    scope: &Scope,
    enums: &[EnumDomain],
    interval_domains: &HashMap<Symbol, IntervalDomain>,
    interner: &mut Interner,
) -> Result<Graph, Error> {
    let source: NodeId = questionnaire
        .pages
        .first()
        .map(|p| p.uid.clone())
        .unwrap_or_default();
    let nodes: Vec<NodeId> = questionnaire.pages.iter().map(|p| p.uid.clone()).collect();

    let mut edge_map: HashMap<NodeId, Vec<Edge>> = HashMap::new();
    for page in &questionnaire.pages {
        let edges = build_edges(page, scope, enums, interval_domains, interner)?;
        edge_map.insert(page.uid.clone(), edges);
    }

    Ok(Graph::new(source, nodes, edge_map))
}
