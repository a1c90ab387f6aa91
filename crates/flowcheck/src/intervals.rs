//! Derives interval-based enum domains for numeric variables that carry no
//! declared response domain and are only ever compared via order relops
//! against literal numbers (§4.6).
//!
//! A declared enum variable's numeric comparisons are handled entirely by
//! its derived `{var}_NUM` domain (see [`crate::enums`]); this module only
//! concerns plain `<variable type="number">` variables, which have no
//! natural finite domain until their comparisons are collected questionnaire-
//! wide and refined into a disjoint partition.

use crate::error::Error;
use flowcheck_ast::{parse, resolve, Scope};
use flowcheck_base::{Interner, Symbol};
use flowcheck_loader::{Page, VarType, Variable};
use flowcheck_symbolic::{interval, interval::Interval, EnumDomain, GuardExpr, GuardType, Lit, RelOp};
use std::collections::HashMap;

/// One numeric variable's disjoint interval partition, paired with the
/// [`EnumDomain`] presenting that partition to the rest of the symbolic layer.
pub struct IntervalDomain {
    pub domain: EnumDomain,
    pub pieces: Vec<Interval>,
}

/// Scans every transition condition for order comparisons against a plain
/// number variable, and builds one [`IntervalDomain`] per variable found,
/// keyed by the variable's interned symbol.
pub fn derive_interval_domains(
    pages: &[Page],
    variables: &HashMap<String, Variable>,
    scope: &Scope,
    interner: &mut Interner,
) -> Result<HashMap<Symbol, IntervalDomain>, Error> {
    let mut collected: HashMap<String, Vec<Vec<Interval>>> = HashMap::new();

    for page in pages {
        for transition in &page.transitions {
            let Some(src) = transition.condition.as_deref() else { continue };
            if src == "true" || src == "false" {
                continue;
            }
            let ast = parse(src)?;
            let resolved = resolve(&ast, scope, interner)?;
            collect_comparisons(&resolved, variables, interner, &mut collected);
        }
    }

    let mut out = HashMap::new();
    for (name, sets) in collected {
        let pieces = interval::refine_disjoint(&sets);
        let domain = interval::build_enum(interner, &name, &pieces)?;
        out.insert(domain.variable, IntervalDomain { domain, pieces });
    }
    Ok(out)
}

fn collect_comparisons(
    expr: &GuardExpr,
    variables: &HashMap<String, Variable>,
    interner: &Interner,
    out: &mut HashMap<String, Vec<Vec<Interval>>>,
) {
    match expr {
        GuardExpr::Not(inner) => collect_comparisons(inner, variables, interner, out),
        GuardExpr::And(l, r) | GuardExpr::Or(l, r) => {
            collect_comparisons(l, variables, interner, out);
            collect_comparisons(r, variables, interner, out);
        }
        GuardExpr::Rel(op, l, r) => {
            if let Some((name, op, literal)) = numeric_comparison(*op, l, r, variables, interner) {
                out.entry(name).or_default().push(interval::set_for(op, literal));
            }
        }
        GuardExpr::Lit(_) | GuardExpr::Sym(_, _) => {}
    }
}

fn numeric_comparison(
    op: RelOp,
    l: &GuardExpr,
    r: &GuardExpr,
    variables: &HashMap<String, Variable>,
    interner: &Interner,
) -> Option<(String, RelOp, f64)> {
    match (l, r) {
        (GuardExpr::Sym(sym, GuardType::Number), GuardExpr::Lit(Lit::Int(n))) => {
            let name = interner.resolve(*sym).to_string();
            is_plain_number_var(&name, variables).then(|| (name, op, *n as f64))
        }
        (GuardExpr::Lit(Lit::Int(n)), GuardExpr::Sym(sym, GuardType::Number)) => {
            let name = interner.resolve(*sym).to_string();
            is_plain_number_var(&name, variables).then(|| (name, flip(op), *n as f64))
        }
        _ => None,
    }
}

fn is_plain_number_var(name: &str, variables: &HashMap<String, Variable>) -> bool {
    variables.get(name).map(|v| v.typ == VarType::Number).unwrap_or(false)
}

fn flip(op: RelOp) -> RelOp {
    match op {
        RelOp::Eq => RelOp::Eq,
        RelOp::Ne => RelOp::Ne,
        RelOp::Lt => RelOp::Gt,
        RelOp::Le => RelOp::Ge,
        RelOp::Gt => RelOp::Lt,
        RelOp::Ge => RelOp::Le,
    }
}

/// Rewrites every order comparison against a variable in `domains` onto its
/// interval partition, leaving everything else (including already-lowered
/// enum relops) untouched. Must run after [`flowcheck_ast::lower_enums`].
pub fn lower_intervals(expr: GuardExpr, domains: &HashMap<Symbol, IntervalDomain>) -> GuardExpr {
    match expr {
        GuardExpr::Not(inner) => GuardExpr::not(lower_intervals(*inner, domains)),
        GuardExpr::And(l, r) => GuardExpr::and(lower_intervals(*l, domains), lower_intervals(*r, domains)),
        GuardExpr::Or(l, r) => GuardExpr::or(lower_intervals(*l, domains), lower_intervals(*r, domains)),
        GuardExpr::Rel(op, l, r) => lower_rel(op, *l, *r, domains),
        other @ (GuardExpr::Lit(_) | GuardExpr::Sym(_, _)) => other,
    }
}

fn lower_rel(op: RelOp, l: GuardExpr, r: GuardExpr, domains: &HashMap<Symbol, IntervalDomain>) -> GuardExpr {
    if let (GuardExpr::Sym(sym, GuardType::Number), GuardExpr::Lit(Lit::Int(n))) = (&l, &r) {
        if let Some(entry) = domains.get(sym) {
            return interval::lift(&entry.domain, &entry.pieces, op, *n as f64);
        }
    }
    if let (GuardExpr::Lit(Lit::Int(n)), GuardExpr::Sym(sym, GuardType::Number)) = (&l, &r) {
        if let Some(entry) = domains.get(sym) {
            return interval::lift(&entry.domain, &entry.pieces, flip(op), *n as f64);
        }
    }
    GuardExpr::Rel(op, Box::new(l), Box::new(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcheck_loader::Transition;

    fn page_with(conditions: Vec<&str>) -> Page {
        Page {
            uid: "1".to_string(),
            transitions: conditions
                .into_iter()
                .enumerate()
                .map(|(i, c)| Transition { target_uid: (i + 2).to_string(), condition: Some(c.to_string()) })
                .collect(),
            var_refs: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    fn number_var(name: &str) -> (String, Variable) {
        (name.to_string(), Variable { name: name.to_string(), typ: VarType::Number, is_preload: false })
    }

    #[test]
    fn three_way_split_is_collected_and_lowered_to_tautology() {
        let mut interner = Interner::new();
        let variables: HashMap<String, Variable> = [number_var("v1")].into_iter().collect();
        let scope = Scope::root(vec![("v1".to_string(), GuardType::Number)]);
        let page = page_with(vec!["v1 lt 500", "v1 ge 500 and v1 le 800", "v1 gt 800"]);

        let domains = derive_interval_domains(&[page], &variables, &scope, &mut interner).unwrap();
        assert_eq!(domains.len(), 1);

        let lt = lower_intervals(
            resolve(&parse("v1 lt 500").unwrap(), &scope, &mut interner).unwrap(),
            &domains,
        );
        let mid = lower_intervals(
            resolve(&parse("v1 ge 500 and v1 le 800").unwrap(), &scope, &mut interner).unwrap(),
            &domains,
        );
        let gt = lower_intervals(
            resolve(&parse("v1 gt 800").unwrap(), &scope, &mut interner).unwrap(),
            &domains,
        );

        let enums: Vec<EnumDomain> = domains.values().map(|d| d.domain.clone()).collect();
        let disjunction = GuardExpr::or_all([lt, mid, gt]);
        assert!(flowcheck_symbolic::is_tautology(&disjunction, &enums));
    }

    #[test]
    fn enum_variable_comparisons_are_not_collected() {
        let mut interner = Interner::new();
        let variables: HashMap<String, Variable> = HashMap::new();
        let scope = Scope::root(vec![("p1".to_string(), GuardType::String)]);
        let page = page_with(vec!["p1 == 'y'"]);
        let domains = derive_interval_domains(&[page], &variables, &scope, &mut interner).unwrap();
        assert!(domains.is_empty());
    }
}
