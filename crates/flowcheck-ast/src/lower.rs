//! Enum lowering pass (§4.3): rewrites relops between an enum symbol and a
//! primitive literal into the equivalent expression over member literals.

use crate::error::AstError;
use flowcheck_base::Span;
use flowcheck_symbolic::{EnumDomain, GuardExpr, Lit, MemberKey, RelOp};

/// Rewrites every enum-vs-literal relop in `expr` against `enums`, leaving
/// everything else untouched. Must run after resolution and before the
/// graph engine consumes the guard.
pub fn lower_enums(expr: GuardExpr, enums: &[EnumDomain], span: Span) -> Result<GuardExpr, AstError> {
    match expr {
        GuardExpr::Not(inner) => Ok(GuardExpr::not(lower_enums(*inner, enums, span)?)),
        GuardExpr::And(l, r) => Ok(GuardExpr::and(lower_enums(*l, enums, span)?, lower_enums(*r, enums, span)?)),
        GuardExpr::Or(l, r) => Ok(GuardExpr::or(lower_enums(*l, enums, span)?, lower_enums(*r, enums, span)?)),
        GuardExpr::Rel(op, l, r) => lower_rel(op, *l, *r, enums, span),
        other @ (GuardExpr::Lit(_) | GuardExpr::Sym(_, _)) => Ok(other),
    }
}

fn lower_rel(op: RelOp, l: GuardExpr, r: GuardExpr, enums: &[EnumDomain], span: Span) -> Result<GuardExpr, AstError> {
    if let (GuardExpr::Sym(sym, _), GuardExpr::Lit(lit)) = (&l, &r) {
        if let Some(domain) = enums.iter().find(|e| e.variable == *sym) {
            return apply_domain_op(domain, op, lit, span);
        }
    }
    if let (GuardExpr::Lit(lit), GuardExpr::Sym(sym, _)) = (&l, &r) {
        if let Some(domain) = enums.iter().find(|e| e.variable == *sym) {
            return apply_domain_op(domain, flip(op), lit, span);
        }
    }
    Ok(GuardExpr::Rel(op, Box::new(l), Box::new(r)))
}

fn apply_domain_op(domain: &EnumDomain, op: RelOp, lit: &Lit, span: Span) -> Result<GuardExpr, AstError> {
    let wrap = |result: flowcheck_symbolic::SymbolicResult<GuardExpr>| {
        result.map_err(|e| AstError::EnumDomain { variable: domain.variable_name.clone(), message: e.to_string(), span })
    };
    match op {
        RelOp::Eq | RelOp::Ne => {
            let key = match lit {
                Lit::Str(s) => MemberKey::Str(s.clone()),
                Lit::Int(n) => MemberKey::Int(*n),
                Lit::Bool(_) => {
                    return Err(AstError::EnumDomain {
                        variable: domain.variable_name.clone(),
                        message: "boolean literal cannot match an enum member".to_string(),
                        span,
                    })
                }
            };
            wrap(if op == RelOp::Eq { domain.eq(&key) } else { domain.ne(&key) })
        }
        RelOp::Gt | RelOp::Ge | RelOp::Lt | RelOp::Le => {
            let Lit::Int(n) = lit else {
                return Err(AstError::EnumDomain {
                    variable: domain.variable_name.clone(),
                    message: "ordering comparison requires a numeric literal".to_string(),
                    span,
                });
            };
            wrap(domain.ordering(op, *n))
        }
    }
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
