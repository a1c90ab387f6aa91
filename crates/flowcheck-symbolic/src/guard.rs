//! The symbolic boolean/relational kernel.
//!
//! [`GuardExpr`] is the normalized form every transition guard is lowered
//! into: typed literals and symbols combined with `Not`/`And`/`Or` and the
//! relational operators `Eq`/`Ne`/`Lt`/`Le`/`Gt`/`Ge`. The kernel supports
//! structural-identity substitution ([`GuardExpr::subs`]), a deterministic
//! simplifier ([`GuardExpr::simplify`]), and DNF conversion
//! ([`GuardExpr::to_dnf`]) used by the disjointness check.
//!
//! # Examples
//!
//! ```
//! use flowcheck_base::Interner;
//! use flowcheck_symbolic::{GuardExpr, GuardType};
//!
//! let mut interner = Interner::new();
//! let p1 = interner.intern("p1");
//! let lit_y = interner.intern("LIT_p1_y");
//!
//! let guard = GuardExpr::eq(
//!     GuardExpr::sym(p1, GuardType::String),
//!     GuardExpr::sym(lit_y, GuardType::String),
//! );
//!
//! // Eq of a symbol with itself always simplifies to true.
//! let reflexive = GuardExpr::eq(guard.clone(), guard.clone());
//! assert_eq!(reflexive.simplify(), GuardExpr::Lit(Lit::Bool(true)));
//! # use flowcheck_symbolic::Lit;
//! ```

use flowcheck_base::Symbol;
use std::collections::HashMap;

/// The static type of a guard sub-expression, used only for consistency
/// checking during construction and lowering. Evaluation treats every
/// symbol as an opaque atom regardless of its declared type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GuardType {
    Boolean,
    Number,
    String,
}

/// A primitive literal value.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Lit {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// A relational operator comparing two typed sub-expressions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelOp {
    fn name(self) -> &'static str {
        match self {
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
            RelOp::Lt => "lt",
            RelOp::Le => "le",
            RelOp::Gt => "gt",
            RelOp::Ge => "ge",
        }
    }

    /// The operator obtained by swapping which side is considered larger.
    /// Used when folding constants: `a lt b` iff `b gt a`.
    fn flip(self) -> RelOp {
        match self {
            RelOp::Eq => RelOp::Eq,
            RelOp::Ne => RelOp::Ne,
            RelOp::Lt => RelOp::Gt,
            RelOp::Le => RelOp::Ge,
            RelOp::Gt => RelOp::Lt,
            RelOp::Ge => RelOp::Le,
        }
    }
}

/// A symbolic boolean/relational expression over typed atoms.
///
/// `GuardExpr` is cheap to clone (an owning tree of boxed nodes) and
/// implements structural `Eq`/`Hash`, so it can be used directly as a
/// substitution-map key or a simplification-cache key.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum GuardExpr {
    Lit(Lit),
    /// A typed, interned atom — a variable or an enum member literal symbol.
    Sym(Symbol, GuardType),
    Not(Box<GuardExpr>),
    And(Box<GuardExpr>, Box<GuardExpr>),
    Or(Box<GuardExpr>, Box<GuardExpr>),
    Rel(RelOp, Box<GuardExpr>, Box<GuardExpr>),
}

/// A substitution map from whole sub-expressions to their replacement.
///
/// Keys may be bare [`GuardExpr::Sym`] atoms (as used by
/// [`crate::domain::EnumDomain::null_subs`]) or full relational
/// sub-expressions (as used by
/// [`crate::domain::EnumDomain::subs_dicts`]); [`GuardExpr::subs`] checks
/// for a match at every node before recursing into its children, so either
/// granularity works.
pub type SubsMap = HashMap<GuardExpr, GuardExpr>;

impl GuardExpr {
    /// Builds a boolean literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowcheck_symbolic::GuardExpr;
    /// assert_eq!(GuardExpr::bool(true).simplify(), GuardExpr::bool(true));
    /// ```
    pub fn bool(b: bool) -> GuardExpr {
        GuardExpr::Lit(Lit::Bool(b))
    }

    /// Builds an integer literal.
    pub fn int(n: i64) -> GuardExpr {
        GuardExpr::Lit(Lit::Int(n))
    }

    /// Builds a string literal.
    pub fn str(s: impl Into<String>) -> GuardExpr {
        GuardExpr::Lit(Lit::Str(s.into()))
    }

    /// Builds a typed symbol atom.
    pub fn sym(name: Symbol, ty: GuardType) -> GuardExpr {
        GuardExpr::Sym(name, ty)
    }

    /// Logical negation.
    pub fn not(x: GuardExpr) -> GuardExpr {
        GuardExpr::Not(Box::new(x))
    }

    /// Logical conjunction.
    pub fn and(l: GuardExpr, r: GuardExpr) -> GuardExpr {
        GuardExpr::And(Box::new(l), Box::new(r))
    }

    /// Logical disjunction.
    pub fn or(l: GuardExpr, r: GuardExpr) -> GuardExpr {
        GuardExpr::Or(Box::new(l), Box::new(r))
    }

    /// Left-folds `and` over an iterator, returning `true` for an empty input.
    pub fn and_all(exprs: impl IntoIterator<Item = GuardExpr>) -> GuardExpr {
        exprs
            .into_iter()
            .reduce(GuardExpr::and)
            .unwrap_or_else(|| GuardExpr::bool(true))
    }

    /// Left-folds `or` over an iterator, returning `false` for an empty input.
    pub fn or_all(exprs: impl IntoIterator<Item = GuardExpr>) -> GuardExpr {
        exprs
            .into_iter()
            .reduce(GuardExpr::or)
            .unwrap_or_else(|| GuardExpr::bool(false))
    }

    pub fn eq(l: GuardExpr, r: GuardExpr) -> GuardExpr {
        GuardExpr::Rel(RelOp::Eq, Box::new(l), Box::new(r))
    }

    pub fn ne(l: GuardExpr, r: GuardExpr) -> GuardExpr {
        GuardExpr::Rel(RelOp::Ne, Box::new(l), Box::new(r))
    }

    pub fn lt(l: GuardExpr, r: GuardExpr) -> GuardExpr {
        GuardExpr::Rel(RelOp::Lt, Box::new(l), Box::new(r))
    }

    pub fn le(l: GuardExpr, r: GuardExpr) -> GuardExpr {
        GuardExpr::Rel(RelOp::Le, Box::new(l), Box::new(r))
    }

    pub fn gt(l: GuardExpr, r: GuardExpr) -> GuardExpr {
        GuardExpr::Rel(RelOp::Gt, Box::new(l), Box::new(r))
    }

    pub fn ge(l: GuardExpr, r: GuardExpr) -> GuardExpr {
        GuardExpr::Rel(RelOp::Ge, Box::new(l), Box::new(r))
    }

    /// Returns `true` if this expression is the literal `true`.
    pub fn is_true(&self) -> bool {
        matches!(self, GuardExpr::Lit(Lit::Bool(true)))
    }

    /// Returns `true` if this expression is the literal `false`.
    pub fn is_false(&self) -> bool {
        matches!(self, GuardExpr::Lit(Lit::Bool(false)))
    }

    /// Replaces matching sub-expressions with their images from `map`.
    ///
    /// A node is checked against `map` *before* its children are visited, so
    /// a key that names a whole relational sub-expression (e.g. the `Eq`
    /// atom `var == lit_m`) takes precedence over a key that names one of
    /// its symbol operands.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowcheck_base::Interner;
    /// use flowcheck_symbolic::{GuardExpr, GuardType, SubsMap};
    ///
    /// let mut interner = Interner::new();
    /// let p1 = interner.intern("p1");
    /// let sym = GuardExpr::sym(p1, GuardType::Boolean);
    ///
    /// let mut map = SubsMap::new();
    /// map.insert(sym.clone(), GuardExpr::bool(false));
    ///
    /// assert_eq!(GuardExpr::not(sym).subs(&map), GuardExpr::not(GuardExpr::bool(false)));
    /// ```
    pub fn subs(&self, map: &SubsMap) -> GuardExpr {
        if let Some(replacement) = map.get(self) {
            return replacement.clone();
        }
        match self {
            GuardExpr::Lit(_) | GuardExpr::Sym(..) => self.clone(),
            GuardExpr::Not(x) => GuardExpr::not(x.subs(map)),
            GuardExpr::And(l, r) => GuardExpr::and(l.subs(map), r.subs(map)),
            GuardExpr::Or(l, r) => GuardExpr::or(l.subs(map), r.subs(map)),
            GuardExpr::Rel(op, l, r) => GuardExpr::Rel(*op, Box::new(l.subs(map)), Box::new(r.subs(map))),
        }
    }

    /// Deterministically normalizes this expression: collapses boolean
    /// identities (`And`/`Or` with `true`/`false`, double negation),
    /// folds `Not` of a constant, and folds relational atoms whose operands
    /// are structurally identical or both literal.
    ///
    /// This is not a full boolean minimizer — soundness and disjointness
    /// checks rely on [`crate::domain::EnumDomain::brute_force`] truth-table
    /// enumeration rather than on simplification alone.
    pub fn simplify(&self) -> GuardExpr {
        match self {
            GuardExpr::Lit(_) | GuardExpr::Sym(..) => self.clone(),
            GuardExpr::Not(x) => {
                let x = x.simplify();
                match x {
                    GuardExpr::Lit(Lit::Bool(b)) => GuardExpr::bool(!b),
                    GuardExpr::Not(inner) => *inner,
                    other => GuardExpr::not(other),
                }
            }
            GuardExpr::And(l, r) => {
                let l = l.simplify();
                let r = r.simplify();
                if l.is_false() || r.is_false() {
                    GuardExpr::bool(false)
                } else if l.is_true() {
                    r
                } else if r.is_true() {
                    l
                } else if l == r {
                    l
                } else {
                    GuardExpr::and(l, r)
                }
            }
            GuardExpr::Or(l, r) => {
                let l = l.simplify();
                let r = r.simplify();
                if l.is_true() || r.is_true() {
                    GuardExpr::bool(true)
                } else if l.is_false() {
                    r
                } else if r.is_false() {
                    l
                } else if l == r {
                    l
                } else {
                    GuardExpr::or(l, r)
                }
            }
            GuardExpr::Rel(op, l, r) => {
                let l = l.simplify();
                let r = r.simplify();
                if let Some(folded) = fold_rel(*op, &l, &r) {
                    folded
                } else {
                    GuardExpr::Rel(*op, Box::new(l), Box::new(r))
                }
            }
        }
    }

    /// Converts to disjunctive normal form (a disjunction of conjunctions of
    /// literals/atoms), distributing `And` over `Or`.
    ///
    /// Used by the disjointness check, which needs a form whose top-level
    /// structure is a flat union of cells.
    pub fn to_dnf(&self) -> GuardExpr {
        let simplified = self.simplify();
        match simplified {
            GuardExpr::And(l, r) => distribute(l.to_dnf(), r.to_dnf()),
            GuardExpr::Or(l, r) => GuardExpr::or(l.to_dnf(), r.to_dnf()),
            other => other,
        }
    }

    /// Renders this expression in the same infix notation guards are parsed
    /// from, used for diagnostics.
    pub fn render(&self, interner: &flowcheck_base::Interner) -> String {
        match self {
            GuardExpr::Lit(Lit::Bool(b)) => b.to_string(),
            GuardExpr::Lit(Lit::Int(n)) => n.to_string(),
            GuardExpr::Lit(Lit::Str(s)) => format!("'{}'", s),
            GuardExpr::Sym(s, _) => interner.resolve(*s).to_string(),
            GuardExpr::Not(x) => format!("!{}", x.render(interner)),
            GuardExpr::And(l, r) => format!("({} and {})", l.render(interner), r.render(interner)),
            GuardExpr::Or(l, r) => format!("({} or {})", l.render(interner), r.render(interner)),
            GuardExpr::Rel(op, l, r) => {
                format!("({} {} {})", l.render(interner), op.name(), r.render(interner))
            }
        }
    }
}

fn distribute(l: GuardExpr, r: GuardExpr) -> GuardExpr {
    match (l, r) {
        (GuardExpr::Or(l1, l2), r) => GuardExpr::or(distribute(*l1, r.clone()), distribute(*l2, r)),
        (l, GuardExpr::Or(r1, r2)) => GuardExpr::or(distribute(l.clone(), *r1), distribute(l, *r2)),
        (l, r) => GuardExpr::and(l, r),
    }
}

fn fold_rel(op: RelOp, l: &GuardExpr, r: &GuardExpr) -> Option<GuardExpr> {
    if l == r {
        return Some(GuardExpr::bool(matches!(
            op,
            RelOp::Eq | RelOp::Le | RelOp::Ge
        )));
    }
    if let (GuardExpr::Lit(a), GuardExpr::Lit(b)) = (l, r) {
        return Some(GuardExpr::bool(eval_lit_rel(op, a, b)));
    }
    None
}

fn eval_lit_rel(op: RelOp, a: &Lit, b: &Lit) -> bool {
    match (a, b) {
        (Lit::Int(a), Lit::Int(b)) => match op {
            RelOp::Eq => a == b,
            RelOp::Ne => a != b,
            RelOp::Lt => a < b,
            RelOp::Le => a <= b,
            RelOp::Gt => a > b,
            RelOp::Ge => a >= b,
        },
        (Lit::Bool(a), Lit::Bool(b)) => match op {
            RelOp::Eq => a == b,
            RelOp::Ne => a != b,
            _ => false,
        },
        (Lit::Str(a), Lit::Str(b)) => match op {
            RelOp::Eq => a == b,
            RelOp::Ne => a != b,
            RelOp::Lt => a < b,
            RelOp::Le => a <= b,
            RelOp::Gt => a > b,
            RelOp::Ge => a >= b,
        },
        _ => match op {
            RelOp::Eq => false,
            RelOp::Ne => true,
            _ => eval_lit_rel(op.flip(), b, a),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcheck_base::Interner;

    fn sym(interner: &mut Interner, name: &str) -> GuardExpr {
        GuardExpr::sym(interner.intern(name), GuardType::String)
    }

    #[test]
    fn and_identity_collapses() {
        let x = GuardExpr::bool(true);
        assert_eq!(GuardExpr::and(x, GuardExpr::bool(false)).simplify(), GuardExpr::bool(false));
    }

    #[test]
    fn or_identity_collapses() {
        assert_eq!(
            GuardExpr::or(GuardExpr::bool(false), GuardExpr::bool(false)).simplify(),
            GuardExpr::bool(false)
        );
        assert_eq!(
            GuardExpr::or(GuardExpr::bool(true), GuardExpr::bool(false)).simplify(),
            GuardExpr::bool(true)
        );
    }

    #[test]
    fn double_negation_cancels() {
        let mut interner = Interner::new();
        let p = sym(&mut interner, "p1");
        assert_eq!(GuardExpr::not(GuardExpr::not(p.clone())).simplify(), p);
    }

    #[test]
    fn not_of_constant_folds() {
        assert_eq!(GuardExpr::not(GuardExpr::bool(true)).simplify(), GuardExpr::bool(false));
    }

    #[test]
    fn eq_of_identical_subexpressions_is_true() {
        let mut interner = Interner::new();
        let p = sym(&mut interner, "p1");
        assert_eq!(GuardExpr::eq(p.clone(), p).simplify(), GuardExpr::bool(true));
    }

    #[test]
    fn eq_of_distinct_symbols_does_not_fold() {
        let mut interner = Interner::new();
        let a = sym(&mut interner, "a");
        let b = sym(&mut interner, "b");
        let folded = GuardExpr::eq(a, b).simplify();
        assert!(!folded.is_true() && !folded.is_false());
    }

    #[test]
    fn literal_relations_fold() {
        assert_eq!(GuardExpr::lt(GuardExpr::int(1), GuardExpr::int(2)).simplify(), GuardExpr::bool(true));
        assert_eq!(GuardExpr::gt(GuardExpr::int(1), GuardExpr::int(2)).simplify(), GuardExpr::bool(false));
        assert_eq!(GuardExpr::ne(GuardExpr::str("y"), GuardExpr::str("n")).simplify(), GuardExpr::bool(true));
    }

    #[test]
    fn idempotent_and_or_collapse_to_operand() {
        let mut interner = Interner::new();
        let p = sym(&mut interner, "p1");
        assert_eq!(GuardExpr::and(p.clone(), p.clone()).simplify(), p.clone());
        assert_eq!(GuardExpr::or(p.clone(), p.clone()).simplify(), p);
    }

    #[test]
    fn subs_replaces_whole_matching_subexpression() {
        let mut interner = Interner::new();
        let p1 = interner.intern("p1");
        let lit_y = interner.intern("LIT_p1_y");
        let atom = GuardExpr::eq(GuardExpr::sym(p1, GuardType::String), GuardExpr::sym(lit_y, GuardType::String));

        let mut map = SubsMap::new();
        map.insert(atom.clone(), GuardExpr::bool(true));

        let expr = GuardExpr::and(atom, GuardExpr::bool(true));
        assert_eq!(expr.subs(&map).simplify(), GuardExpr::bool(true));
    }

    #[test]
    fn subs_falls_back_to_symbol_level_match() {
        let mut interner = Interner::new();
        let p1 = interner.intern("p1");
        let lit_y = interner.intern("LIT_p1_y");
        let p1_sym = GuardExpr::sym(p1, GuardType::String);
        let lit_sym = GuardExpr::sym(lit_y, GuardType::String);
        let atom = GuardExpr::eq(p1_sym.clone(), lit_sym.clone());

        let mut map = SubsMap::new();
        map.insert(p1_sym, GuardExpr::bool(false));
        map.insert(lit_sym, GuardExpr::bool(false));

        // null-substitution: both operands collapse to `false`, which makes
        // the equality vacuously true (erasing the enum's influence).
        assert_eq!(atom.subs(&map).simplify(), GuardExpr::bool(true));
    }

    #[test]
    fn to_dnf_distributes_and_over_or() {
        let mut interner = Interner::new();
        let a = sym(&mut interner, "a");
        let b = sym(&mut interner, "b");
        let c = sym(&mut interner, "c");
        let expr = GuardExpr::and(a, GuardExpr::or(b, c));
        let dnf = expr.to_dnf();
        assert!(matches!(dnf, GuardExpr::Or(..)));
    }

    #[test]
    fn render_matches_infix_surface_syntax() {
        let mut interner = Interner::new();
        let p1 = interner.intern("p1");
        let expr = GuardExpr::eq(GuardExpr::sym(p1, GuardType::String), GuardExpr::str("y"));
        assert_eq!(expr.render(&interner), "(p1 == 'y')");
    }
}
