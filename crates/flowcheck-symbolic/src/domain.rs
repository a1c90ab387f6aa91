//! Finite enum domains and the brute-force evaluator.
//!
//! Grounded directly on the `Category` class in the original questionnaire
//! checker: each enum owns a per-member substitution dictionary that pins
//! the enum variable to exactly one member, and a null-substitution that
//! erases the enum from an expression entirely.

use crate::error::{SymbolicError, SymbolicResult};
use crate::guard::{GuardExpr, GuardType, RelOp, SubsMap};
use flowcheck_base::{Interner, Symbol};

/// One member of an enum domain: its key (a string uid or a numeric value)
/// and the fresh literal symbol (`LIT_{var}_{member}`) standing for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumMember {
    pub key: MemberKey,
    pub literal: Symbol,
}

/// The key identifying one enum member, typed per [`EnumDomain::typ`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKey {
    Str(String),
    Int(i64),
}

/// A finite enumerated variable domain (§4.5).
///
/// For every questionnaire enum variable, the loader/orchestrator derives
/// two `EnumDomain`s: a string-typed one keyed by answer-option uid, and a
/// number-typed one (named `{var}_NUM`) keyed by answer-option value.
#[derive(Clone, Debug)]
pub struct EnumDomain {
    /// The symbol this domain's variable resolves to (e.g. `p1` or `p1_NUM`).
    pub variable: Symbol,
    /// The same variable, spelled out, so error paths can name it without
    /// needing access to the interner that produced `variable`.
    pub variable_name: String,
    pub typ: GuardType,
    /// Ordered so that iteration order — and therefore brute-force cell
    /// order — is deterministic across runs.
    pub members: Vec<EnumMember>,
}

impl EnumDomain {
    /// Builds a domain, interning a fresh `LIT_{var}_{member}` symbol for
    /// every member.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolicError::EmptyEnum`] if `members` is empty.
    pub fn new(
        interner: &mut Interner,
        variable_name: &str,
        typ: GuardType,
        member_keys: Vec<MemberKey>,
    ) -> SymbolicResult<EnumDomain> {
        if member_keys.is_empty() {
            return Err(SymbolicError::EmptyEnum {
                variable: variable_name.to_string(),
            });
        }
        let variable = interner.intern(variable_name);
        let members = member_keys
            .into_iter()
            .map(|key| {
                let label = match &key {
                    MemberKey::Str(s) => s.clone(),
                    MemberKey::Int(n) => n.to_string(),
                };
                let literal = interner.intern(&format!("LIT_{}_{}", variable_name, label));
                EnumMember { key, literal }
            })
            .collect();
        Ok(EnumDomain { variable, variable_name: variable_name.to_string(), typ, members })
    }

    fn var_expr(&self) -> GuardExpr {
        GuardExpr::sym(self.variable, self.typ)
    }

    fn member_expr(&self, m: &EnumMember) -> GuardExpr {
        GuardExpr::sym(m.literal, self.typ)
    }

    fn find(&self, key: &MemberKey) -> Option<&EnumMember> {
        self.members.iter().find(|m| &m.key == key)
    }

    /// `var == member_literal`.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolicError::LiteralNotInEnum`] if `key` is not one of
    /// this domain's members.
    pub fn eq(&self, key: &MemberKey) -> SymbolicResult<GuardExpr> {
        let member = self.find(key).ok_or_else(|| SymbolicError::LiteralNotInEnum {
            variable: self.variable_name.clone(),
            literal: format!("{:?}", key),
        })?;
        Ok(GuardExpr::eq(self.var_expr(), self.member_expr(member)))
    }

    /// `var != member_literal`.
    pub fn ne(&self, key: &MemberKey) -> SymbolicResult<GuardExpr> {
        Ok(GuardExpr::not(self.eq(key)?))
    }

    /// `var OP literal`, valid only for number-typed domains: the
    /// disjunction of `eq(m)` over every member `m` whose key satisfies
    /// `m OP literal` (§4.3's enum-lowering rule for inequalities).
    ///
    /// # Errors
    ///
    /// Returns [`SymbolicError::OrderingOnNonNumericEnum`] if this domain is
    /// not number-typed, or [`SymbolicError::UnsatisfiableOrdering`] if no
    /// member satisfies the comparison.
    pub fn ordering(&self, op: RelOp, literal: i64) -> SymbolicResult<GuardExpr> {
        if self.typ != GuardType::Number {
            return Err(SymbolicError::OrderingOnNonNumericEnum {
                variable: self.variable_name.clone(),
            });
        }
        let satisfying: Vec<&EnumMember> = self
            .members
            .iter()
            .filter(|m| match &m.key {
                MemberKey::Int(v) => satisfies(op, *v, literal),
                MemberKey::Str(_) => false,
            })
            .collect();
        if satisfying.is_empty() {
            return Err(SymbolicError::UnsatisfiableOrdering {
                variable: self.variable_name.clone(),
            });
        }
        Ok(GuardExpr::or_all(
            satisfying
                .into_iter()
                .map(|m| GuardExpr::eq(self.var_expr(), self.member_expr(m))),
        ))
    }

    pub fn lt(&self, literal: i64) -> SymbolicResult<GuardExpr> {
        self.ordering(RelOp::Lt, literal)
    }
    pub fn le(&self, literal: i64) -> SymbolicResult<GuardExpr> {
        self.ordering(RelOp::Le, literal)
    }
    pub fn gt(&self, literal: i64) -> SymbolicResult<GuardExpr> {
        self.ordering(RelOp::Gt, literal)
    }
    pub fn ge(&self, literal: i64) -> SymbolicResult<GuardExpr> {
        self.ordering(RelOp::Ge, literal)
    }

    /// The substitution map, one per member, asserting "the enum variable
    /// equals this member": the member's equality atom maps to `true`,
    /// every other member's equality atom maps to `false`.
    pub fn subs_dicts(&self) -> Vec<SubsMap> {
        self.members
            .iter()
            .map(|m| {
                let mut map = SubsMap::new();
                for other in &self.members {
                    let atom = GuardExpr::eq(self.var_expr(), self.member_expr(other));
                    map.insert(atom, GuardExpr::bool(other.key == m.key));
                }
                map
            })
            .collect()
    }

    /// A substitution map that erases this enum: the variable symbol and
    /// every member-literal symbol map to `false`.
    pub fn null_subs(&self) -> SubsMap {
        let mut map = SubsMap::new();
        map.insert(self.var_expr(), GuardExpr::bool(false));
        for m in &self.members {
            map.insert(self.member_expr(m), GuardExpr::bool(false));
        }
        map
    }
}

fn satisfies(op: RelOp, value: i64, literal: i64) -> bool {
    match op {
        RelOp::Lt => value < literal,
        RelOp::Le => value <= literal,
        RelOp::Gt => value > literal,
        RelOp::Ge => value >= literal,
        RelOp::Eq => value == literal,
        RelOp::Ne => value != literal,
    }
}

/// Enumerates the cartesian product of every domain's `subs_dicts`,
/// returning the simplified expression obtained under each combined cell
/// substitution — a finite boolean truth table over the enum domains.
pub fn brute_force(exp: &GuardExpr, enums: &[EnumDomain]) -> Vec<GuardExpr> {
    let mut cells: Vec<SubsMap> = vec![SubsMap::new()];
    for domain in enums {
        let mut next = Vec::with_capacity(cells.len() * domain.members.len().max(1));
        for base in &cells {
            for member_subs in domain.subs_dicts() {
                let mut combined = base.clone();
                combined.extend(member_subs);
                next.push(combined);
            }
        }
        cells = next;
    }
    cells.iter().map(|cell| exp.subs(cell).simplify()).collect()
}

/// `true` if `exp` brute-forces to `true` on every cell of `enums`.
pub fn is_tautology(exp: &GuardExpr, enums: &[EnumDomain]) -> bool {
    brute_force(exp, enums).iter().all(GuardExpr::is_true)
}

/// `true` if `exp` brute-forces to `false` on every cell of `enums`.
pub fn is_contradiction(exp: &GuardExpr, enums: &[EnumDomain]) -> bool {
    brute_force(exp, enums).iter().all(GuardExpr::is_false)
}

/// For each enum `E` in `enums`, with every *other* enum simultaneously
/// erased, checks whether `exp` reduces to `true` for every member of `E`;
/// if so, erases `E` from `exp` as well. Enums whose value doesn't affect
/// the outcome are removed one at a time until none can be erased further.
pub fn simplify_enums(exp: &GuardExpr, enums: &[EnumDomain]) -> GuardExpr {
    let mut current = exp.simplify();
    for (i, domain) in enums.iter().enumerate() {
        let mut others_null = SubsMap::new();
        for (j, other) in enums.iter().enumerate() {
            if i != j {
                others_null.extend(other.null_subs());
            }
        }
        let erasable = domain.subs_dicts().into_iter().all(|member_subs| {
            let mut combined = others_null.clone();
            combined.extend(member_subs);
            current.subs(&combined).simplify().is_true()
        });
        if erasable {
            current = current.subs(&domain.null_subs()).simplify();
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_valued(interner: &mut Interner, name: &str) -> EnumDomain {
        EnumDomain::new(
            interner,
            name,
            GuardType::String,
            vec![MemberKey::Str("y".into()), MemberKey::Str("n".into())],
        )
        .unwrap()
    }

    #[test]
    fn empty_enum_is_rejected() {
        let mut interner = Interner::new();
        let err = EnumDomain::new(&mut interner, "p1", GuardType::String, vec![]).unwrap_err();
        assert_eq!(err, SymbolicError::EmptyEnum { variable: "p1".into() });
    }

    #[test]
    fn eq_literal_not_in_enum_errors() {
        let mut interner = Interner::new();
        let p1 = two_valued(&mut interner, "p1");
        assert!(p1.eq(&MemberKey::Str("na".into())).is_err());
    }

    #[test]
    fn brute_force_covers_every_member() {
        let mut interner = Interner::new();
        let p1 = two_valued(&mut interner, "p1");
        let disjunction = GuardExpr::or(
            p1.eq(&MemberKey::Str("y".into())).unwrap(),
            p1.eq(&MemberKey::Str("n".into())).unwrap(),
        );
        assert!(is_tautology(&disjunction, &[p1]));
    }

    #[test]
    fn brute_force_detects_missing_combination() {
        let mut interner = Interner::new();
        let p1 = two_valued(&mut interner, "p1");
        // Only one of the two members is covered.
        let partial = p1.eq(&MemberKey::Str("y".into())).unwrap();
        assert!(!is_tautology(&partial, &[p1]));
    }

    #[test]
    fn null_subs_erases_irrelevant_enum() {
        let mut interner = Interner::new();
        let p1 = two_valued(&mut interner, "p1");
        let p2 = two_valued(&mut interner, "p2");
        // An expression mentioning only p2: p1 should be erasable.
        let expr = p2.eq(&MemberKey::Str("y".into())).unwrap();
        let simplified = simplify_enums(&expr, &[p1, p2]);
        // p1 had no bearing, so the result should not mention p1's symbols
        // and should still brute-force identically to the original on p2.
        assert!(matches!(simplified, GuardExpr::Rel(RelOp::Eq, ..)));
    }

    #[test]
    fn numeric_ordering_lowers_to_disjunction() {
        let mut interner = Interner::new();
        let domain = EnumDomain::new(
            &mut interner,
            "p1",
            GuardType::Number,
            (1..=7).map(MemberKey::Int).collect(),
        )
        .unwrap();
        let lt3 = domain.lt(3).unwrap();
        // lt(3) should cover exactly members 1 and 2.
        assert!(is_tautology(
            &GuardExpr::or(lt3.clone(), domain.ge(3).unwrap()),
            std::slice::from_ref(&domain)
        ));
        assert!(!is_tautology(&lt3, &[domain]));
    }

    #[test]
    fn ordering_on_non_numeric_enum_is_rejected() {
        let mut interner = Interner::new();
        let p1 = two_valued(&mut interner, "p1");
        assert_eq!(
            p1.lt(1).unwrap_err(),
            SymbolicError::OrderingOnNonNumericEnum { variable: "p1".to_string() }
        );
    }
}
