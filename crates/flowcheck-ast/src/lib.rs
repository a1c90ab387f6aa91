//! Parses guard expression source, resolves and types it against a scope,
//! expands `zofar` macros, and lowers enum relops (§4.1–§4.3).

mod ast;
mod error;
mod lower;
mod parse;
mod resolve;
mod scope;
mod token;

pub use ast::{ArithOp, Ast, LitAst, RelOp};
pub use error::{AstError, AstResult};
pub use lower::lower_enums;
pub use parse::parse;
pub use resolve::resolve;
pub use scope::{MacroKind, Scope, ScopeValue};

use flowcheck_base::Interner;
use flowcheck_symbolic::{EnumDomain, GuardExpr};

/// Runs the full guard pipeline: parse, resolve/type, lower enums.
pub fn compile_guard(src: &str, scope: &Scope, enums: &[EnumDomain], interner: &mut Interner) -> Result<GuardExpr, AstError> {
    let ast = parse(src)?;
    let span = ast.span();
    let resolved = resolve(&ast, scope, interner)?;
    lower_enums(resolved, enums, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcheck_symbolic::GuardType;

    #[test]
    fn compiles_a_guard_end_to_end_through_enum_lowering() {
        let mut interner = Interner::new();
        let domain = EnumDomain::new(
            &mut interner,
            "p1",
            GuardType::String,
            vec![flowcheck_symbolic::MemberKey::Str("y".to_string()), flowcheck_symbolic::MemberKey::Str("n".to_string())],
        )
        .unwrap();
        let scope = Scope::root(vec![("p1".to_string(), GuardType::String)]);
        let expr = compile_guard("p1 == 'y'", &scope, &[domain], &mut interner).unwrap();
        assert!(matches!(expr, GuardExpr::Rel(flowcheck_symbolic::RelOp::Eq, _, _)));
    }

    #[test]
    fn compile_guard_propagates_parse_errors() {
        let mut interner = Interner::new();
        let scope = Scope::root(vec![]);
        let err = compile_guard("a and", &scope, &[], &mut interner).unwrap_err();
        assert!(matches!(err, AstError::Parse { .. }));
    }
}
