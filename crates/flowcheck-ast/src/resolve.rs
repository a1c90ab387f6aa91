//! Resolution, macro expansion, and typing pass (§4.2): turns a parsed
//! [`Ast`] into a typed [`GuardExpr`] against a [`Scope`].

use crate::ast::{ArithOp, Ast, LitAst, RelOp as AstRelOp};
use crate::error::AstError;
use crate::scope::{MacroKind, Scope, ScopeValue};
use flowcheck_base::{Interner, Span};
use flowcheck_symbolic::{GuardExpr, GuardType, Lit, RelOp};

/// Resolves, type-checks, and macro-expands a parsed guard expression.
pub fn resolve(ast: &Ast, scope: &Scope, interner: &mut Interner) -> Result<GuardExpr, AstError> {
    match ast {
        Ast::Lit(LitAst::Bool(b), _) => Ok(GuardExpr::bool(*b)),
        Ast::Lit(LitAst::Int(n), _) => Ok(GuardExpr::int(*n)),
        Ast::Lit(LitAst::Str(s), _) => Ok(GuardExpr::str(s.clone())),

        Ast::Not(inner, span) => {
            let e = resolve(inner, scope, interner)?;
            require_type(&e, GuardType::Boolean, inner.span(), *span)?;
            Ok(GuardExpr::not(e))
        }
        Ast::And(l, r, span) => {
            let le = resolve(l, scope, interner)?;
            require_type(&le, GuardType::Boolean, l.span(), *span)?;
            let re = resolve(r, scope, interner)?;
            require_type(&re, GuardType::Boolean, r.span(), *span)?;
            Ok(GuardExpr::and(le, re))
        }
        Ast::Or(l, r, span) => {
            let le = resolve(l, scope, interner)?;
            require_type(&le, GuardType::Boolean, l.span(), *span)?;
            let re = resolve(r, scope, interner)?;
            require_type(&re, GuardType::Boolean, r.span(), *span)?;
            Ok(GuardExpr::or(le, re))
        }
        Ast::Rel(op, l, r, span) => {
            let le = resolve(l, scope, interner)?;
            let re = resolve(r, scope, interner)?;
            let (lt, rt) = (type_of(&le), type_of(&re));
            if lt != rt {
                return Err(AstError::Type {
                    expr: render_span(ast, *span),
                    got: format!("{:?}", rt),
                    expected: format!("{:?}", lt),
                    span: *span,
                });
            }
            Ok(build_rel(*op, le, re))
        }
        Ast::Arith(op, l, r, span) => {
            let le = resolve(l, scope, interner)?;
            let re = resolve(r, scope, interner)?;
            fold_arith(*op, &le, &re, *span)
        }
        Ast::Neg(inner, span) => {
            let e = resolve(inner, scope, interner)?;
            match e {
                GuardExpr::Lit(Lit::Int(n)) => Ok(GuardExpr::int(-n)),
                other => Err(AstError::Type {
                    expr: render_span(ast, *span),
                    got: format!("{:?}", type_of(&other)),
                    expected: "number literal".to_string(),
                    span: *span,
                }),
            }
        }
        Ast::Lookup(segments, span) => resolve_lookup(segments, scope, interner, *span),
        Ast::Call(callee, args, span) => resolve_call(callee, args, scope, interner, *span),
    }
}

fn render_span(_ast: &Ast, span: Span) -> String {
    format!("<expr at {}..{}>", span.start, span.end)
}

fn require_type(e: &GuardExpr, expected: GuardType, operand_span: Span, span: Span) -> Result<(), AstError> {
    let got = type_of(e);
    if got == expected {
        Ok(())
    } else {
        Err(AstError::Type {
            expr: format!("<operand at {}..{}>", operand_span.start, operand_span.end),
            got: format!("{:?}", got),
            expected: format!("{:?}", expected),
            span,
        })
    }
}

fn type_of(e: &GuardExpr) -> GuardType {
    match e {
        GuardExpr::Lit(Lit::Bool(_)) => GuardType::Boolean,
        GuardExpr::Lit(Lit::Int(_)) => GuardType::Number,
        GuardExpr::Lit(Lit::Str(_)) => GuardType::String,
        GuardExpr::Sym(_, ty) => *ty,
        GuardExpr::Not(_) | GuardExpr::And(_, _) | GuardExpr::Or(_, _) | GuardExpr::Rel(_, _, _) => GuardType::Boolean,
    }
}

fn build_rel(op: AstRelOp, l: GuardExpr, r: GuardExpr) -> GuardExpr {
    match op {
        AstRelOp::Eq => GuardExpr::eq(l, r),
        AstRelOp::Ne => GuardExpr::ne(l, r),
        AstRelOp::Lt => GuardExpr::lt(l, r),
        AstRelOp::Le => GuardExpr::le(l, r),
        AstRelOp::Gt => GuardExpr::gt(l, r),
        AstRelOp::Ge => GuardExpr::ge(l, r),
    }
}

fn fold_arith(op: ArithOp, l: &GuardExpr, r: &GuardExpr, span: Span) -> Result<GuardExpr, AstError> {
    let (GuardExpr::Lit(Lit::Int(a)), GuardExpr::Lit(Lit::Int(b))) = (l, r) else {
        return Err(AstError::Type {
            expr: format!("<arithmetic at {}..{}>", span.start, span.end),
            got: "non-constant operand".to_string(),
            expected: "number literal".to_string(),
            span,
        });
    };
    let value = match op {
        ArithOp::Add => a.checked_add(*b),
        ArithOp::Sub => a.checked_sub(*b),
        ArithOp::Mul => a.checked_mul(*b),
        ArithOp::Div if *b != 0 => a.checked_div(*b),
        ArithOp::Div => None,
    };
    value.map(GuardExpr::int).ok_or_else(|| AstError::Type {
        expr: format!("<arithmetic at {}..{}>", span.start, span.end),
        got: "overflow or division by zero".to_string(),
        expected: "a representable integer".to_string(),
        span,
    })
}

fn resolve_lookup(segments: &[String], scope: &Scope, interner: &mut Interner, span: Span) -> Result<GuardExpr, AstError> {
    match scope.resolve(segments) {
        Some(ScopeValue::Symbol(name, ty)) => Ok(GuardExpr::sym(interner.intern(name), *ty)),
        Some(ScopeValue::Macro(kind)) => {
            if kind.arity() == 0 {
                Ok(expand_nullary_macro(*kind, interner))
            } else {
                Err(AstError::MacroTypeError {
                    macro_name: kind.name().to_string(),
                    message: format!("expects {} argument(s), called with none", kind.arity()),
                    span,
                })
            }
        }
        Some(ScopeValue::Nested(_)) | None => {
            Err(AstError::UnknownIdentifier { name: segments.join("."), span })
        }
    }
}

fn resolve_call(callee: &Ast, args: &[Ast], scope: &Scope, interner: &mut Interner, span: Span) -> Result<GuardExpr, AstError> {
    let Ast::Lookup(segments, callee_span) = callee else {
        return Err(AstError::UnknownIdentifier { name: "<non-identifier call target>".to_string(), span });
    };
    let Some(ScopeValue::Macro(kind)) = scope.resolve(segments) else {
        return Err(AstError::UnknownIdentifier { name: segments.join("."), span: *callee_span });
    };
    let kind = *kind;

    if args.len() != kind.arity() {
        return Err(AstError::MacroTypeError {
            macro_name: kind.name().to_string(),
            message: format!("expects {} argument(s), called with {}", kind.arity(), args.len()),
            span,
        });
    }

    match kind {
        MacroKind::BaseUrl | MacroKind::IsMobile => Ok(expand_nullary_macro(kind, interner)),
        MacroKind::AsNumber | MacroKind::IsMissing => {
            let Ast::Lookup(var_segments, var_span) = &args[0] else {
                return Err(AstError::MacroTypeError {
                    macro_name: kind.name().to_string(),
                    message: "argument must be a variable reference".to_string(),
                    span,
                });
            };
            let Some(ScopeValue::Symbol(var_name, var_ty)) = scope.resolve(var_segments) else {
                return Err(AstError::MacroTypeError {
                    macro_name: kind.name().to_string(),
                    message: "argument must resolve to a declared variable".to_string(),
                    span: *var_span,
                });
            };
            Ok(expand_variable_macro(kind, var_name, *var_ty, interner))
        }
    }
}

fn expand_nullary_macro(kind: MacroKind, interner: &mut Interner) -> GuardExpr {
    match kind {
        MacroKind::BaseUrl => GuardExpr::sym(interner.intern("ZOFAR_BASE_URL"), GuardType::String),
        MacroKind::IsMobile => GuardExpr::sym(interner.intern("ZOFAR_IS_MOBILE"), GuardType::Boolean),
        MacroKind::AsNumber | MacroKind::IsMissing => unreachable!("nullary expansion requested for a unary macro"),
    }
}

fn expand_variable_macro(kind: MacroKind, var_name: &str, var_ty: GuardType, interner: &mut Interner) -> GuardExpr {
    match kind {
        MacroKind::AsNumber => {
            if var_ty == GuardType::Number {
                GuardExpr::sym(interner.intern(var_name), GuardType::Number)
            } else {
                GuardExpr::sym(interner.intern(&format!("{}_NUM", var_name)), GuardType::Number)
            }
        }
        MacroKind::IsMissing => GuardExpr::sym(interner.intern(&format!("{}_IS_MISSING", var_name)), GuardType::Boolean),
        MacroKind::BaseUrl | MacroKind::IsMobile => unreachable!("unary expansion requested for a nullary macro"),
    }
}
