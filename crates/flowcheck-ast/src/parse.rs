//! Recursive-descent parser over the token stream (§4.1).
//!
//! `and`/`or` are left-associative, `!` is right-associative; arithmetic
//! binds tighter than relops, which bind tighter than `and`, which binds
//! tighter than `or` — the usual precedence ladder, walked top-down.

use crate::ast::{ArithOp, Ast, LitAst, RelOp};
use crate::error::AstError;
use crate::token::{tokenize, Token, TokenKind};
use flowcheck_base::Span;

/// Parses a complete guard expression, rejecting trailing input.
pub fn parse(src: &str) -> Result<Ast, AstError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser { tokens, pos: 0 };
    let ast = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        let tok = &parser.tokens[parser.pos];
        return Err(AstError::Parse {
            position: tok.span.start,
            message: "unexpected trailing input".to_string(),
        });
    }
    Ok(ast)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span)
            .unwrap_or_else(|| {
                let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
                Span::new(end, end)
            })
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), AstError> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(AstError::Parse { position: self.peek_span().start, message: format!("expected {}", what) })
        }
    }

    fn parse_or(&mut self) -> Result<Ast, AstError> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            let span = Span::new(left.span().start, right.span().end);
            left = Ast::Or(Box::new(left), Box::new(right), span);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Ast, AstError> {
        let mut left = self.parse_unary()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_unary()?;
            let span = Span::new(left.span().start, right.span().end);
            left = Ast::And(Box::new(left), Box::new(right), span);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Ast, AstError> {
        if self.peek() == Some(&TokenKind::Not) {
            let start = self.peek_span().start;
            self.advance();
            let inner = self.parse_unary()?;
            let span = Span::new(start, inner.span().end);
            Ok(Ast::Not(Box::new(inner), span))
        } else {
            self.parse_atom()
        }
    }

    fn parse_atom(&mut self) -> Result<Ast, AstError> {
        match self.peek() {
            Some(TokenKind::True) => {
                let span = self.peek_span();
                self.advance();
                Ok(Ast::Lit(LitAst::Bool(true), span))
            }
            Some(TokenKind::False) => {
                let span = self.peek_span();
                self.advance();
                Ok(Ast::Lit(LitAst::Bool(false), span))
            }
            Some(TokenKind::LParen) => {
                let start = self.peek_span().start;
                self.advance();
                let inner = self.parse_or()?;
                let end = self.peek_span().end;
                self.expect(TokenKind::RParen, "')'")?;
                let _ = (start, end);
                Ok(inner)
            }
            _ => self.parse_relational(),
        }
    }

    fn parse_relational(&mut self) -> Result<Ast, AstError> {
        let left = self.parse_add()?;
        let op = match self.peek() {
            Some(TokenKind::Gt) => Some(RelOp::Gt),
            Some(TokenKind::Ge) => Some(RelOp::Ge),
            Some(TokenKind::Lt) => Some(RelOp::Lt),
            Some(TokenKind::Le) => Some(RelOp::Le),
            Some(TokenKind::EqEq) => Some(RelOp::Eq),
            Some(TokenKind::NotEq) => Some(RelOp::Ne),
            _ => None,
        };
        let Some(op) = op else { return Ok(left) };
        self.advance();
        let right = self.parse_add()?;
        let span = Span::new(left.span().start, right.span().end);
        Ok(Ast::Rel(op, Box::new(left), Box::new(right), span))
    }

    fn parse_add(&mut self) -> Result<Ast, AstError> {
        let mut left = self.parse_mul()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => ArithOp::Add,
                Some(TokenKind::Minus) => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_mul()?;
            let span = Span::new(left.span().start, right.span().end);
            left = Ast::Arith(op, Box::new(left), Box::new(right), span);
        }
        Ok(left)
    }

    fn parse_mul(&mut self) -> Result<Ast, AstError> {
        let mut left = self.parse_unary_term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => ArithOp::Mul,
                Some(TokenKind::Slash) => ArithOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary_term()?;
            let span = Span::new(left.span().start, right.span().end);
            left = Ast::Arith(op, Box::new(left), Box::new(right), span);
        }
        Ok(left)
    }

    fn parse_unary_term(&mut self) -> Result<Ast, AstError> {
        if self.peek() == Some(&TokenKind::Minus) {
            let start = self.peek_span().start;
            self.advance();
            let inner = self.parse_unary_term()?;
            let span = Span::new(start, inner.span().end);
            Ok(Ast::Neg(Box::new(inner), span))
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> Result<Ast, AstError> {
        let span = self.peek_span();
        match self.peek().cloned() {
            Some(TokenKind::Int(n)) => {
                self.advance();
                Ok(Ast::Lit(LitAst::Int(n), span))
            }
            Some(TokenKind::Float(f)) => {
                self.advance();
                Ok(Ast::Lit(LitAst::Int(f as i64), span))
            }
            Some(TokenKind::Str(s)) => {
                self.advance();
                Ok(Ast::Lit(LitAst::Str(s), span))
            }
            Some(TokenKind::Ident(_)) => self.parse_ident_or_call(),
            Some(TokenKind::LParen) => {
                self.advance();
                let inner = self.parse_or()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            _ => Err(AstError::Parse { position: span.start, message: "expected a value".to_string() }),
        }
    }

    fn parse_ident_or_call(&mut self) -> Result<Ast, AstError> {
        let start = self.peek_span().start;
        let mut segments = Vec::new();
        loop {
            match self.advance().map(|t| t.kind) {
                Some(TokenKind::Ident(name)) => segments.push(name),
                _ => return Err(AstError::Parse { position: start, message: "expected identifier".to_string() }),
            }
            if !self.eat(&TokenKind::Dot) {
                break;
            }
        }
        let end = self.tokens.get(self.pos.wrapping_sub(1)).map(|t| t.span.end).unwrap_or(start);
        let lookup = Ast::Lookup(segments, Span::new(start, end));

        if self.peek() == Some(&TokenKind::LParen) {
            self.advance();
            let args = self.parse_args()?;
            let close_end = self.peek_span().end;
            self.expect(TokenKind::RParen, "')'")?;
            Ok(Ast::Call(Box::new(lookup), args, Span::new(start, close_end)))
        } else {
            Ok(lookup)
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Ast>, AstError> {
        if self.peek() == Some(&TokenKind::RParen) {
            return Ok(Vec::new());
        }
        let mut args = vec![self.parse_or()?];
        while self.eat(&TokenKind::Comma) {
            args.push(self.parse_or()?);
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_predicate() {
        let ast = parse("p1 == 'y'").unwrap();
        assert!(matches!(ast, Ast::Rel(RelOp::Eq, _, _, _)));
    }

    #[test]
    fn parses_and_or_left_associative() {
        let ast = parse("a and b or c").unwrap();
        // (a and b) or c
        match ast {
            Ast::Or(l, r, _) => {
                assert!(matches!(*l, Ast::And(_, _, _)));
                assert!(matches!(*r, Ast::Lookup(_, _)));
            }
            _ => panic!("expected Or at top level"),
        }
    }

    #[test]
    fn parses_negation_of_parenthesized_predicate() {
        let ast = parse("!(u gt 5)").unwrap();
        match ast {
            Ast::Not(inner, _) => assert!(matches!(*inner, Ast::Rel(RelOp::Gt, _, _, _))),
            _ => panic!("expected Not"),
        }
    }

    #[test]
    fn parses_dotted_identifier_and_call() {
        let ast = parse("zofar.isMissing(x.value)").unwrap();
        match ast {
            Ast::Call(callee, args, _) => {
                assert!(matches!(*callee, Ast::Lookup(ref segs, _) if segs == &vec!["zofar".to_string(), "isMissing".to_string()]));
                assert_eq!(args.len(), 1);
            }
            _ => panic!("expected Call"),
        }
    }

    #[test]
    fn parses_arithmetic_with_precedence() {
        let ast = parse("1 + 2 * 3 == 7").unwrap();
        match ast {
            Ast::Rel(RelOp::Eq, l, _, _) => match *l {
                Ast::Arith(ArithOp::Add, _, r, _) => assert!(matches!(*r, Ast::Arith(ArithOp::Mul, _, _, _))),
                _ => panic!("expected top-level Add"),
            },
            _ => panic!("expected Rel"),
        }
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert!(parse("(a and b").is_err());
    }

    #[test]
    fn rejects_trailing_input() {
        assert!(parse("a and b )").is_err());
    }
}
