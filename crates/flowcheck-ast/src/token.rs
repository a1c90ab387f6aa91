//! Hand-rolled tokenizer for the guard expression grammar (§4.1).

use crate::error::AstError;
use flowcheck_base::Span;

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    True,
    False,
    And,
    Or,
    Not,
    Gt,
    Ge,
    Lt,
    Le,
    EqEq,
    NotEq,
    Plus,
    Minus,
    Star,
    Slash,
    Dot,
    Comma,
    LParen,
    RParen,
}

#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Splits guard expression source into a token stream, or fails with the
/// byte offset of the first unrecognized character.
pub fn tokenize(src: &str) -> Result<Vec<Token>, AstError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        let kind = match c {
            b'(' => {
                i += 1;
                TokenKind::LParen
            }
            b')' => {
                i += 1;
                TokenKind::RParen
            }
            b',' => {
                i += 1;
                TokenKind::Comma
            }
            b'.' => {
                i += 1;
                TokenKind::Dot
            }
            b'+' => {
                i += 1;
                TokenKind::Plus
            }
            b'-' => {
                i += 1;
                TokenKind::Minus
            }
            b'*' => {
                i += 1;
                TokenKind::Star
            }
            b'/' => {
                i += 1;
                TokenKind::Slash
            }
            b'!' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                    TokenKind::NotEq
                } else {
                    i += 1;
                    TokenKind::Not
                }
            }
            b'=' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                    TokenKind::EqEq
                } else {
                    return Err(AstError::Parse { position: start, message: "bare '=' is not an operator".to_string() });
                }
            }
            b'\'' => {
                i += 1;
                let mut s = String::new();
                loop {
                    match bytes.get(i) {
                        None => return Err(AstError::Parse { position: start, message: "unterminated string literal".to_string() }),
                        Some(b'\'') => {
                            i += 1;
                            break;
                        }
                        Some(_) => {
                            let ch_start = i;
                            let ch = src[ch_start..].chars().next().unwrap();
                            s.push(ch);
                            i += ch.len_utf8();
                        }
                    }
                }
                TokenKind::Str(s)
            }
            b'0'..=b'9' => {
                let mut end = i;
                let mut is_float = false;
                while end < bytes.len() && (bytes[end].is_ascii_digit() || (bytes[end] == b'.' && !is_float && bytes.get(end + 1).map_or(false, u8::is_ascii_digit))) {
                    if bytes[end] == b'.' {
                        is_float = true;
                    }
                    end += 1;
                }
                let text = &src[i..end];
                i = end;
                if is_float {
                    TokenKind::Float(text.parse().map_err(|_| AstError::Parse { position: start, message: format!("invalid number '{}'", text) })?)
                } else {
                    TokenKind::Int(text.parse().map_err(|_| AstError::Parse { position: start, message: format!("invalid number '{}'", text) })?)
                }
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let mut end = i;
                while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                    end += 1;
                }
                let word = &src[i..end];
                i = end;
                match word {
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    "and" => TokenKind::And,
                    "or" => TokenKind::Or,
                    "gt" => TokenKind::Gt,
                    "ge" => TokenKind::Ge,
                    "lt" => TokenKind::Lt,
                    "le" => TokenKind::Le,
                    _ => TokenKind::Ident(word.to_string()),
                }
            }
            other => {
                return Err(AstError::Parse {
                    position: start,
                    message: format!("unexpected character '{}'", other as char),
                })
            }
        };

        tokens.push(Token { kind, span: Span::new(start, i) });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_predicate_with_dotted_identifier() {
        let tokens = tokenize("x.value gt 5").unwrap();
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("x".to_string()),
                TokenKind::Dot,
                TokenKind::Ident("value".to_string()),
                TokenKind::Gt,
                TokenKind::Int(5),
            ]
        );
    }

    #[test]
    fn tokenizes_string_literal_and_call() {
        let tokens = tokenize("foo('y') == 'z'").unwrap();
        assert!(matches!(tokens[2].kind, TokenKind::Str(ref s) if s == "y"));
    }

    #[test]
    fn rejects_unexpected_character() {
        let err = tokenize("x @ y").unwrap_err();
        assert!(matches!(err, AstError::Parse { .. }));
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(tokenize("'abc").is_err());
    }
}
