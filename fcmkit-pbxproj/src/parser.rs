//! Recursive-descent parser from tokens to the lossless node tree.

use crate::document::{Array, ArrayItem, Dict, Entry, Scalar, Value};
use crate::error::{PbxprojError, Result};
use crate::lexer::{Token, TokenKind, tokenize};

/// Deepest dict/array nesting accepted. Real projects stay under ten.
const MAX_DEPTH: usize = 256;

pub(crate) struct Parsed {
    pub root: Value,
    pub trailing: String,
}

pub(crate) fn parse(src: &str) -> Result<Parsed> {
    let mut parser = Parser {
        tokens: tokenize(src)?,
        pos: 0,
        depth: 0,
    };
    let root = parser.value()?;
    let eof = parser.next();
    if eof.kind != TokenKind::Eof {
        return Err(unexpected(&eof, "end of input"));
    }
    Ok(Parsed {
        root,
        trailing: eof.leading,
    })
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn next(&mut self) -> Token {
        // tokenize() always ends with Eof, so clamp instead of running off the end.
        let idx = self.pos.min(self.tokens.len() - 1);
        self.pos += 1;
        self.tokens[idx].clone()
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        let token = self.next();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(unexpected(&token, kind.describe()))
        }
    }

    fn value(&mut self) -> Result<Value> {
        let token = self.next();
        match token.kind {
            TokenKind::LBrace | TokenKind::LParen => {
                if self.depth == MAX_DEPTH {
                    return Err(PbxprojError::parse(
                        token.line,
                        token.column,
                        format!("nesting deeper than {MAX_DEPTH} levels"),
                    ));
                }
                self.depth += 1;
                let value = if token.kind == TokenKind::LBrace {
                    self.dict(token.leading)
                } else {
                    self.array(token.leading)
                };
                self.depth -= 1;
                value
            }
            TokenKind::String | TokenKind::Data => Ok(Value::String(Scalar {
                leading: token.leading,
                raw: token.text,
            })),
            _ => Err(unexpected(&token, "a value")),
        }
    }

    fn dict(&mut self, open: String) -> Result<Value> {
        let mut entries = Vec::new();
        loop {
            let token = self.next();
            match token.kind {
                TokenKind::RBrace => {
                    return Ok(Value::Dict(Dict {
                        open,
                        entries,
                        close: token.leading,
                    }));
                }
                TokenKind::String => {
                    let key = Scalar {
                        leading: token.leading,
                        raw: token.text,
                    };
                    let eq = self.expect(TokenKind::Equals)?.leading;
                    let value = self.value()?;
                    let semi = self.expect(TokenKind::Semicolon)?.leading;
                    entries.push(Entry {
                        key,
                        eq,
                        value,
                        semi,
                    });
                }
                _ => return Err(unexpected(&token, "a key or '}'")),
            }
        }
    }

    fn array(&mut self, open: String) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            if self.peek_kind() == TokenKind::RParen {
                let close = self.next().leading;
                return Ok(Value::Array(Array { open, items, close }));
            }

            let value = self.value()?;
            let token = self.next();
            match token.kind {
                TokenKind::Comma => items.push(ArrayItem {
                    value,
                    comma: Some(token.leading),
                }),
                TokenKind::RParen => {
                    items.push(ArrayItem { value, comma: None });
                    return Ok(Value::Array(Array {
                        open,
                        items,
                        close: token.leading,
                    }));
                }
                _ => return Err(unexpected(&token, "',' or ')'")),
            }
        }
    }
}

fn unexpected(token: &Token, expected: &str) -> PbxprojError {
    let found = match token.kind {
        TokenKind::String | TokenKind::Data => format!("{:?}", token.text),
        other => other.describe().to_string(),
    };
    PbxprojError::parse(
        token.line,
        token.column,
        format!("expected {expected}, found {found}"),
    )
}
