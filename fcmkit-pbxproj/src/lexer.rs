//! Tokenizer for the NeXTSTEP property list syntax used by `project.pbxproj`.
//!
//! Whitespace and comments are not dropped: each token carries the trivia that
//! precedes it, so concatenating `leading + text` for every token reproduces the
//! input exactly.

use crate::error::{PbxprojError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    LBrace,
    RBrace,
    LParen,
    RParen,
    Equals,
    Semicolon,
    Comma,
    /// Bare word or double-quoted string, kept verbatim.
    String,
    /// `<hex bytes>`, kept verbatim.
    Data,
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Equals => "'='",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::String => "string",
            TokenKind::Data => "data",
            TokenKind::Eof => "end of input",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub leading: String,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> PbxprojError {
        PbxprojError::parse(self.line, self.column, message)
    }

    /// Consume whitespace and comments, returning them verbatim.
    fn trivia(&mut self) -> Result<String> {
        let start = self.pos;
        loop {
            let rest = self.rest();
            if rest.starts_with("/*") {
                let (line, column) = (self.line, self.column);
                let Some(end) = rest[2..].find("*/") else {
                    return Err(PbxprojError::parse(line, column, "unterminated comment"));
                };
                for _ in rest[..end + 4].chars() {
                    self.bump();
                }
            } else if rest.starts_with("//") {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else if self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            } else {
                break;
            }
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn quoted(&mut self) -> Result<String> {
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        self.bump(); // opening quote
        loop {
            match self.bump() {
                Some('\\') => {
                    if self.bump().is_none() {
                        break;
                    }
                }
                Some('"') => return Ok(self.src[start..self.pos].to_string()),
                Some(_) => {}
                None => break,
            }
        }
        Err(PbxprojError::parse(line, column, "unterminated string"))
    }

    fn data(&mut self) -> Result<String> {
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        while let Some(c) = self.bump() {
            if c == '>' {
                return Ok(self.src[start..self.pos].to_string());
            }
        }
        Err(PbxprojError::parse(line, column, "unterminated data literal"))
    }

    fn bare(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            let rest = self.rest();
            if is_delimiter(c) || rest.starts_with("/*") || rest.starts_with("//") {
                break;
            }
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn next_token(&mut self) -> Result<Token> {
        let leading = self.trivia()?;
        let (line, column) = (self.line, self.column);

        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                leading,
                text: String::new(),
                line,
                column,
            });
        };

        let punct = match c {
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '=' => Some(TokenKind::Equals),
            ';' => Some(TokenKind::Semicolon),
            ',' => Some(TokenKind::Comma),
            _ => None,
        };

        let (kind, text) = if let Some(kind) = punct {
            self.bump();
            (kind, c.to_string())
        } else if c == '"' {
            (TokenKind::String, self.quoted()?)
        } else if c == '<' {
            (TokenKind::Data, self.data()?)
        } else {
            let word = self.bare();
            if word.is_empty() {
                return Err(self.error(format!("unexpected character {c:?}")));
            }
            (TokenKind::String, word)
        };

        Ok(Token {
            kind,
            leading,
            text,
            line,
            column,
        })
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | '(' | ')' | '=' | ';' | ',' | '"' | '<' | '>')
}

/// Split `src` into tokens. The last token is always [`TokenKind::Eof`].
pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
