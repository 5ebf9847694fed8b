//! # Expression Lexer
//!
//! Tokenizes expression source into tokens.
//!
//! ## Example
//!
//! ```rust
//! use extramesh_expr::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("x**2").tokenize();
//! assert_eq!(tokens[1].kind, TokenKind::StarStar);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::Span;

// =============================================================================
// LEXER
// =============================================================================

/// Expression lexer.
///
/// Converts source text into a stream of tokens ending with `Eof`.
/// Characters outside the language become `Error` tokens; the parser
/// reports them.
pub struct Lexer<'a> {
    /// Source text being lexed.
    source: &'a str,
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens including the EOF token.
    pub fn tokenize(mut self) -> Vec<Token> {
        loop {
            self.skip_whitespace_and_comments();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let end = self.cursor.position();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(end, end), String::new()));

        self.tokens
    }

    /// Skip whitespace and `#` comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor.advance_while(is_blank);

            if self.cursor.peek() == Some('#') {
                self.cursor.advance_while(|c| c != '\n');
                continue;
            }

            break;
        }
    }

    /// Scan a single token.
    fn scan_token(&mut self) {
        let start = self.cursor.position();
        let c = match self.cursor.advance() {
            Some(c) => c,
            None => return,
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '%' => TokenKind::Percent,

            // One- or two-character tokens
            '*' => {
                if self.cursor.eat('*') {
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.cursor.eat('/') {
                    TokenKind::SlashSlash
                } else {
                    TokenKind::Slash
                }
            }
            '<' => {
                if self.cursor.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.cursor.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '=' => {
                if self.cursor.eat('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Error
                }
            }
            '!' => {
                if self.cursor.eat('=') {
                    TokenKind::BangEq
                } else {
                    TokenKind::Error
                }
            }

            '\'' | '"' => return self.scan_string(start, c),

            '0'..='9' => return self.scan_number(start),
            '.' if self.cursor.peek().is_some_and(|d| d.is_ascii_digit()) => {
                return self.scan_number(start)
            }

            c if c.is_alphabetic() || c == '_' => return self.scan_identifier(start),

            _ => TokenKind::Error,
        };

        self.push(kind, start);
    }

    /// Scan a quoted string (always rejected by the parser).
    fn scan_string(&mut self, start: usize, quote: char) {
        while let Some(c) = self.cursor.advance() {
            if c == quote {
                break;
            }
            if c == '\\' {
                self.cursor.advance();
            }
        }
        self.push(TokenKind::String, start);
    }

    /// Scan a number literal. The first character is already consumed.
    fn scan_number(&mut self, start: usize) {
        self.cursor.advance_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.') {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        // Exponent only when digits follow, so `1else` still lexes as `1 else`
        if matches!(self.cursor.peek(), Some('e' | 'E')) && self.exponent_follows() {
            self.cursor.advance();
            if matches!(self.cursor.peek(), Some('+' | '-')) {
                self.cursor.advance();
            }
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        self.push(TokenKind::Number, start);
    }

    /// Check whether the `e` at the cursor starts a valid exponent.
    fn exponent_follows(&self) -> bool {
        let rest = &self.source[self.cursor.position() + 1..];
        let rest = rest.strip_prefix(['+', '-']).unwrap_or(rest);
        rest.starts_with(|c: char| c.is_ascii_digit())
    }

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self, start: usize) {
        self.cursor.advance_while(|c| c.is_alphanumeric() || c == '_');

        let text = &self.source[start..self.cursor.position()];
        let kind = match text {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            _ => TokenKind::Identifier,
        };

        self.push(kind, start);
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let end = self.cursor.position();
        let text = &self.source[start..end];
        self.tokens
            .push(Token::new(kind, Span::new(start, end), text.to_string()));
    }
}

/// Separators between tokens. Other Unicode spaces are not blanks and lex
/// as error tokens.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_default_equation() {
        let tokens = Lexer::new("1 - ( x**2 + y**2 )").tokenize();
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokens[0].text, "1");
        assert_eq!(tokens[4].kind, TokenKind::StarStar);
        assert_eq!(tokens[10].kind, TokenKind::Eof);
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = Lexer::new("1 1.5 .5 1e-3 2. 3E+2").tokenize();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "1.5", ".5", "1e-3", "2.", "3E+2", ""]);
        assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_number_followed_by_keyword() {
        assert_eq!(
            kinds("1else"),
            vec![TokenKind::Number, TokenKind::Else, TokenKind::Eof]
        );
    }

    #[test]
    fn test_tokenize_keywords() {
        assert_eq!(
            kinds("a if not b else c or d and e"),
            vec![
                TokenKind::Identifier,
                TokenKind::If,
                TokenKind::Not,
                TokenKind::Identifier,
                TokenKind::Else,
                TokenKind::Identifier,
                TokenKind::Or,
                TokenKind::Identifier,
                TokenKind::And,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            kinds("// / == != <= >= < > %"),
            vec![
                TokenKind::SlashSlash,
                TokenKind::Slash,
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_string_and_dunder() {
        let tokens = Lexer::new("__import__('os')").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "__import__");
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].text, "'os'");
    }

    #[test]
    fn test_tokenize_foreign_characters() {
        assert_eq!(kinds("x = 1")[1], TokenKind::Error);
        assert_eq!(kinds("a.b")[1], TokenKind::Error);
        assert_eq!(kinds("lambda: 0")[1], TokenKind::Error);
    }

    #[test]
    fn test_only_ascii_blanks_separate() {
        assert_eq!(
            kinds("u\t+\x0c1\r\n"),
            vec![TokenKind::Identifier, TokenKind::Plus, TokenKind::Number, TokenKind::Eof]
        );
        assert_eq!(kinds("u\u{a0}+1")[1], TokenKind::Error);
        assert_eq!(kinds("u\u{3000}+1")[1], TokenKind::Error);
    }

    #[test]
    fn test_comment_skipped() {
        assert_eq!(
            kinds("u # angle"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }
}
