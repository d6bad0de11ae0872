//! Lexer for the CACT programming language
//!
//! The lexer is pull-based: the parser asks for one token at a time through
//! [`Lexer::next_token`]. Between calls the only state is a byte cursor, so repeated calls at the
//! end of input keep returning [`TokenKind::Eof`].
//!
//! Handles:
//! - Whitespace, `//` line comments and non-nesting `/* */` block comments
//! - Identifiers and keywords (interned, then checked against the keyword map)
//! - Integer (decimal, octal, hex), float (`f` suffix) and double literals
//! - One- and two-character operators and punctuation
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `numbers` - Numeric literal scanning
//!
//! Malformed input produces a [`TokenKind::Error`] token and a diagnostic reported to the
//! [`Context`] at once; scanning then continues after the bad text.

mod numbers;
pub mod tokens;

pub use tokens::{Token, TokenKind};

use cact_core::lang::operators::OperatorId;
use cact_core::lang::punctuation;

use crate::frontend::ast::Span;
use crate::frontend::context::Context;
use crate::frontend::diagnostics::{CompileError, errors};

/// Lexer over one source buffer.
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Global offset of `source[0]`, added to every span.
    base: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer whose spans start at global offset `base`.
    pub fn new(source: &'a str, base: usize) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            base,
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self, ctx: &mut Context) -> Token {
        self.skip_trivia(ctx);

        let start = self.pos;
        let Some(c) = self.peek() else {
            return self.token(TokenKind::Eof, start);
        };

        if c.is_ascii_alphabetic() || c == b'_' {
            return self.scan_word(ctx);
        }
        if c.is_ascii_digit() || (c == b'.' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit())) {
            return self.scan_number(ctx);
        }
        if let Some(id) = punctuation::from_char(char::from(c)) {
            self.pos += 1;
            return self.token(TokenKind::Punctuation(id), start);
        }
        self.scan_operator(ctx)
    }

    // ========================================================================
    // Core byte handling
    // ========================================================================

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.base + start, self.base + self.pos)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.span_from(start))
    }

    /// Report `error` and return an error token covering `start..pos`.
    fn error_token(&self, ctx: &mut Context, start: usize, build: fn(Span) -> CompileError) -> Token {
        let span = self.span_from(start);
        ctx.report(build(span));
        Token::new(TokenKind::Error, span)
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    fn skip_trivia(&mut self, ctx: &mut Context) {
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c => self.pos += 1,
                b'/' if self.peek_at(1) == Some(b'/') => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.pos += 1;
                    }
                }
                b'/' if self.peek_at(1) == Some(b'*') => {
                    let start = self.pos;
                    match self.source[start + 2..].find("*/") {
                        Some(end) => self.pos = start + 2 + end + 2,
                        None => {
                            self.pos = self.bytes.len();
                            ctx.report(errors::unterminated_comment(Span::new(
                                self.base + start,
                                self.base + start + 2,
                            )));
                        }
                    }
                }
                _ => break,
            }
        }
    }

    // ========================================================================
    // Words
    // ========================================================================

    fn scan_word(&mut self, ctx: &mut Context) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_') {
            self.pos += 1;
        }
        let name = ctx.intern(&self.source[start..self.pos]);
        let kind = match ctx.keyword(name) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(name),
        };
        self.token(kind, start)
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn scan_operator(&mut self, ctx: &mut Context) -> Token {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return self.token(TokenKind::Eof, start);
        };
        let next_is_eq = self.peek_at(1) == Some(b'=');
        let (op, len) = match c {
            b'+' => (OperatorId::Plus, 1),
            b'-' => (OperatorId::Minus, 1),
            b'*' => (OperatorId::Star, 1),
            b'/' => (OperatorId::Slash, 1),
            b'%' => (OperatorId::Percent, 1),
            b'=' if next_is_eq => (OperatorId::EqEq, 2),
            b'=' => (OperatorId::Assign, 1),
            b'!' if next_is_eq => (OperatorId::NotEq, 2),
            b'!' => (OperatorId::Not, 1),
            b'<' if next_is_eq => (OperatorId::LtEq, 2),
            b'<' => (OperatorId::Lt, 1),
            b'>' if next_is_eq => (OperatorId::GtEq, 2),
            b'>' => (OperatorId::Gt, 1),
            b'&' if self.peek_at(1) == Some(b'&') => (OperatorId::AndAnd, 2),
            b'|' if self.peek_at(1) == Some(b'|') => (OperatorId::OrOr, 2),
            b'&' | b'|' => {
                self.pos += 1;
                let span = self.span_from(start);
                ctx.report(errors::bitwise_unsupported(char::from(c), span));
                return Token::new(TokenKind::Error, span);
            }
            _ => {
                let ch = self.source[start..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                self.pos += ch.len_utf8();
                let span = self.span_from(start);
                ctx.report(errors::unexpected_char(ch, span));
                return Token::new(TokenKind::Error, span);
            }
        };
        self.pos += len;
        self.token(TokenKind::Operator(op), start)
    }
}

/// Tokenize a whole buffer, through and including the `Eof` token.
///
/// Diagnostics go to `ctx`; malformed text shows up as [`TokenKind::Error`] tokens in the result.
/// With no parser to resynchronize, every token boundary ends a recovery region, so each lexical
/// error is recorded.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str, ctx: &mut Context) -> Vec<Token> {
    let mut lexer = Lexer::new(source, 0);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token(ctx);
        ctx.diagnostics.resync();
        let done = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cact_core::lang::keywords::KeywordId;
    use cact_core::lang::punctuation::PunctuationId;

    fn lex(source: &str) -> (Vec<Token>, Context) {
        let mut ctx = Context::new();
        let tokens = tokenize(source, &mut ctx);
        (tokens, ctx)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords() {
        let tokens = kinds("int bool float double void const if else while break continue return true false");
        let expected = [
            KeywordId::Int,
            KeywordId::Bool,
            KeywordId::Float,
            KeywordId::Double,
            KeywordId::Void,
            KeywordId::Const,
            KeywordId::If,
            KeywordId::Else,
            KeywordId::While,
            KeywordId::Break,
            KeywordId::Continue,
            KeywordId::Return,
            KeywordId::True,
            KeywordId::False,
        ];
        for (tok, kw) in tokens.iter().zip(expected) {
            assert!(tok.is_keyword(kw), "expected {:?}, got {:?}", kw, tok);
        }
        assert_eq!(tokens.len(), expected.len() + 1);
    }

    #[test]
    fn test_identifiers_are_interned() {
        let (tokens, ctx) = lex("count _tmp1 count");
        let TokenKind::Ident(a) = tokens[0].kind else {
            panic!("expected identifier, got {:?}", tokens[0].kind)
        };
        assert!(matches!(tokens[1].kind, TokenKind::Ident(_)));
        assert_eq!(tokens[2].kind, TokenKind::Ident(a));
        assert_eq!(ctx.resolve(a), "count");
    }

    #[test]
    fn test_operators() {
        let tokens = kinds("+ - * / % == != < <= > >= && || ! =");
        let expected = [
            OperatorId::Plus,
            OperatorId::Minus,
            OperatorId::Star,
            OperatorId::Slash,
            OperatorId::Percent,
            OperatorId::EqEq,
            OperatorId::NotEq,
            OperatorId::Lt,
            OperatorId::LtEq,
            OperatorId::Gt,
            OperatorId::GtEq,
            OperatorId::AndAnd,
            OperatorId::OrOr,
            OperatorId::Not,
            OperatorId::Assign,
        ];
        for (tok, op) in tokens.iter().zip(expected) {
            assert!(tok.is_operator(op), "expected {:?}, got {:?}", op, tok);
        }
    }

    #[test]
    fn test_two_char_operators_without_spaces() {
        let tokens = kinds("a<=b!=!c");
        assert!(matches!(tokens[0], TokenKind::Ident(_)));
        assert!(tokens[1].is_operator(OperatorId::LtEq));
        assert!(matches!(tokens[2], TokenKind::Ident(_)));
        assert!(tokens[3].is_operator(OperatorId::NotEq));
        assert!(tokens[4].is_operator(OperatorId::Not));
    }

    #[test]
    fn test_punctuation() {
        let tokens = kinds("( ) [ ] { } , ;");
        let expected = [
            PunctuationId::LParen,
            PunctuationId::RParen,
            PunctuationId::LBracket,
            PunctuationId::RBracket,
            PunctuationId::LBrace,
            PunctuationId::RBrace,
            PunctuationId::Comma,
            PunctuationId::Semicolon,
        ];
        for (tok, p) in tokens.iter().zip(expected) {
            assert!(tok.is_punctuation(p), "expected {:?}, got {:?}", p, tok);
        }
    }

    #[test]
    fn test_comments_are_skipped() {
        let (tokens, ctx) = lex("int // c\n/* c2 */ main");
        assert_eq!(tokens.len(), 3);
        assert!(tokens[0].kind.is_keyword(KeywordId::Int));
        let TokenKind::Ident(name) = tokens[1].kind else {
            panic!("expected identifier, got {:?}", tokens[1].kind)
        };
        assert_eq!(ctx.resolve(name), "main");
        assert_eq!(tokens[2].kind, TokenKind::Eof);
        assert!(!ctx.had_error());
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        let tokens = kinds("/* a /* b */ x */");
        assert!(matches!(tokens[0], TokenKind::Ident(_)));
        assert!(tokens[1].is_operator(OperatorId::Star));
        assert!(tokens[2].is_operator(OperatorId::Slash));
    }

    #[test]
    fn test_unterminated_block_comment_reports_and_ends() {
        let (tokens, ctx) = lex("int /* never closed");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
        assert!(ctx.had_error());
        assert_eq!(ctx.diagnostics.errors()[0].message, "Unterminated block comment");
        assert_eq!(ctx.diagnostics.errors()[0].span, Span::new(4, 6));
    }

    #[test]
    fn test_every_lexical_error_is_recorded() {
        let (tokens, ctx) = lex("3f & 0x");
        assert_eq!(tokens.len(), 4);
        let messages: Vec<_> = ctx.diagnostics.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Integer literal cannot have a float suffix",
                "Bitwise operator '&' is not supported",
                "Invalid hexadecimal literal: expected a hex digit after '0x'",
            ]
        );
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut ctx = Context::new();
        let mut lexer = Lexer::new("x", 0);
        lexer.next_token(&mut ctx);
        for _ in 0..3 {
            assert_eq!(lexer.next_token(&mut ctx).kind, TokenKind::Eof);
        }
    }

    #[test]
    fn test_spans_are_offset_by_base() {
        let mut ctx = Context::new();
        let mut lexer = Lexer::new("  ab", 100);
        let tok = lexer.next_token(&mut ctx);
        assert_eq!(tok.span, Span::new(102, 104));
        assert_eq!(lexer.next_token(&mut ctx).span, Span::new(104, 104));
    }

    #[test]
    fn test_lone_bitwise_operators_are_rejected() {
        let (tokens, ctx) = lex("a & b");
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert!(matches!(tokens[2].kind, TokenKind::Ident(_)));
        assert!(ctx.diagnostics.errors()[0].message.contains("'&'"));

        let (tokens, _) = lex("a | b");
        assert_eq!(tokens[1].kind, TokenKind::Error);
    }

    #[test]
    fn test_unexpected_character() {
        let (tokens, ctx) = lex("int é = 1;");
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].span, Span::new(4, 6));
        assert!(tokens[2].kind.is_operator(OperatorId::Assign));
        assert_eq!(ctx.diagnostics.errors().len(), 1);
    }
}
