//! Token types for the CACT lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (including `true`/`false`)
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for delimiters and separators
//!
//! Identifiers carry their interned [`Name`]; literals carry their decoded value.

use cact_core::lang::keywords::{self, KeywordId, KeywordUsage};
use cact_core::lang::operators::{self, OperatorId};
use cact_core::lang::punctuation::{self, PunctuationId};

use crate::frontend::ast::Span;
use crate::frontend::interner::{Interner, Name};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(Name),
    Int(i32),
    Float(f32),
    Double(f64),

    // ========== Special ==========
    /// A malformed token. The lexer has already reported why.
    Error,
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Type keywords and `const` start a declaration.
    pub fn starts_declaration(&self) -> bool {
        match self {
            TokenKind::Keyword(k) => keywords::usage(*k)
                .iter()
                .any(|u| matches!(u, KeywordUsage::Declaration | KeywordUsage::Modifier)),
            _ => false,
        }
    }

    /// Human-readable description for "expected X, found Y" messages.
    pub fn describe(&self, interner: &Interner) -> String {
        match self {
            TokenKind::Keyword(k) => format!("keyword '{}'", keywords::as_str(*k)),
            TokenKind::Operator(o) => format!("'{}'", operators::as_str(*o)),
            TokenKind::Punctuation(p) => format!("'{}'", punctuation::as_str(*p)),
            TokenKind::Ident(name) => format!("identifier '{}'", interner.resolve(*name)),
            TokenKind::Int(v) => format!("integer literal {}", v),
            TokenKind::Float(v) => format!("float literal {:?}f", v),
            TokenKind::Double(v) => format!("double literal {:?}", v),
            TokenKind::Error => "invalid token".to_string(),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
