//! Define the reserved keyword vocabulary for the CACT language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! categories, and usage hints.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**. `While` is an identifier, `while` is a keyword.
//! - `true` and `false` are reserved words here; the parser turns them into boolean literals.
//! - Type keywords map onto [`crate::lang::types::ScalarTypeId`] via [`scalar_type`].
//!
//! ## Examples
//! ```rust
//! use cact_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("if"), Some(KeywordId::If));
//! assert_eq!(keywords::as_str(KeywordId::If), "if");
//! ```

use super::types::ScalarTypeId;

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Type names
    Int,
    Bool,
    Float,
    Double,
    Void,

    // Bindings
    Const,

    // Control flow / statements
    If,
    Else,
    While,
    Break,
    Continue,
    Return,

    // Literals
    True,
    False,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Type,
    Binding,
    ControlFlow,
    Literal,
}

/// Usage context hints (not enforced here; parser/lexer own context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordUsage {
    Declaration,
    Statement,
    Expression,
    Modifier,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub usage: &'static [KeywordUsage],
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Type names
    info(KeywordId::Int, "int", KeywordCategory::Type, &[KeywordUsage::Declaration]),
    info(KeywordId::Bool, "bool", KeywordCategory::Type, &[KeywordUsage::Declaration]),
    info(KeywordId::Float, "float", KeywordCategory::Type, &[KeywordUsage::Declaration]),
    info(KeywordId::Double, "double", KeywordCategory::Type, &[KeywordUsage::Declaration]),
    info(KeywordId::Void, "void", KeywordCategory::Type, &[KeywordUsage::Declaration]),
    // Bindings
    info(KeywordId::Const, "const", KeywordCategory::Binding, &[KeywordUsage::Modifier]),
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(
        KeywordId::Continue,
        "continue",
        KeywordCategory::ControlFlow,
        &[KeywordUsage::Statement],
    ),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal, &[KeywordUsage::Expression]),
    info(KeywordId::False, "false", KeywordCategory::Literal, &[KeywordUsage::Expression]),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling for `id`.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Usage hints.
pub fn usage(id: KeywordId) -> &'static [KeywordUsage] {
    info_for(id).usage
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Map a type keyword onto its scalar type.
///
/// ## Returns
/// - `Some(ScalarTypeId)` for `int`, `bool`, `float`, `double` and `void`.
/// - `None` for every other keyword.
pub fn scalar_type(id: KeywordId) -> Option<ScalarTypeId> {
    match id {
        KeywordId::Int => Some(ScalarTypeId::Int),
        KeywordId::Bool => Some(ScalarTypeId::Bool),
        KeywordId::Float => Some(ScalarTypeId::Float),
        KeywordId::Double => Some(ScalarTypeId::Double),
        KeywordId::Void => Some(ScalarTypeId::Void),
        _ => None,
    }
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    usage: &'static [KeywordUsage],
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        usage,
    }
}
