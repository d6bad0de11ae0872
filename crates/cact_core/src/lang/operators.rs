//! Operator vocabulary.
//!
//! This module defines the canonical CACT operator set along with the metadata the parser needs for
//! precedence climbing: binding power and fixity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and exact; `&` and `|` on their own are not operators.
//! - `-` is both infix (subtraction) and prefix (negation). Its entry is [`Fixity::Infix`]; [`is_prefix`]
//!   covers the unary forms.
//! - `=` is listed with precedence `0`: it never participates in precedence climbing. Assignment is parsed as
//!   a statement form.
//!
//! ## Examples
//! ```rust
//! use cact_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("*"), Some(OperatorId::Star));
//! assert!(operators::precedence(OperatorId::Star) > operators::precedence(OperatorId::Plus));
//! ```

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AndAnd,
    OrOr,
    Not,

    // Assignment
    Assign,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is a relative ordering where higher binds tighter. All infix operators are left-associative.
/// - A precedence of `0` means the operator is not a precedence-climbing binary operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub fixity: Fixity,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", 9, Fixity::Infix),
    op(OperatorId::Minus, "-", 9, Fixity::Infix),
    op(OperatorId::Star, "*", 10, Fixity::Infix),
    op(OperatorId::Slash, "/", 10, Fixity::Infix),
    op(OperatorId::Percent, "%", 10, Fixity::Infix),
    // Comparison
    op(OperatorId::EqEq, "==", 7, Fixity::Infix),
    op(OperatorId::NotEq, "!=", 7, Fixity::Infix),
    op(OperatorId::Lt, "<", 8, Fixity::Infix),
    op(OperatorId::LtEq, "<=", 8, Fixity::Infix),
    op(OperatorId::Gt, ">", 8, Fixity::Infix),
    op(OperatorId::GtEq, ">=", 8, Fixity::Infix),
    // Logical
    op(OperatorId::AndAnd, "&&", 5, Fixity::Infix),
    op(OperatorId::OrOr, "||", 4, Fixity::Infix),
    op(OperatorId::Not, "!", 0, Fixity::Prefix),
    // Assignment
    op(OperatorId::Assign, "=", 0, Fixity::Infix),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Binding power for precedence climbing (`0` for non-binary operators).
pub fn precedence(id: OperatorId) -> u8 {
    info_for(id).precedence
}

/// Whether `id` can appear in prefix position (`+`, `-`, `!`).
pub fn is_prefix(id: OperatorId) -> bool {
    matches!(id, OperatorId::Plus | OperatorId::Minus | OperatorId::Not)
}

/// Resolve an operator spelling to its identifier.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spelling: &'static str, precedence: u8, fixity: Fixity) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        fixity,
    }
}
