//! Parser for the CACT programming language
//!
//! A recursive-descent parser with precedence climbing for binary expressions. It pulls tokens
//! from the [`Lexer`] one at a time and calls into [`Sema`] as soon as each construct is complete,
//! so every node it returns already carries its resolved type.
//!
//! ## Examples
//!
//! ```rust
//! use cactc::frontend::parser;
//!
//! let unit = parser::parse_source("int main() { return 0; }", 0);
//! assert!(!unit.had_error());
//! assert_eq!(unit.items.len(), 1);
//! ```

use cact_core::lang::keywords::{self, KeywordId};
use cact_core::lang::operators::{self, OperatorId};
use cact_core::lang::punctuation::{self, PunctuationId};

use crate::frontend::ast::*;
use crate::frontend::context::Context;
use crate::frontend::diagnostics::{CompileError, Diagnostics, errors};
use crate::frontend::interner::{Interner, Name};
use crate::frontend::lexer::{Lexer, Token, TokenKind};
use crate::frontend::sema::Sema;
use crate::frontend::symbols::{ScopeKind, SymbolId, SymbolKind, SymbolTable};
use crate::frontend::types::{TypeRef, array_from_dims, func_of};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
