#![forbid(unsafe_code)]
//! CACT Language Front End
//!
//! CACT is a small statically typed, C-like teaching language: `int`/`float`/`double`/`bool`
//! scalars, fixed-size arrays, functions, and structured control flow. This crate turns source
//! text into a fully type-annotated AST plus diagnostics, ready for a later code generator.
//!
//! Lexing, parsing and semantic analysis run interleaved in one pass: the parser pulls tokens on
//! demand and type-checks each construct as soon as it is complete.
//!
//! ```rust
//! let unit = cactc::compile("int main() { int a = 1; a = a + 2; return a; }");
//! assert!(!unit.had_error());
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Malformed input
//!   always becomes a reported diagnostic, never a panic. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a compiler bug (logic error), use
//!   `.expect("INVARIANT: reason")` with a clear explanation.

pub mod cli;
pub mod frontend;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::symbols;
pub use frontend::types;

pub use frontend::{CompilationUnit, compile, compile_file};
