//! Provide the canonical language vocabulary for the CACT compiler and tooling.
//!
//! This crate is intentionally small and dependency-free. It holds the registries that every other part of the
//! toolchain agrees on: reserved words, operators, punctuation, scalar type names, and the runtime builtins that the
//! front end pre-declares.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no compiler-specific types (no AST, no spans).
//! - Callers work with stable IDs (e.g. [`lang::keywords::KeywordId`]) and look up spellings/metadata through the
//!   registry tables instead of comparing strings.

pub mod lang;
