//! CACT Compiler Frontend
//!
//! This module contains all frontend components:
//! - `lexer`: pull-based tokenization of source text
//! - `parser`: recursive-descent parsing with interleaved semantic analysis
//! - `sema`: type checking and name resolution called by the parser
//! - `ast`: abstract syntax tree definitions and the tree dump
//! - `types`: the type system
//! - `symbols`: symbol table and scope chain
//! - `diagnostics`: error values, the reporting sink, and rendering
//! - `source`: the source map (file names, global offsets, line/column lookup)
//! - `interner`, `context`: per-compilation string interning and shared state
//! - `json`: JSON rendering of the typed AST

pub mod ast;
pub mod context;
pub mod diagnostics;
pub mod interner;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod sema;
pub mod source;
pub mod symbols;
pub mod types;

pub use parser::{CompilationUnit, parse_source};

use source::{FileId, SourceMap};

/// Compile a standalone buffer whose offsets start at 0.
pub fn compile(source: &str) -> CompilationUnit {
    parse_source(source, 0)
}

/// Compile one file of a [`SourceMap`]; spans in the result are global offsets into the map.
///
/// Returns `None` if `file` is not part of `sources`.
#[tracing::instrument(skip_all, fields(file = file.0))]
pub fn compile_file(sources: &SourceMap, file: FileId) -> Option<CompilationUnit> {
    let source = sources.file(file)?;
    tracing::debug!(name = source.name(), len = source.text().len(), "compiling");
    Some(parse_source(source.text(), source.base()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_global_in_a_multi_file_map() {
        let mut sources = SourceMap::new();
        sources.add("a.cact", "int a;\n");
        let second = sources.add("b.cact", "int main() { return x; }\n");
        let unit = compile_file(&sources, second).unwrap();
        let err = &unit.errors()[0];
        let loc = sources.location(err.span.start).unwrap();
        assert_eq!((loc.name, loc.line, loc.col), ("b.cact", 1, 21));
    }

    #[test]
    fn unknown_file_id() {
        let sources = SourceMap::new();
        assert!(compile_file(&sources, FileId(3)).is_none());
    }
}
