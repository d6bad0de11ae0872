//! Per-compilation state shared by the lexer, parser and semantic analyzer.

use std::collections::HashMap;

use cact_core::lang::keywords::{self, KeywordId};

use crate::frontend::diagnostics::{CompileError, Diagnostics};
use crate::frontend::interner::{Interner, Name};

/// Interner, keyword map and diagnostics sink for one compilation unit.
#[derive(Debug)]
pub struct Context {
    pub interner: Interner,
    keywords: HashMap<Name, KeywordId>,
    pub diagnostics: Diagnostics,
}

impl Context {
    /// Create a context with every reserved word pre-interned.
    pub fn new() -> Self {
        let mut interner = Interner::new();
        let keywords = keywords::KEYWORDS
            .iter()
            .map(|info| (interner.intern(info.canonical), info.id))
            .collect();
        Self {
            interner,
            keywords,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Keyword denoted by an interned spelling, if it is reserved.
    pub fn keyword(&self, name: Name) -> Option<KeywordId> {
        self.keywords.get(&name).copied()
    }

    pub fn intern(&mut self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn resolve(&self, name: Name) -> &str {
        self.interner.resolve(name)
    }

    /// Forward to the diagnostics sink. Returns `true` if the error was recorded.
    pub fn report(&mut self, error: CompileError) -> bool {
        self.diagnostics.report(error)
    }

    pub fn had_error(&self) -> bool {
        self.diagnostics.had_error()
    }

    /// Split the context into the parts that outlive parsing.
    pub fn into_parts(self) -> (Interner, Diagnostics) {
        (self.interner, self.diagnostics)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
