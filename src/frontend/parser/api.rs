/// Result of parsing one source buffer.
///
/// Always produced, even for erroneous input: `items` holds every top-level node that parsed, and
/// `diagnostics` records what went wrong.
#[derive(Debug)]
pub struct CompilationUnit {
    /// Global declarations and function definitions, in source order.
    pub items: Vec<Node>,
    pub symbols: SymbolTable,
    pub interner: Interner,
    pub diagnostics: Diagnostics,
}

impl CompilationUnit {
    /// Whether any diagnostic was emitted, including suppressed ones.
    pub fn had_error(&self) -> bool {
        self.diagnostics.had_error()
    }

    pub fn errors(&self) -> &[CompileError] {
        self.diagnostics.errors()
    }

    /// Source spelling of a symbol's name.
    pub fn name_of(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id).map(|s| self.interner.resolve(s.name))
    }

    /// Indented tree dump of every item with resolved types.
    pub fn dump(&self) -> String {
        dump(&self.items, &self.interner, &self.symbols)
    }
}

/// Parse and check a source buffer whose first byte sits at global offset `base`.
///
/// This is the main public entrypoint for parsing.
#[tracing::instrument(skip_all, fields(source_len = source.len(), base))]
pub fn parse_source(source: &str, base: usize) -> CompilationUnit {
    let unit = Parser::new(source, base).parse();
    tracing::debug!(
        items = unit.items.len(),
        errors = unit.errors().len(),
        suppressed = unit.diagnostics.suppressed(),
        "parsed"
    );
    unit
}
