/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` loop, plus the small
/// internal types shared across the other parser chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::frontend::parser` to keep all parser methods in a
///   single module.

/// A parsed function parameter, registered in the function scope once the signature is complete.
struct Param {
    name: Name,
    ty: TypeRef,
    tok: Token,
}

/// Position of the parser when an item starts, used to recover if the item fails.
#[derive(Debug, Clone, Copy)]
struct Mark {
    consumed: usize,
    braces: isize,
}

/// Deepest nesting of statements, initializer lists and expressions before parsing gives up.
const MAX_NESTING: usize = 128;

/// Parser state.
///
/// ## Notes
/// - The parser owns the compilation [`Context`] and the [`Sema`] scope chain for the whole run.
/// - Only one token of lookahead is held; the lexer is asked for the next one on `advance`.
/// - `consumed` counts tokens taken from the lexer, so the item loops can tell whether an
///   attempt made progress before failing.
/// - `braces` is the running balance of `{` over `}` consumed; recovery compares it against the
///   item's [`Mark`] to know which braces the failed item left open.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    ctx: Context,
    sema: Sema,
    current: Token,
    previous: Option<TokenKind>,
    consumed: usize,
    braces: isize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over `source`, whose first byte sits at global offset `base`.
    ///
    /// Builtin runtime functions are declared in the global scope before the first token is read.
    pub fn new(source: &'a str, base: usize) -> Self {
        let mut ctx = Context::new();
        let sema = Sema::new(&mut ctx);
        let mut lexer = Lexer::new(source, base);
        let current = lexer.next_token(&mut ctx);
        Self {
            lexer,
            ctx,
            sema,
            current,
            previous: None,
            consumed: 0,
            braces: 0,
            nesting: 0,
        }
    }

    /// Parse the whole buffer into a [`CompilationUnit`].
    ///
    /// Never fails: errors are reported to the diagnostics sink, the parser resynchronizes, and the
    /// items that did parse are kept.
    pub fn parse(mut self) -> CompilationUnit {
        let mut items = Vec::new();

        while !self.is_at_end() {
            let mark = self.mark();
            match self.external_declaration() {
                Ok(nodes) => {
                    items.extend(nodes);
                    self.end_of_item();
                }
                Err(e) => self.recover(e, mark),
            }
        }

        let (interner, diagnostics) = self.ctx.into_parts();
        CompilationUnit {
            items,
            symbols: self.sema.symbols,
            interner,
            diagnostics,
        }
    }
}
