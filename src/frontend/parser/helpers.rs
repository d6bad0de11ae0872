/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Consuming tokens (`advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Error recovery (`recover`, `synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    /// Pull the next token from the lexer and return the one just consumed.
    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token(&mut self.ctx);
        let tok = std::mem::replace(&mut self.current, next);
        match tok.kind {
            TokenKind::Punctuation(PunctuationId::LBrace) => self.braces += 1,
            TokenKind::Punctuation(PunctuationId::RBrace) => self.braces -= 1,
            _ => {}
        }
        self.previous = Some(tok.kind);
        self.consumed += 1;
        tok
    }

    fn mark(&self) -> Mark {
        Mark {
            consumed: self.consumed,
            braces: self.braces,
        }
    }

    /// Run `parse` one nesting level deeper, failing once [`MAX_NESTING`] is exceeded.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, CompileError>) -> Result<T, CompileError> {
        if self.nesting >= MAX_NESTING {
            return Err(errors::nesting_too_deep(MAX_NESTING, self.current.span));
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.current.kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.current.kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.current.kind.is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, id: PunctuationId) -> Result<Token, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", punctuation::as_str(id))))
        }
    }

    fn expect_ident(&mut self) -> Result<(Name, Token), CompileError> {
        match self.current.kind {
            TokenKind::Ident(name) => Ok((name, self.advance())),
            _ => Err(self.unexpected("an identifier")),
        }
    }

    /// "Expected `what`, found <current token>" at the current token.
    fn unexpected(&self, what: &str) -> CompileError {
        errors::expected(what, &self.describe_current(), self.current.span)
    }

    fn describe_current(&self) -> String {
        self.current.kind.describe(&self.ctx.interner)
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Handle a failed item: report, then skip to the next restart point.
    ///
    /// A failure on an [`TokenKind::Error`] token is not reported again; the lexer already did.
    /// If the item failed on its very first token, that token is discarded before looking for a
    /// restart point, so the same item never fails twice.
    fn recover(&mut self, error: CompileError, mark: Mark) {
        if self.current.kind != TokenKind::Error {
            self.ctx.report(error);
        }
        let open = (self.braces - mark.braces).max(0);
        self.synchronize(open, self.consumed == mark.consumed);
    }

    /// Leave panic mode and skip to the next safe restart point.
    ///
    /// Restart points: the token right after a `;`, a token that starts a statement or declaration
    /// (`if`, `while`, `return`, a type keyword, `const`), a `}` closing the enclosing block, or
    /// end of input. `open` braces were left unclosed by the failed item; their `}` are skipped.
    /// A `{ ... }` group met while skipping is skipped whole and ends the skip when no brace of the
    /// failed item is still open.
    fn synchronize(&mut self, mut open: isize, discard_first: bool) {
        self.ctx.diagnostics.resync();
        let mut skipped = 0usize;
        let mut groups = 0usize;
        while !self.is_at_end() {
            let must_skip = discard_first && skipped == 0;
            if groups == 0 && !must_skip && self.at_sync_point(open) {
                break;
            }
            let tok = self.advance();
            skipped += 1;
            match tok.kind {
                TokenKind::Punctuation(PunctuationId::LBrace) => groups += 1,
                TokenKind::Punctuation(PunctuationId::RBrace) if groups > 0 => {
                    groups -= 1;
                    if groups == 0 && open == 0 {
                        break;
                    }
                }
                TokenKind::Punctuation(PunctuationId::RBrace) => open = (open - 1).max(0),
                _ => {}
            }
        }
        tracing::debug!(skipped, at = ?self.current.kind, "synchronized");
    }

    fn at_sync_point(&self, open: isize) -> bool {
        if self.previous.is_some_and(|k| k.is_punctuation(PunctuationId::Semicolon)) {
            return true;
        }
        let kind = self.current.kind;
        kind.starts_declaration()
            || kind.is_keyword(KeywordId::If)
            || kind.is_keyword(KeywordId::While)
            || kind.is_keyword(KeywordId::Return)
            || (open == 0 && kind.is_punctuation(PunctuationId::RBrace))
    }

    /// A completed item is a statement boundary: errors reported inside it end the region.
    fn end_of_item(&mut self) {
        if self.ctx.diagnostics.is_recovering() {
            self.ctx.diagnostics.resync();
        }
    }
}
