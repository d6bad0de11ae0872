/// Statement parsing methods.
///
/// This chunk parses blocks, the keyword-driven statements (`if`, `while`, `return`, `break`,
/// `continue`) and expression statements.
///
/// ## Notes
/// - A block item is a declaration if it starts with `const` or a type keyword, a statement
///   otherwise.
/// - Errors inside a block are recovered by the block's own item loop, so the scope it opened is
///   always closed again.
impl<'a> Parser<'a> {
    // ========================================================================
    // Blocks
    // ========================================================================

    /// `{ item* }` in a new scope.
    fn block(&mut self) -> Result<Node, CompileError> {
        let tok = self.expect_punct(PunctuationId::LBrace)?;
        self.sema.enter_scope(ScopeKind::Block);
        let items = self.block_items();
        self.sema.exit_scope();
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(Node::new(NodeKind::Block(items), tok))
    }

    /// Items up to (not including) the closing `}` or end of input.
    fn block_items(&mut self) -> Vec<Node> {
        let mut items = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            let mark = self.mark();
            match self.block_item() {
                Ok(nodes) => {
                    items.extend(nodes);
                    self.end_of_item();
                }
                Err(e) => self.recover(e, mark),
            }
        }
        items
    }

    fn block_item(&mut self) -> Result<Vec<Node>, CompileError> {
        if self.current.kind.starts_declaration() {
            return self.declaration();
        }
        if self.match_punct(PunctuationId::Semicolon) {
            return Ok(Vec::new());
        }
        Ok(vec![self.statement()?])
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> Result<Node, CompileError> {
        self.nested(Self::statement_inner)
    }

    fn statement_inner(&mut self) -> Result<Node, CompileError> {
        match self.current.kind {
            TokenKind::Keyword(KeywordId::If) => self.if_stmt(),
            TokenKind::Keyword(KeywordId::While) => self.while_stmt(),
            TokenKind::Keyword(KeywordId::Return) => self.return_stmt(),
            TokenKind::Keyword(KeywordId::Break) => self.jump_stmt(NodeKind::Break),
            TokenKind::Keyword(KeywordId::Continue) => self.jump_stmt(NodeKind::Continue),
            TokenKind::Punctuation(PunctuationId::LBrace) => self.block(),
            // Empty statement, e.g. the body of `while (c);`
            TokenKind::Punctuation(PunctuationId::Semicolon) => {
                let tok = self.advance();
                Ok(Node::new(NodeKind::Block(Vec::new()), tok))
            }
            _ => self.expr_stmt(),
        }
    }

    fn if_stmt(&mut self) -> Result<Node, CompileError> {
        let tok = self.advance();
        let cond = self.condition()?;
        let then_branch = self.statement()?;
        let else_branch = if self.match_keyword(KeywordId::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Node::new(
            NodeKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch,
            },
            tok,
        ))
    }

    fn while_stmt(&mut self) -> Result<Node, CompileError> {
        let tok = self.advance();
        let cond = self.condition()?;
        let body = self.statement()?;
        Ok(Node::new(
            NodeKind::While {
                cond: Box::new(cond),
                body: Box::new(body),
            },
            tok,
        ))
    }

    /// `( expr )` whose type must be `bool`.
    fn condition(&mut self) -> Result<Node, CompileError> {
        self.expect_punct(PunctuationId::LParen)?;
        let cond = self.expression()?;
        self.expect_punct(PunctuationId::RParen)?;
        self.sema.check_condition(&mut self.ctx, &cond);
        Ok(cond)
    }

    fn return_stmt(&mut self) -> Result<Node, CompileError> {
        let tok = self.advance();
        let value = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::Semicolon)?;
        self.sema.check_return(&mut self.ctx, value.as_ref(), &tok);
        Ok(Node::new(NodeKind::Return(value.map(Box::new)), tok))
    }

    /// `break;` or `continue;`
    fn jump_stmt(&mut self, kind: NodeKind) -> Result<Node, CompileError> {
        let tok = self.advance();
        self.expect_punct(PunctuationId::Semicolon)?;
        Ok(Node::new(kind, tok))
    }

    /// `expr ;` or `lvalue = expr ;`
    fn expr_stmt(&mut self) -> Result<Node, CompileError> {
        let expr = self.assignment()?;
        self.expect_punct(PunctuationId::Semicolon)?;
        let tok = expr.tok;
        Ok(Node::new(NodeKind::ExprStmt(Box::new(expr)), tok))
    }
}
