/// Declaration parsing methods.
///
/// This chunk parses top-level items (global variables and function definitions), local variable
/// declarations, array dimensions, initializers, and parameter lists.
///
/// ## Notes
/// - A declarator's symbol is registered before its initializer is parsed.
/// - A function symbol is registered before its body is parsed, so recursion resolves.
impl<'a> Parser<'a> {
    // ========================================================================
    // Top level
    // ========================================================================

    /// `const? type ident` followed by either a parameter list (function) or declarators.
    fn external_declaration(&mut self) -> Result<Vec<Node>, CompileError> {
        let const_tok = self.current;
        let is_const = self.match_keyword(KeywordId::Const);
        let base = self.type_specifier()?;
        let (name, name_tok) = self.expect_ident()?;

        if self.check_punct(PunctuationId::LParen) {
            if is_const {
                self.ctx.report(errors::const_function(self.ctx.resolve(name), const_tok.span));
            }
            return Ok(vec![self.function_definition(base, name, name_tok)?]);
        }
        self.declarators(is_const, &base, name, name_tok)
    }

    /// A scalar type keyword.
    fn type_specifier(&mut self) -> Result<TypeRef, CompileError> {
        if let TokenKind::Keyword(kw) = self.current.kind
            && let Some(id) = keywords::scalar_type(kw)
        {
            self.advance();
            return Ok(self.sema.primitives.scalar(id));
        }
        Err(errors::expected_type(&self.describe_current(), self.current.span))
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// Local declaration: `const? type declarator (, declarator)* ;`
    fn declaration(&mut self) -> Result<Vec<Node>, CompileError> {
        let is_const = self.match_keyword(KeywordId::Const);
        let base = self.type_specifier()?;
        let (name, name_tok) = self.expect_ident()?;
        self.declarators(is_const, &base, name, name_tok)
    }

    /// The declarator list after the first name has been read, through the closing `;`.
    fn declarators(
        &mut self,
        is_const: bool,
        base: &TypeRef,
        name: Name,
        name_tok: Token,
    ) -> Result<Vec<Node>, CompileError> {
        let mut decls = vec![self.declarator(is_const, base, name, name_tok)?];
        while self.match_punct(PunctuationId::Comma) {
            let (name, name_tok) = self.expect_ident()?;
            decls.push(self.declarator(is_const, base, name, name_tok)?);
        }
        self.expect_punct(PunctuationId::Semicolon)?;
        Ok(decls)
    }

    fn declarator(&mut self, is_const: bool, base: &TypeRef, name: Name, name_tok: Token) -> Result<Node, CompileError> {
        let dims = self.array_dims(false)?;
        let ty = array_from_dims(base, &dims);
        self.sema.check_variable_type(&mut self.ctx, name, &ty, name_tok.span);
        let symbol = self
            .sema
            .define(&mut self.ctx, name, ty.clone(), SymbolKind::Variable, is_const, name_tok.span);

        let init = if self.match_op(OperatorId::Assign) {
            let mut init = self.initializer()?;
            self.sema.check_initializer(&mut self.ctx, &ty, &mut init);
            Some(Box::new(init))
        } else {
            if is_const {
                self.ctx
                    .report(errors::const_without_initializer(self.ctx.resolve(name), name_tok.span));
            }
            None
        };

        Ok(Node::typed(NodeKind::VarDecl { symbol, init }, name_tok, ty))
    }

    /// Zero or more `[N]` suffixes, outermost first.
    ///
    /// With `allow_unsized_first`, the first dimension may be written `[]` (array parameters).
    fn array_dims(&mut self, allow_unsized_first: bool) -> Result<Vec<Option<u32>>, CompileError> {
        let mut dims = Vec::new();
        while self.match_punct(PunctuationId::LBracket) {
            if allow_unsized_first && dims.is_empty() && self.match_punct(PunctuationId::RBracket) {
                dims.push(None);
                continue;
            }
            let TokenKind::Int(len) = self.current.kind else {
                return Err(errors::array_size_not_constant(self.current.span));
            };
            if len <= 0 {
                return Err(errors::array_size_not_positive(self.current.span));
            }
            self.advance();
            self.expect_punct(PunctuationId::RBracket)?;
            dims.push(Some(len.unsigned_abs()));
        }
        Ok(dims)
    }

    /// A single expression or a brace-delimited, possibly nested, initializer list.
    fn initializer(&mut self) -> Result<Node, CompileError> {
        if !self.check_punct(PunctuationId::LBrace) {
            return self.expression();
        }
        self.nested(Self::initializer_list)
    }

    fn initializer_list(&mut self) -> Result<Node, CompileError> {
        let tok = self.advance();
        let mut items = Vec::new();
        if !self.check_punct(PunctuationId::RBrace) {
            loop {
                items.push(self.initializer()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(Node::new(NodeKind::InitList(items), tok))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn function_definition(&mut self, ret: TypeRef, name: Name, name_tok: Token) -> Result<Node, CompileError> {
        self.expect_punct(PunctuationId::LParen)?;
        let params = self.parameter_list()?;
        self.expect_punct(PunctuationId::RParen)?;

        let fn_ty = func_of(&ret, params.iter().map(|p| p.ty.clone()).collect());
        let symbol = self
            .sema
            .define(&mut self.ctx, name, fn_ty.clone(), SymbolKind::Function, false, name_tok.span);

        self.sema.enter_function(ret);
        let result = self.function_body(&params);
        self.sema.exit_function();
        let (params, body) = result?;

        Ok(Node::typed(
            NodeKind::Function {
                symbol,
                params,
                body: Box::new(body),
            },
            name_tok,
            fn_ty,
        ))
    }

    /// `(type ident dims)*` separated by commas; the closing `)` is left for the caller.
    fn parameter_list(&mut self) -> Result<Vec<Param>, CompileError> {
        let mut params = Vec::new();
        if self.check_punct(PunctuationId::RParen) {
            return Ok(params);
        }
        loop {
            let base = self.type_specifier()?;
            let (name, tok) = self.expect_ident()?;
            let dims = self.array_dims(true)?;
            let ty = array_from_dims(&base, &dims);
            self.sema.check_variable_type(&mut self.ctx, name, &ty, tok.span);
            params.push(Param { name, ty, tok });
            if !self.match_punct(PunctuationId::Comma) {
                return Ok(params);
            }
        }
    }

    /// Register the parameters, then parse the body in the same scope.
    fn function_body(&mut self, params: &[Param]) -> Result<(Vec<SymbolId>, Node), CompileError> {
        let ids = params
            .iter()
            .map(|p| {
                self.sema
                    .define(&mut self.ctx, p.name, p.ty.clone(), SymbolKind::Parameter, false, p.tok.span)
            })
            .collect();
        let tok = self.expect_punct(PunctuationId::LBrace)?;
        let items = self.block_items();
        self.expect_punct(PunctuationId::RBrace)?;
        Ok((ids, Node::new(NodeKind::Block(items), tok)))
    }
}
