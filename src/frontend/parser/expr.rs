/// Expression parsing methods.
///
/// Binary operators are parsed by precedence climbing over the operator registry:
///
/// | Level | Operators          |
/// |-------|--------------------|
/// | 10    | `*` `/` `%`        |
/// | 9     | `+` `-`            |
/// | 8     | `<` `<=` `>` `>=`  |
/// | 7     | `==` `!=`          |
/// | 5     | `&&`               |
/// | 4     | `\|\|`             |
///
/// All binary levels are left-associative. Assignment sits above the climbing loop, is only
/// accepted at statement level, and does not chain.
impl<'a> Parser<'a> {
    // ========================================================================
    // Entry points
    // ========================================================================

    /// An expression in value position. A trailing `=` is rejected here.
    fn expression(&mut self) -> Result<Node, CompileError> {
        let expr = self.binary_expr(1)?;
        if self.check_op(OperatorId::Assign) {
            return Err(errors::assignment_in_expression(self.current.span));
        }
        Ok(expr)
    }

    /// The body of an expression statement: `expr` or `lvalue = expr`.
    fn assignment(&mut self) -> Result<Node, CompileError> {
        let lhs = self.binary_expr(1)?;
        if !self.check_op(OperatorId::Assign) {
            return Ok(lhs);
        }
        let tok = self.advance();
        let rhs = self.binary_expr(1)?;
        if self.check_op(OperatorId::Assign) {
            return Err(errors::chained_assignment(self.current.span));
        }
        Ok(self.sema.check_assign(&mut self.ctx, lhs, rhs, tok))
    }

    // ========================================================================
    // Precedence climbing
    // ========================================================================

    /// Parse a unary expression, then fold in every binary operator binding at least `min_prec`.
    fn binary_expr(&mut self, min_prec: u8) -> Result<Node, CompileError> {
        let mut lhs = self.unary()?;
        loop {
            let TokenKind::Operator(id) = self.current.kind else {
                break;
            };
            let prec = operators::precedence(id);
            let Some(op) = BinaryOp::from_operator(id) else {
                break;
            };
            if op == BinaryOp::Assign || prec < min_prec {
                break;
            }
            let tok = self.advance();
            let rhs = self.binary_expr(prec + 1)?;
            lhs = self.sema.check_binary(&mut self.ctx, op, lhs, rhs, tok);
        }
        Ok(lhs)
    }

    /// Prefix `+` (no-op), `-` and `!`, applied right to left.
    ///
    /// Every parenthesized or indexed subexpression comes back through here, so this is where
    /// expression nesting is counted.
    fn unary(&mut self) -> Result<Node, CompileError> {
        self.nested(Self::unary_inner)
    }

    fn unary_inner(&mut self) -> Result<Node, CompileError> {
        let id = match self.current.kind {
            TokenKind::Operator(id) if operators::is_prefix(id) => id,
            _ => return self.postfix(),
        };
        let tok = self.advance();
        let operand = self.unary()?;
        let op = match id {
            OperatorId::Minus => UnaryOp::Neg,
            OperatorId::Not => UnaryOp::Not,
            _ => return Ok(operand),
        };
        Ok(self.sema.check_unary(&mut self.ctx, op, operand, tok))
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    /// A primary followed by any number of `[index]` suffixes.
    fn postfix(&mut self) -> Result<Node, CompileError> {
        let mut expr = self.primary()?;
        while self.check_punct(PunctuationId::LBracket) {
            let tok = self.advance();
            let index = self.expression()?;
            self.expect_punct(PunctuationId::RBracket)?;
            expr = self.sema.check_index(&mut self.ctx, expr, index, tok);
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Node, CompileError> {
        let tok = self.current;
        let prims = &self.sema.primitives;
        let literal = match tok.kind {
            TokenKind::Int(v) => Some((NodeKind::IntLit(v), prims.int.clone())),
            TokenKind::Float(v) => Some((NodeKind::FloatLit(v), prims.float.clone())),
            TokenKind::Double(v) => Some((NodeKind::DoubleLit(v), prims.double.clone())),
            TokenKind::Keyword(KeywordId::True) => Some((NodeKind::BoolLit(true), prims.bool.clone())),
            TokenKind::Keyword(KeywordId::False) => Some((NodeKind::BoolLit(false), prims.bool.clone())),
            _ => None,
        };
        if let Some((kind, ty)) = literal {
            self.advance();
            return Ok(Node::typed(kind, tok, ty));
        }

        match tok.kind {
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let expr = self.expression()?;
                self.expect_punct(PunctuationId::RParen)?;
                Ok(expr)
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.check_punct(PunctuationId::LParen) {
                    self.call(name, tok)
                } else {
                    Ok(self.sema.check_var(&mut self.ctx, name, tok))
                }
            }
            _ => Err(errors::expected_expression(&self.describe_current(), tok.span)),
        }
    }

    /// `name(args)`; the name has already been consumed.
    fn call(&mut self, name: Name, tok: Token) -> Result<Node, CompileError> {
        self.expect_punct(PunctuationId::LParen)?;
        let mut args = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen)?;
        Ok(self.sema.check_call(&mut self.ctx, name, args, tok))
    }
}
