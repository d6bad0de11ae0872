//! Semantic analysis, run interleaved with parsing.
//!
//! The parser calls into [`Sema`] the moment a construct is complete: a declarator is registered
//! before its initializer is parsed, a binary node is typed before it is returned to its parent,
//! and so on. Every check reports through the [`Context`] and then carries on with a best-effort
//! type, so the tree stays fully typed even when the program is wrong.
//!
//! ## Typing rules
//!
//! - No implicit conversions. Operands, assignment sides, arguments and return values must have
//!   structurally equal types.
//! - `+ - * /` need arithmetic operands and keep their type; `%` needs `int`.
//! - `< <= > >=` need arithmetic operands, `== !=` need scalar operands; both yield `bool`.
//! - `&&`, `||` and `!` need `bool`.
//! - Conditions of `if` and `while` must be `bool`.
//! - Unresolved names get an unbound placeholder symbol of type `void`.

use cact_core::lang::builtins;

use crate::frontend::ast::{BinaryOp, Node, NodeKind, Span, UnaryOp};
use crate::frontend::context::Context;
use crate::frontend::diagnostics::errors;
use crate::frontend::interner::Name;
use crate::frontend::lexer::Token;
use crate::frontend::symbols::{ScopeKind, Symbol, SymbolId, SymbolKind, SymbolTable};
use crate::frontend::types::{Primitives, Type, TypeRef, func_of};

/// Scope chain, primitive types and per-function state of one compilation.
#[derive(Debug)]
pub struct Sema {
    pub symbols: SymbolTable,
    pub primitives: Primitives,
    /// Declared return type of the function whose body is being parsed.
    current_return: Option<TypeRef>,
}

impl Sema {
    /// Create the analyzer and pre-declare the runtime builtins in the global scope.
    pub fn new(ctx: &mut Context) -> Self {
        let mut sema = Self {
            symbols: SymbolTable::new(),
            primitives: Primitives::new(),
            current_return: None,
        };
        sema.register_builtins(ctx);
        sema
    }

    fn register_builtins(&mut self, ctx: &mut Context) {
        for info in builtins::BUILTIN_FUNCTIONS {
            let params = info.params.iter().map(|&p| self.primitives.scalar(p)).collect();
            let ty = func_of(&self.primitives.scalar(info.ret), params);
            let name = ctx.intern(info.canonical);
            let symbol = Symbol::new(name, ty, SymbolKind::Builtin(info.id), Span::default());
            if self.symbols.define(symbol).is_ok() {
                tracing::trace!(name = info.canonical, "registered builtin");
            }
        }
    }

    // ========================================================================
    // Scopes and names
    // ========================================================================

    pub fn enter_scope(&mut self, kind: ScopeKind) {
        self.symbols.enter_scope(kind);
    }

    pub fn exit_scope(&mut self) {
        self.symbols.exit_scope();
    }

    /// Begin a function body: parameters and body statements share this scope.
    pub fn enter_function(&mut self, ret: TypeRef) {
        self.symbols.enter_scope(ScopeKind::Function);
        self.current_return = Some(ret);
    }

    pub fn exit_function(&mut self) {
        self.symbols.exit_scope();
        self.current_return = None;
    }

    /// Register a name in the current scope.
    ///
    /// A name already bound in this scope is a redefinition: the error is reported and the new
    /// symbol is still created (unbound) so the declaration keeps its own type.
    pub fn define(
        &mut self,
        ctx: &mut Context,
        name: Name,
        ty: TypeRef,
        kind: SymbolKind,
        is_const: bool,
        span: Span,
    ) -> SymbolId {
        let symbol = Symbol::new(name, ty, kind, span).with_const(is_const);
        match self.symbols.define(symbol.clone()) {
            Ok(id) => id,
            Err(_) => {
                ctx.report(errors::redefinition(ctx.resolve(name), span));
                self.symbols.insert_unbound(symbol)
            }
        }
    }

    /// Innermost symbol bound to `name`.
    pub fn lookup(&self, name: Name) -> Option<SymbolId> {
        self.symbols.lookup(name)
    }

    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    fn placeholder(&mut self, name: Name, span: Span) -> SymbolId {
        let symbol = Symbol::new(name, self.primitives.void.clone(), SymbolKind::Variable, span);
        self.symbols.insert_unbound(symbol)
    }

    fn type_of(&self, node: &Node) -> TypeRef {
        node.ty.clone().unwrap_or_else(|| self.primitives.void.clone())
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Resolve a variable reference.
    pub fn check_var(&mut self, ctx: &mut Context, name: Name, tok: Token) -> Node {
        let id = match self.lookup(name) {
            Some(id) => {
                if self.symbol(id).is_some_and(Symbol::is_function) {
                    ctx.report(errors::function_as_value(ctx.resolve(name), tok.span));
                }
                id
            }
            None => {
                ctx.report(errors::undeclared_variable(ctx.resolve(name), tok.span));
                self.placeholder(name, tok.span)
            }
        };
        let ty = self
            .symbol(id)
            .map(|s| s.ty.clone())
            .unwrap_or_else(|| self.primitives.void.clone());
        Node::typed(NodeKind::Var(id), tok, ty)
    }

    /// Resolve a call and unify its arguments with the callee's parameters.
    pub fn check_call(&mut self, ctx: &mut Context, name: Name, args: Vec<Node>, tok: Token) -> Node {
        let void = self.primitives.void.clone();
        let callee = match self.lookup(name) {
            None => {
                ctx.report(errors::undeclared_function(ctx.resolve(name), tok.span));
                None
            }
            Some(id) if !self.symbol(id).is_some_and(Symbol::is_function) => {
                ctx.report(errors::not_a_function(ctx.resolve(name), tok.span));
                None
            }
            Some(id) => Some(id),
        };

        let ret = match callee.and_then(|id| self.symbol(id)).map(|s| s.ty.clone()) {
            Some(fn_ty) => {
                self.check_arguments(ctx, name, &fn_ty, &args, tok.span);
                fn_ty.return_type().cloned().unwrap_or(void)
            }
            None => void,
        };
        Node::typed(NodeKind::Call { name, callee, args }, tok, ret)
    }

    fn check_arguments(&self, ctx: &mut Context, name: Name, fn_ty: &Type, args: &[Node], span: Span) {
        let params = fn_ty.params().unwrap_or(&[]);
        if params.len() != args.len() {
            ctx.report(errors::arg_count_mismatch(ctx.resolve(name), params.len(), args.len(), span));
            return;
        }
        for (i, (param, arg)) in params.iter().zip(args).enumerate() {
            let arg_ty = self.type_of(arg);
            if !param.accepts_argument(&arg_ty) {
                let err = errors::arg_type_mismatch(
                    ctx.resolve(name),
                    i + 1,
                    &param.to_string(),
                    &arg_ty.to_string(),
                    arg.span(),
                );
                ctx.report(err);
                return;
            }
        }
    }

    /// Type `base[index]`.
    pub fn check_index(&mut self, ctx: &mut Context, base: Node, index: Node, tok: Token) -> Node {
        let base_ty = self.type_of(&base);
        let index_ty = self.type_of(&index);
        let ty = match base_ty.element() {
            Some(elem) => elem.clone(),
            None => {
                ctx.report(errors::not_an_array(&base_ty.to_string(), base.span()));
                base_ty.clone()
            }
        };
        if !index_ty.is_int() {
            ctx.report(errors::index_not_int(&index_ty.to_string(), index.span()));
        }
        Node::typed(
            NodeKind::ArrayAccess {
                base: Box::new(base),
                index: Box::new(index),
            },
            tok,
            ty,
        )
    }

    /// Type a prefix `-` or `!`.
    pub fn check_unary(&mut self, ctx: &mut Context, op: UnaryOp, operand: Node, tok: Token) -> Node {
        let operand_ty = self.type_of(&operand);
        let ty = match &op {
            UnaryOp::Neg => {
                if !operand_ty.is_arithmetic() {
                    ctx.report(errors::negate_needs_numeric(&operand_ty.to_string(), tok.span));
                }
                operand_ty
            }
            UnaryOp::Not => {
                if !operand_ty.is_bool() {
                    ctx.report(errors::not_needs_bool(&operand_ty.to_string(), tok.span));
                }
                self.primitives.bool.clone()
            }
            UnaryOp::Cast(target) => target.clone(),
        };
        Node::typed(
            NodeKind::Unary {
                op,
                operand: Box::new(operand),
            },
            tok,
            ty,
        )
    }

    /// Type a binary operator other than assignment.
    pub fn check_binary(&mut self, ctx: &mut Context, op: BinaryOp, lhs: Node, rhs: Node, tok: Token) -> Node {
        if op == BinaryOp::Assign {
            return self.check_assign(ctx, lhs, rhs, tok);
        }
        let lhs_ty = self.type_of(&lhs);
        let rhs_ty = self.type_of(&rhs);
        let result = if op.is_arithmetic() {
            lhs_ty.clone()
        } else {
            self.primitives.bool.clone()
        };

        if lhs_ty != rhs_ty {
            ctx.report(errors::binary_mismatch(&lhs_ty.to_string(), &rhs_ty.to_string(), tok.span));
        } else if op == BinaryOp::Mod {
            if !lhs_ty.is_int() {
                ctx.report(errors::modulo_needs_int(&lhs_ty.to_string(), tok.span));
            }
        } else if op.is_arithmetic() {
            if !lhs_ty.is_arithmetic() {
                ctx.report(errors::arithmetic_needs_numeric(&lhs_ty.to_string(), tok.span));
            }
        } else if op.is_logical() {
            if !lhs_ty.is_bool() {
                ctx.report(errors::logical_needs_bool(&lhs_ty.to_string(), tok.span));
            }
        } else if matches!(op, BinaryOp::Eq | BinaryOp::Ne) {
            if !lhs_ty.is_scalar() || lhs_ty.is_void() {
                ctx.report(errors::equality_needs_scalar(&lhs_ty.to_string(), tok.span));
            }
        } else if !lhs_ty.is_arithmetic() {
            ctx.report(errors::comparison_needs_numeric(&lhs_ty.to_string(), tok.span));
        }

        Node::typed(
            NodeKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            tok,
            result,
        )
    }

    /// Type `lhs = rhs`. The node's type is always the lhs type.
    pub fn check_assign(&mut self, ctx: &mut Context, lhs: Node, rhs: Node, tok: Token) -> Node {
        let lhs_ty = self.type_of(&lhs);
        let rhs_ty = self.type_of(&rhs);

        match self.assign_target(&lhs) {
            None => {
                ctx.report(errors::not_assignable(lhs.span()));
            }
            Some(target) if target.is_const => {
                ctx.report(errors::const_assignment(ctx.resolve(target.name), lhs.span()));
            }
            Some(_) if lhs_ty.is_array() => {
                ctx.report(errors::array_assignment(tok.span));
            }
            Some(_) => {
                if lhs_ty != rhs_ty {
                    ctx.report(errors::assign_mismatch(&lhs_ty.to_string(), &rhs_ty.to_string(), tok.span));
                }
            }
        }

        Node::typed(
            NodeKind::Binary {
                op: BinaryOp::Assign,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            tok,
            lhs_ty,
        )
    }

    /// The variable an lvalue writes through, or `None` if `node` is not an lvalue.
    fn assign_target(&self, node: &Node) -> Option<&Symbol> {
        match &node.kind {
            NodeKind::Var(id) => self.symbol(*id).filter(|s| !s.is_function()),
            NodeKind::ArrayAccess { base, .. } => self.assign_target(base),
            _ => None,
        }
    }

    /// Conditions of `if` and `while` must be `bool`.
    pub fn check_condition(&self, ctx: &mut Context, cond: &Node) {
        let ty = self.type_of(cond);
        if !ty.is_bool() {
            ctx.report(errors::condition_not_bool(&ty.to_string(), cond.span()));
        }
    }

    // ========================================================================
    // Statements and declarations
    // ========================================================================

    /// Check a `return` against the enclosing function's declared type.
    pub fn check_return(&self, ctx: &mut Context, value: Option<&Node>, tok: &Token) {
        let Some(ret) = &self.current_return else {
            return;
        };
        match value {
            Some(value) if ret.is_void() => {
                ctx.report(errors::void_returns_value(value.span()));
            }
            Some(value) => {
                let found = self.type_of(value);
                if found != *ret {
                    ctx.report(errors::return_mismatch(&ret.to_string(), &found.to_string(), value.span()));
                }
            }
            None if !ret.is_void() => {
                ctx.report(errors::missing_return_value(tok.span));
            }
            None => {}
        }
    }

    /// Check an initializer against the declared type and record the type on list nodes.
    ///
    /// Scalars need an equal type. Lists are only valid for arrays; each element is either a nested
    /// list for the next dimension or a scalar of the innermost element type.
    pub fn check_initializer(&self, ctx: &mut Context, declared: &TypeRef, init: &mut Node) {
        let NodeKind::InitList(items) = &mut init.kind else {
            let found = self.type_of(init);
            if found != *declared {
                ctx.report(errors::init_mismatch(&declared.to_string(), &found.to_string(), init.span()));
            }
            return;
        };

        init.ty = Some(declared.clone());
        let Some(elem) = declared.element() else {
            ctx.report(errors::init_list_for_scalar(&declared.to_string(), init.tok.span));
            return;
        };

        let scalar = declared.element_scalar();
        let elem_count = elem.scalar_count().unwrap_or(1);
        let mut used: u64 = 0;
        for item in items.iter_mut() {
            if matches!(item.kind, NodeKind::InitList(_)) {
                self.check_initializer(ctx, elem, item);
                used = used.saturating_add(elem_count);
            } else {
                let found = self.type_of(item);
                if *found != *scalar {
                    ctx.report(errors::init_mismatch(&scalar.to_string(), &found.to_string(), item.span()));
                }
                used = used.saturating_add(1);
            }
        }
        if let Some(capacity) = declared.scalar_count()
            && used > capacity
        {
            ctx.report(errors::too_many_initializers(&declared.to_string(), init.tok.span));
        }
    }

    /// Variable types must not be `void`, and a sized array must fit in memory.
    pub fn check_variable_type(&self, ctx: &mut Context, name: Name, ty: &TypeRef, span: Span) {
        if ty.element_scalar().is_void() {
            ctx.report(errors::void_variable(ctx.resolve(name), span));
        } else if ty.size().is_none() {
            ctx.report(errors::array_too_large(ctx.resolve(name), &ty.to_string(), span));
        }
    }
}
