//! Symbol table and scope management for CACT
//!
//! Symbols live in one arena for the whole compilation and are referred to by [`SymbolId`].
//! Scopes form a tree through parent indices: entering a block pushes a child of the current scope,
//! leaving it moves back to the parent. Scopes are never deleted, so ids stay valid after the
//! parser has moved on.

use std::collections::HashMap;

use cact_core::lang::builtins::BuiltinFnId;

use crate::frontend::ast::Span;
use crate::frontend::interner::Name;
use crate::frontend::types::TypeRef;

/// Unique identifier for symbols
pub type SymbolId = usize;

/// Symbol table managing all named entities
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    current_scope: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![Scope::new(None, ScopeKind::Global)],
            current_scope: 0,
        }
    }

    /// Enter a new scope
    pub fn enter_scope(&mut self, kind: ScopeKind) {
        let new_scope = Scope::new(Some(self.current_scope), kind);
        self.scopes.push(new_scope);
        self.current_scope = self.scopes.len() - 1;
        tracing::trace!(scope = self.current_scope, depth = self.depth(), ?kind, "enter scope");
    }

    /// Exit the current scope. The global scope is never left.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope].parent {
            tracing::trace!(scope = self.current_scope, "leave scope");
            self.current_scope = parent;
        }
    }

    /// Define a new symbol in the current scope.
    ///
    /// ## Errors
    /// Returns the id of the existing symbol if the name is already bound in the *current* scope.
    /// Bindings in enclosing scopes are shadowed, not rejected.
    pub fn define(&mut self, mut symbol: Symbol) -> Result<SymbolId, SymbolId> {
        if let Some(existing) = self.lookup_local(symbol.name) {
            return Err(existing);
        }
        symbol.scope = self.current_scope;
        symbol.is_global = self.is_global_scope();
        let id = self.symbols.len();
        self.scopes[self.current_scope].symbols.insert(symbol.name, id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Store a symbol that no scope binds.
    ///
    /// Used for redefinitions and unresolved names, so nodes can still refer to a symbol with a
    /// type without shadowing the original binding.
    pub fn insert_unbound(&mut self, mut symbol: Symbol) -> SymbolId {
        symbol.scope = self.current_scope;
        symbol.is_global = self.is_global_scope();
        self.symbols.push(symbol);
        self.symbols.len() - 1
    }

    /// Look up a symbol by name in the current scope chain, innermost first.
    pub fn lookup(&self, name: Name) -> Option<SymbolId> {
        let mut scope_idx = self.current_scope;
        loop {
            if let Some(&id) = self.scopes[scope_idx].symbols.get(&name) {
                return Some(id);
            }
            scope_idx = self.scopes[scope_idx].parent?;
        }
    }

    /// Look up a symbol only in the current scope (no parent lookup)
    pub fn lookup_local(&self, name: Name) -> Option<SymbolId> {
        self.scopes[self.current_scope].symbols.get(&name).copied()
    }

    /// Get a symbol by ID
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn is_global_scope(&self) -> bool {
        self.scopes[self.current_scope].parent.is_none()
    }

    pub fn current_scope(&self) -> usize {
        self.current_scope
    }

    /// Number of scopes between the current one and the global scope.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope_idx = self.current_scope;
        while let Some(parent) = self.scopes[scope_idx].parent {
            depth += 1;
            scope_idx = parent;
        }
        depth
    }

    /// All symbols in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A scope containing symbol definitions
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<usize>,
    pub kind: ScopeKind,
    pub symbols: HashMap<Name, SymbolId>,
}

impl Scope {
    pub fn new(parent: Option<usize>, kind: ScopeKind) -> Self {
        Self {
            parent,
            kind,
            symbols: HashMap::new(),
        }
    }
}

/// Kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    /// Parameters and the outermost statements of a function body.
    Function,
    Block,
}

/// A symbol in the symbol table
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: Name,
    pub ty: TypeRef,
    pub kind: SymbolKind,
    pub is_const: bool,
    /// Set by [`SymbolTable::define`] from the defining scope.
    pub is_global: bool,
    /// Storage slot, assigned by code generation.
    pub slot: Option<u32>,
    pub span: Span,
    pub scope: usize,
}

impl Symbol {
    pub fn new(name: Name, ty: TypeRef, kind: SymbolKind, span: Span) -> Self {
        Self {
            name,
            ty,
            kind,
            is_const: false,
            is_global: false,
            slot: None,
            span,
            scope: 0,
        }
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function | SymbolKind::Builtin(_))
    }
}

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
    /// Runtime function provided by the environment; it has no body.
    Builtin(BuiltinFnId),
}
