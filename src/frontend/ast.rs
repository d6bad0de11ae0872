//! Abstract Syntax Tree definitions for CACT
//!
//! Every node shares one header: its [`NodeKind`], the token it was built from (kept for
//! diagnostics), and the type assigned by semantic analysis. The parser fills `ty` for every
//! expression before handing the node to its parent, so downstream stages can rely on it.

use std::fmt::{self, Write as _};

use cact_core::lang::operators::{self, OperatorId};

use crate::frontend::interner::{Interner, Name};
use crate::frontend::lexer::Token;
use crate::frontend::symbols::{SymbolId, SymbolTable};
use crate::frontend::types::TypeRef;

/// Source location span (global byte offsets, see [`crate::frontend::source::SourceMap`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Prefix operators.
#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOp {
    Neg,
    Not,
    /// Conversion to the carried type. The parser never produces it; later stages insert it.
    Cast(TypeRef),
}

/// Infix operators, assignment included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Assign,
}

impl BinaryOp {
    /// Map a lexer operator onto the binary form it denotes.
    pub fn from_operator(id: OperatorId) -> Option<Self> {
        Some(match id {
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::Percent => BinaryOp::Mod,
            OperatorId::EqEq => BinaryOp::Eq,
            OperatorId::NotEq => BinaryOp::Ne,
            OperatorId::Lt => BinaryOp::Lt,
            OperatorId::LtEq => BinaryOp::Le,
            OperatorId::Gt => BinaryOp::Gt,
            OperatorId::GtEq => BinaryOp::Ge,
            OperatorId::AndAnd => BinaryOp::And,
            OperatorId::OrOr => BinaryOp::Or,
            OperatorId::Assign => BinaryOp::Assign,
            OperatorId::Not => return None,
        })
    }

    pub fn operator(self) -> OperatorId {
        match self {
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
            BinaryOp::Mod => OperatorId::Percent,
            BinaryOp::Eq => OperatorId::EqEq,
            BinaryOp::Ne => OperatorId::NotEq,
            BinaryOp::Lt => OperatorId::Lt,
            BinaryOp::Le => OperatorId::LtEq,
            BinaryOp::Gt => OperatorId::Gt,
            BinaryOp::Ge => OperatorId::GtEq,
            BinaryOp::And => OperatorId::AndAnd,
            BinaryOp::Or => OperatorId::OrOr,
            BinaryOp::Assign => OperatorId::Assign,
        }
    }

    pub fn as_str(self) -> &'static str {
        operators::as_str(self.operator())
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An AST node: shared header plus variant payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Representative token, used to place diagnostics.
    pub tok: Token,
    /// Resolved type. Always set on expressions; set on declarations to the declared type.
    pub ty: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // ========== Literals ==========
    IntLit(i32),
    FloatLit(f32),
    DoubleLit(f64),
    BoolLit(bool),
    /// `{ ... }` initializer, nested for multi-dimensional arrays.
    InitList(Vec<Node>),

    // ========== Expressions ==========
    Var(SymbolId),
    Call {
        name: Name,
        /// `None` when the name did not resolve to a function.
        callee: Option<SymbolId>,
        args: Vec<Node>,
    },
    ArrayAccess {
        base: Box<Node>,
        index: Box<Node>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },

    // ========== Statements ==========
    Block(Vec<Node>),
    If {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        cond: Box<Node>,
        body: Box<Node>,
    },
    Return(Option<Box<Node>>),
    ExprStmt(Box<Node>),
    VarDecl {
        symbol: SymbolId,
        init: Option<Box<Node>>,
    },
    Break,
    Continue,

    // ========== Top level ==========
    Function {
        symbol: SymbolId,
        params: Vec<SymbolId>,
        body: Box<Node>,
    },
}

impl Node {
    pub fn new(kind: NodeKind, tok: Token) -> Self {
        Self { kind, tok, ty: None }
    }

    pub fn typed(kind: NodeKind, tok: Token, ty: TypeRef) -> Self {
        Self {
            kind,
            tok,
            ty: Some(ty),
        }
    }

    /// Wrap `operand` in an explicit conversion to `target`.
    pub fn cast(operand: Node, target: TypeRef) -> Self {
        let tok = operand.tok;
        Self::typed(
            NodeKind::Unary {
                op: UnaryOp::Cast(target.clone()),
                operand: Box::new(operand),
            },
            tok,
            target,
        )
    }

    pub fn span(&self) -> Span {
        self.tok.span
    }

    /// Short label naming the variant, as used by the tree dump and the JSON emitter.
    pub fn label(&self) -> &'static str {
        match &self.kind {
            NodeKind::IntLit(_) => "IntLit",
            NodeKind::FloatLit(_) => "FloatLit",
            NodeKind::DoubleLit(_) => "DoubleLit",
            NodeKind::BoolLit(_) => "BoolLit",
            NodeKind::InitList(_) => "InitList",
            NodeKind::Var(_) => "Var",
            NodeKind::Call { .. } => "Call",
            NodeKind::ArrayAccess { .. } => "ArrayAccess",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::Block(_) => "Block",
            NodeKind::If { .. } => "If",
            NodeKind::While { .. } => "While",
            NodeKind::Return(_) => "Return",
            NodeKind::ExprStmt(_) => "ExprStmt",
            NodeKind::VarDecl { .. } => "VarDecl",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
            NodeKind::Function { .. } => "Function",
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::DoubleLit(_)
            | NodeKind::BoolLit(_)
            | NodeKind::Var(_)
            | NodeKind::Break
            | NodeKind::Continue => Vec::new(),
            NodeKind::InitList(items) | NodeKind::Block(items) => items.iter().collect(),
            NodeKind::Call { args, .. } => args.iter().collect(),
            NodeKind::ArrayAccess { base, index } => vec![&**base, &**index],
            NodeKind::Unary { operand, .. } => vec![&**operand],
            NodeKind::Binary { lhs, rhs, .. } => vec![&**lhs, &**rhs],
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let mut out: Vec<&Node> = vec![&**cond, &**then_branch];
                out.extend(else_branch.as_deref());
                out
            }
            NodeKind::While { cond, body } => vec![&**cond, &**body],
            NodeKind::Return(value) => value.as_deref().into_iter().collect(),
            NodeKind::ExprStmt(expr) => vec![&**expr],
            NodeKind::VarDecl { init, .. } => init.as_deref().into_iter().collect(),
            NodeKind::Function { body, .. } => vec![&**body],
        }
    }

    /// Re-serialize a literal or name leaf so that lexing the text yields an equal token.
    ///
    /// Returns `None` for nodes that are not leaves.
    pub fn leaf_source(&self, interner: &Interner, symbols: &SymbolTable) -> Option<String> {
        match &self.kind {
            NodeKind::IntLit(v) => Some(v.to_string()),
            // `{:?}` always keeps a `.` or an exponent, so the text stays a floating literal.
            NodeKind::FloatLit(v) => Some(format!("{:?}f", v)),
            NodeKind::DoubleLit(v) => Some(format!("{:?}", v)),
            NodeKind::BoolLit(v) => Some(v.to_string()),
            NodeKind::Var(id) => symbols.get(*id).map(|s| interner.resolve(s.name).to_string()),
            NodeKind::Call { name, .. } => Some(interner.resolve(*name).to_string()),
            _ => None,
        }
    }

    /// Collect every literal/name leaf below (and including) this node, in source order.
    pub fn leaves(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Node>) {
        match &self.kind {
            NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::DoubleLit(_)
            | NodeKind::BoolLit(_)
            | NodeKind::Var(_) => out.push(self),
            NodeKind::Call { .. } => {
                out.push(self);
                for child in self.children() {
                    child.collect_leaves(out);
                }
            }
            _ => {
                for child in self.children() {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

// ============================================================================
// Tree dump
// ============================================================================

/// Render top-level items as an indented tree with resolved types.
///
/// ```text
/// Function main : int()
///   Block
///     Return
///       IntLit 0 : int
/// ```
pub fn dump(items: &[Node], interner: &Interner, symbols: &SymbolTable) -> String {
    let mut out = String::new();
    for item in items {
        dump_node(&mut out, item, 0, interner, symbols);
    }
    out
}

fn dump_node(out: &mut String, node: &Node, depth: usize, interner: &Interner, symbols: &SymbolTable) {
    let name_of = |id: SymbolId| symbols.get(id).map(|s| interner.resolve(s.name)).unwrap_or("<?>");
    let indent = "  ".repeat(depth);
    let detail = match &node.kind {
        NodeKind::IntLit(v) => format!(" {}", v),
        NodeKind::FloatLit(v) => format!(" {:?}", v),
        NodeKind::DoubleLit(v) => format!(" {:?}", v),
        NodeKind::BoolLit(v) => format!(" {}", v),
        NodeKind::Var(id) => format!(" {}", name_of(*id)),
        NodeKind::Call { name, .. } => format!(" {}", interner.resolve(*name)),
        NodeKind::Unary { op, .. } => match op {
            UnaryOp::Neg => " -".to_string(),
            UnaryOp::Not => " !".to_string(),
            UnaryOp::Cast(ty) => format!(" ({})", ty),
        },
        NodeKind::Binary { op, .. } => format!(" {}", op),
        NodeKind::VarDecl { symbol, .. } | NodeKind::Function { symbol, .. } => format!(" {}", name_of(*symbol)),
        _ => String::new(),
    };
    let _ = write!(out, "{}{}{}", indent, node.label(), detail);
    if let Some(ty) = &node.ty {
        let _ = write!(out, " : {}", ty);
    }
    out.push('\n');

    if let NodeKind::Function { params, .. } = &node.kind {
        for &param in params {
            if let Some(sym) = symbols.get(param) {
                let _ = writeln!(out, "{}  Param {} : {}", indent, interner.resolve(sym.name), sym.ty);
            }
        }
    }
    for child in node.children() {
        dump_node(out, child, depth + 1, interner, symbols);
    }
}
