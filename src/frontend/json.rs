//! JSON rendering of a typed AST.
//!
//! Downstream stages (code generators, visualizers, tests in other languages) consume the tree as
//! a JSON document instead of linking against the Rust types. Every node becomes an object with
//! its `kind` label, its `span`, its resolved `type` (C-like spelling, `null` for statements) and
//! kind-specific fields.

use serde_json::{Map, Value, json};

use crate::frontend::ast::{Node, NodeKind, UnaryOp};
use crate::frontend::interner::Interner;
use crate::frontend::parser::CompilationUnit;
use crate::frontend::symbols::{SymbolId, SymbolTable};

/// Render a whole compilation unit: items, plus the error flag.
pub fn unit_to_json(unit: &CompilationUnit) -> Value {
    let items: Vec<Value> = unit
        .items
        .iter()
        .map(|item| node_to_json(item, &unit.interner, &unit.symbols))
        .collect();
    json!({
        "had_error": unit.had_error(),
        "items": items,
    })
}

/// Render one node and its subtree.
pub fn node_to_json(node: &Node, interner: &Interner, symbols: &SymbolTable) -> Value {
    let symbol = |id: SymbolId| symbol_to_json(id, interner, symbols);
    let nodes = |items: &[Node]| -> Vec<Value> { items.iter().map(|n| node_to_json(n, interner, symbols)).collect() };
    let child = |n: &Node| node_to_json(n, interner, symbols);

    let mut obj = Map::new();
    obj.insert("kind".into(), json!(node.label()));
    obj.insert("span".into(), json!([node.span().start, node.span().end]));
    obj.insert(
        "type".into(),
        node.ty.as_ref().map_or(Value::Null, |ty| json!(ty.to_string())),
    );

    match &node.kind {
        NodeKind::IntLit(v) => {
            obj.insert("value".into(), json!(v));
        }
        NodeKind::FloatLit(v) => {
            obj.insert("value".into(), json!(v));
        }
        NodeKind::DoubleLit(v) => {
            obj.insert("value".into(), json!(v));
        }
        NodeKind::BoolLit(v) => {
            obj.insert("value".into(), json!(v));
        }
        NodeKind::InitList(items) => {
            obj.insert("items".into(), json!(nodes(items)));
        }
        NodeKind::Var(id) => {
            obj.insert("symbol".into(), symbol(*id));
        }
        NodeKind::Call { name, callee, args } => {
            obj.insert("name".into(), json!(interner.resolve(*name)));
            obj.insert("resolved".into(), json!(callee.is_some()));
            obj.insert("args".into(), json!(nodes(args)));
        }
        NodeKind::ArrayAccess { base, index } => {
            obj.insert("base".into(), child(base));
            obj.insert("index".into(), child(index));
        }
        NodeKind::Unary { op, operand } => {
            let op = match op {
                UnaryOp::Neg => "-".to_string(),
                UnaryOp::Not => "!".to_string(),
                UnaryOp::Cast(ty) => format!("({})", ty),
            };
            obj.insert("op".into(), json!(op));
            obj.insert("operand".into(), child(operand));
        }
        NodeKind::Binary { op, lhs, rhs } => {
            obj.insert("op".into(), json!(op.as_str()));
            obj.insert("lhs".into(), child(lhs));
            obj.insert("rhs".into(), child(rhs));
        }
        NodeKind::Block(items) => {
            obj.insert("items".into(), json!(nodes(items)));
        }
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            obj.insert("cond".into(), child(cond));
            obj.insert("then".into(), child(then_branch));
            obj.insert("else".into(), else_branch.as_deref().map_or(Value::Null, child));
        }
        NodeKind::While { cond, body } => {
            obj.insert("cond".into(), child(cond));
            obj.insert("body".into(), child(body));
        }
        NodeKind::Return(value) => {
            obj.insert("value".into(), value.as_deref().map_or(Value::Null, child));
        }
        NodeKind::ExprStmt(expr) => {
            obj.insert("expr".into(), child(expr));
        }
        NodeKind::VarDecl { symbol: id, init } => {
            obj.insert("symbol".into(), symbol(*id));
            obj.insert("init".into(), init.as_deref().map_or(Value::Null, child));
        }
        NodeKind::Break | NodeKind::Continue => {}
        NodeKind::Function { symbol: id, params, body } => {
            obj.insert("symbol".into(), symbol(*id));
            obj.insert("params".into(), json!(params.iter().map(|&p| symbol(p)).collect::<Vec<_>>()));
            obj.insert("body".into(), child(body));
        }
    }
    Value::Object(obj)
}

fn symbol_to_json(id: SymbolId, interner: &Interner, symbols: &SymbolTable) -> Value {
    match symbols.get(id) {
        Some(sym) => json!({
            "id": id,
            "name": interner.resolve(sym.name),
            "type": sym.ty.to_string(),
            "const": sym.is_const,
            "global": sym.is_global,
        }),
        None => json!({ "id": id }),
    }
}
