#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover the grammar, the semantic checks the parser triggers, and error recovery
/// (one diagnostic per broken region, no lost scopes).
mod tests {
    use super::*;
    use crate::frontend::types::Type;

    fn parse(source: &str) -> CompilationUnit {
        parse_source(source, 0)
    }

    fn messages(unit: &CompilationUnit) -> Vec<String> {
        unit.errors().iter().map(|e| e.message.clone()).collect()
    }

    fn parse_ok(source: &str) -> CompilationUnit {
        let unit = parse(source);
        assert!(!unit.had_error(), "unexpected errors: {:?}", messages(&unit));
        unit
    }

    /// Statements of a function definition's body.
    fn body(item: &Node) -> &[Node] {
        let NodeKind::Function { body, .. } = &item.kind else {
            panic!("expected function, got {:?}", item.kind)
        };
        let NodeKind::Block(items) = &body.kind else {
            panic!("expected block body, got {:?}", body.kind)
        };
        items
    }

    fn expr_of(stmt: &Node) -> &Node {
        match &stmt.kind {
            NodeKind::ExprStmt(expr) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    /// Right-hand side of an assignment expression statement.
    fn assigned(stmt: &Node) -> &Node {
        match &expr_of(stmt).kind {
            NodeKind::Binary {
                op: BinaryOp::Assign,
                rhs,
                ..
            } => rhs,
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    fn binary_op(node: &Node) -> BinaryOp {
        match &node.kind {
            NodeKind::Binary { op, .. } => *op,
            other => panic!("expected binary node, got {:?}", other),
        }
    }

    fn operands(node: &Node) -> (&Node, &Node) {
        match &node.kind {
            NodeKind::Binary { lhs, rhs, .. } => (lhs, rhs),
            other => panic!("expected binary node, got {:?}", other),
        }
    }

    // ---- expressions ----

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let unit = parse_ok("int main() { int a; a = 1 + 2 * 3; return a; }");
        let rhs = assigned(&body(&unit.items[0])[1]);
        assert_eq!(binary_op(rhs), BinaryOp::Add);
        let (lhs, mul) = operands(rhs);
        assert!(matches!(lhs.kind, NodeKind::IntLit(1)));
        assert_eq!(binary_op(mul), BinaryOp::Mul);
        assert_eq!(rhs.ty.as_deref(), Some(&Type::Int));
    }

    #[test]
    fn test_binary_operators_are_left_associative() {
        let unit = parse_ok("int main() { int a; a = 10 - 4 - 3; return a; }");
        let rhs = assigned(&body(&unit.items[0])[1]);
        let (inner, three) = operands(rhs);
        assert_eq!(binary_op(inner), BinaryOp::Sub);
        assert!(matches!(three.kind, NodeKind::IntLit(3)));
    }

    #[test]
    fn test_logical_and_comparison_levels() {
        let unit = parse_ok("int main() { bool b; b = 1 < 2 && 3 >= 4 || false; return 0; }");
        let rhs = assigned(&body(&unit.items[0])[1]);
        assert_eq!(binary_op(rhs), BinaryOp::Or);
        let (and, _) = operands(rhs);
        assert_eq!(binary_op(and), BinaryOp::And);
        let (lt, ge) = operands(and);
        assert_eq!(binary_op(lt), BinaryOp::Lt);
        assert_eq!(binary_op(ge), BinaryOp::Ge);
        assert_eq!(rhs.ty.as_deref(), Some(&Type::Bool));
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let unit = parse_ok("int main() { int a; a = (1 + 2) * 3; return a; }");
        let rhs = assigned(&body(&unit.items[0])[1]);
        assert_eq!(binary_op(rhs), BinaryOp::Mul);
        assert_eq!(binary_op(operands(rhs).0), BinaryOp::Add);
    }

    #[test]
    fn test_unary_plus_is_a_no_op() {
        let unit = parse_ok("int main() { int a; a = -+-1; bool b = !true; return a; }");
        let rhs = assigned(&body(&unit.items[0])[1]);
        let NodeKind::Unary {
            op: UnaryOp::Neg,
            operand,
        } = &rhs.kind
        else {
            panic!("expected negate, got {:?}", rhs.kind)
        };
        assert!(matches!(
            operand.kind,
            NodeKind::Unary {
                op: UnaryOp::Neg,
                ..
            }
        ));
        assert_eq!(rhs.ty.as_deref(), Some(&Type::Int));
    }

    #[test]
    fn test_chained_assignment_is_rejected() {
        let unit = parse("int main() { int a; int b; a = b = 1; return 0; }");
        assert_eq!(messages(&unit), vec!["Assignment cannot be chained"]);
        assert_eq!(body(&unit.items[0]).len(), 3);
    }

    #[test]
    fn test_assignment_inside_condition_is_rejected() {
        let unit = parse("int main() { int a; if (a = 1) a = 2; return 0; }");
        assert_eq!(messages(&unit), vec!["Assignment is only allowed as a statement"]);
    }

    #[test]
    fn test_index_suffixes_apply_to_arrays() {
        let unit = parse_ok("int g[2][3]; int main() { g[1][2] = 7; return g[0][0]; }");
        let stmt = &body(&unit.items[1])[0];
        let NodeKind::Binary { lhs, .. } = &expr_of(stmt).kind else {
            panic!("expected assignment")
        };
        let NodeKind::ArrayAccess { base, .. } = &lhs.kind else {
            panic!("expected array access, got {:?}", lhs.kind)
        };
        assert_eq!(base.ty.as_ref().map(|t| t.to_string()), Some("int[3]".to_string()));
        assert_eq!(lhs.ty.as_deref(), Some(&Type::Int));
    }

    #[test]
    fn test_indexing_a_scalar_is_rejected() {
        let unit = parse("int main() { int a; a[0] = 1; return 0; }");
        assert_eq!(messages(&unit), vec!["Subscripted value is not an array (type 'int')"]);
    }

    // ---- scopes ----

    #[test]
    fn test_inner_block_shadows_outer_variable() {
        let unit = parse_ok("int main() { int x = 1; { double x = 2.0; x = 3.0; } x = 4; return x; }");
        let items = body(&unit.items[0]);
        let NodeKind::Block(inner) = &items[1].kind else {
            panic!("expected nested block")
        };
        let NodeKind::Binary { lhs, .. } = &expr_of(&inner[1]).kind else {
            panic!("expected assignment")
        };
        let NodeKind::Var(id) = lhs.kind else {
            panic!("expected variable")
        };
        assert_eq!(unit.symbols.get(id).map(|s| s.ty.to_string()), Some("double".to_string()));
        let NodeKind::Binary { lhs, .. } = &expr_of(&items[2]).kind else {
            panic!("expected assignment")
        };
        assert_eq!(lhs.ty.as_deref(), Some(&Type::Int));
    }

    #[test]
    fn test_redefinition_in_same_block() {
        let unit = parse("int main() { int x; int x; return 0; }");
        assert_eq!(messages(&unit), vec!["Redefinition of symbol 'x' in the same scope"]);
    }

    #[test]
    fn test_parameter_and_body_share_a_scope() {
        let unit = parse("int f(int a) { int a; return a; }");
        assert_eq!(messages(&unit), vec!["Redefinition of symbol 'a' in the same scope"]);
    }

    #[test]
    fn test_declarator_is_visible_in_its_initializer() {
        parse_ok("int main() { int a = a; return a; }");
    }

    #[test]
    fn test_scopes_are_balanced_after_errors() {
        let unit = parse("int main() { { int x = ; } int y; return 0; }");
        assert_eq!(unit.errors().len(), 1);
        assert!(unit.symbols.is_global_scope());

        let unit = parse("int main() { int x;");
        assert_eq!(messages(&unit), vec!["Expected '}', found end of file"]);
        assert!(unit.symbols.is_global_scope());
    }

    // ---- declarations ----

    #[test]
    fn test_globals_and_multiple_declarators() {
        let unit = parse_ok("const int N = 10; int a = 1, b[2], c; int main() { return N; }");
        assert_eq!(unit.items.len(), 5);
        let NodeKind::VarDecl { symbol, .. } = unit.items[2].kind else {
            panic!("expected declaration")
        };
        let sym = unit.symbols.get(symbol).unwrap();
        assert!(sym.is_global);
        assert_eq!(sym.ty.to_string(), "int[2]");
        assert_eq!(unit.name_of(symbol), Some("b"));
    }

    #[test]
    fn test_nested_initializer_list() {
        let unit = parse_ok("int m[2][3] = {{1, 2, 3}, {4}}; int main() { return m[1][0]; }");
        let NodeKind::VarDecl { init: Some(init), .. } = &unit.items[0].kind else {
            panic!("expected initialized declaration")
        };
        let NodeKind::InitList(rows) = &init.kind else {
            panic!("expected initializer list")
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].ty.as_ref().map(|t| t.to_string()), Some("int[3]".to_string()));
    }

    #[test]
    fn test_declaration_errors() {
        let cases = [
            ("const int a;", "Const variable 'a' must be initialized"),
            ("void v;", "Variable 'v' cannot have type 'void'"),
            ("int a[0];", "Array size must be positive"),
            ("int a[x];", "Array size must be an integer constant"),
            ("int a = 1.0;", "Type mismatch in initializer"),
            ("int a = {1};", "Initializer list used for non-array type 'int'"),
            ("int a[2] = {1, 2, 3};", "Too many initializers for 'int[2]'"),
            ("const int f() { return 1; }", "Function 'f' cannot be declared const"),
        ];
        for (source, expected) in cases {
            let unit = parse(source);
            assert_eq!(messages(&unit), vec![expected], "source: {source}");
        }
    }

    // ---- functions ----

    #[test]
    fn test_recursive_function() {
        let unit = parse_ok("int fact(int n) { if (n <= 1) return 1; return n * fact(n - 1); }");
        let item = &unit.items[0];
        assert_eq!(item.ty.as_ref().map(|t| t.to_string()), Some("int(int)".to_string()));
        let NodeKind::Function { params, .. } = &item.kind else {
            panic!("expected function")
        };
        assert_eq!(params.len(), 1);
        assert_eq!(unit.name_of(params[0]), Some("n"));
    }

    #[test]
    fn test_unsized_array_parameter() {
        let source = "int sum(int a[], int n) { int s = 0; int i = 0; while (i < n) { s = s + a[i]; i = i + 1; } return s; }
                      int main() { int v[3] = {1, 2, 3}; return sum(v, 3); }";
        let unit = parse_ok(source);
        let NodeKind::Function { params, .. } = &unit.items[0].kind else {
            panic!("expected function")
        };
        assert_eq!(unit.symbols.get(params[0]).map(|s| s.ty.to_string()), Some("int[]".to_string()));
    }

    #[test]
    fn test_builtins_are_callable() {
        parse_ok("int main() { print_int(get_int()); print_double(get_double()); print_bool(true); return 0; }");
    }

    #[test]
    fn test_call_errors() {
        let cases = [
            ("int main() { print_int(1.0); return 0; }", "Argument 1 of 'print_int' has the wrong type"),
            ("int main() { print_int(); return 0; }", "Function 'print_int' expects 1 argument, found 0"),
            ("int main() { foo(); return 0; }", "Undeclared function 'foo'"),
            ("int main() { int x; x(); return 0; }", "'x' is not a function"),
            (
                "int f() { return 0; } int main() { int x = f; return 0; }",
                "Function 'f' cannot be used as a value",
            ),
        ];
        for (source, expected) in cases {
            let unit = parse(source);
            assert_eq!(messages(&unit), vec![expected], "source: {source}");
        }
    }

    #[test]
    fn test_return_checks() {
        let cases = [
            ("void f() { return 1; }", "Void function should not return a value"),
            ("int f() { return; }", "Non-void function must return a value"),
            ("int f() { return 1.0f; }", "Return type mismatch"),
        ];
        for (source, expected) in cases {
            let unit = parse(source);
            assert_eq!(messages(&unit), vec![expected], "source: {source}");
        }
        parse_ok("void f() { return; } double g() { return 1.5; }");
    }

    // ---- statements ----

    #[test]
    fn test_else_binds_to_nearest_if() {
        let unit = parse_ok("int main() { bool c; bool d; int a; if (c) if (d) a = 1; else a = 2; return a; }");
        let NodeKind::If {
            then_branch,
            else_branch,
            ..
        } = &body(&unit.items[0])[3].kind
        else {
            panic!("expected if")
        };
        assert!(else_branch.is_none());
        assert!(matches!(
            then_branch.kind,
            NodeKind::If {
                else_branch: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_loops_and_jumps() {
        let unit = parse_ok("int main() { while (true) { break; continue; } while (false); return 0; }");
        let items = body(&unit.items[0]);
        let NodeKind::While { body: loop_body, .. } = &items[0].kind else {
            panic!("expected while")
        };
        let NodeKind::Block(stmts) = &loop_body.kind else {
            panic!("expected block")
        };
        assert!(matches!(stmts[0].kind, NodeKind::Break));
        assert!(matches!(stmts[1].kind, NodeKind::Continue));
        assert!(matches!(items[1].kind, NodeKind::While { .. }));
    }

    #[test]
    fn test_condition_must_be_bool() {
        let unit = parse("int main() { int a = 1; if (a) a = 2; return 0; }");
        assert_eq!(messages(&unit), vec!["Condition must be of type 'bool', found 'int'"]);
    }

    // ---- semantic checks through the parser ----

    #[test]
    fn test_assignment_type_mismatch_keeps_lhs_type() {
        let unit = parse("int main() { int a; float b; a = b; return 0; }");
        assert_eq!(messages(&unit), vec!["Type mismatch in assignment"]);
        let assign = expr_of(&body(&unit.items[0])[2]);
        assert_eq!(assign.ty.as_deref(), Some(&Type::Int));
    }

    #[test]
    fn test_const_protection() {
        let unit = parse("int main() { const int a = 1; a = 2; return 0; }");
        assert_eq!(messages(&unit), vec!["Cannot assign to const variable 'a'"]);

        let unit = parse("const int c[2] = {1, 2}; int main() { c[0] = 3; return 0; }");
        assert_eq!(messages(&unit), vec!["Cannot assign to const variable 'c'"]);
    }

    // ---- recovery ----

    #[test]
    fn test_malformed_statement_between_valid_ones() {
        let unit = parse("int main() { int a = 1; a = ; a = 2; return a; }");
        assert_eq!(unit.errors().len(), 1);
        let items = body(&unit.items[0]);
        assert_eq!(items.len(), 3);
        assert!(matches!(items[0].kind, NodeKind::VarDecl { .. }));
        assert!(matches!(assigned(&items[1]).kind, NodeKind::IntLit(2)));
        assert_eq!(expr_of(&items[1]).ty.as_deref(), Some(&Type::Int));
        assert!(matches!(items[2].kind, NodeKind::Return(Some(_))));
    }

    #[test]
    fn test_one_error_per_statement() {
        let unit = parse("int main() { x = 1; y = 2; return 0; }");
        assert_eq!(messages(&unit), vec!["Undeclared variable 'x'", "Undeclared variable 'y'"]);
    }

    #[test]
    fn test_lexical_error_is_not_followed_by_a_parse_error() {
        let unit = parse("int main() { int a = 3f; return a; }");
        assert_eq!(messages(&unit), vec!["Integer literal cannot have a float suffix"]);
        assert_eq!(body(&unit.items[0]).len(), 1);
    }

    #[test]
    fn test_lexical_error_in_lookahead_after_a_statement() {
        let unit = parse("int main() { int a; a = 1; 3f; return a; }");
        assert_eq!(messages(&unit), vec!["Integer literal cannot have a float suffix"]);
        assert!(matches!(body(&unit.items[0]).last().map(|n| &n.kind), Some(NodeKind::Return(_))));
    }

    #[test]
    fn test_stray_closing_brace_at_top_level() {
        let unit = parse("int main() { return 0; } } int g;");
        assert_eq!(messages(&unit), vec!["Expected a type specifier, found '}'"]);
        assert_eq!(unit.items.len(), 2);
    }

    #[test]
    fn test_broken_initializer_list_keeps_the_function_open() {
        let unit = parse("int main() { int a = 1; int b[2] = {1, 2 +}; a = 2; return 0; }");
        assert_eq!(messages(&unit), vec!["Expected an expression, found '}'"]);
        assert_eq!(unit.items.len(), 1);
        let items = body(&unit.items[0]);
        assert_eq!(items.len(), 3);
        assert!(matches!(assigned(&items[1]).kind, NodeKind::IntLit(2)));
        assert!(matches!(items[2].kind, NodeKind::Return(Some(_))));
    }

    #[test]
    fn test_unclosed_initializer_list_stops_at_the_next_statement() {
        let unit = parse("int main() { int a = 1; int b[2] = {1, 2 + ; a = 2; return a; }");
        assert_eq!(messages(&unit), vec!["Expected an expression, found ';'"]);
        assert!(matches!(body(&unit.items[0]).last().map(|n| &n.kind), Some(NodeKind::Return(_))));
    }

    #[test]
    fn test_broken_condition_skips_its_block() {
        let unit = parse("int main() { int a = 1; if (a +) { a = 1; } a = 2; return a; }");
        assert_eq!(messages(&unit), vec!["Expected an expression, found ')'"]);
        let items = body(&unit.items[0]);
        assert_eq!(items.len(), 3);
        assert!(matches!(assigned(&items[1]).kind, NodeKind::IntLit(2)));
    }

    #[test]
    fn test_broken_signature_skips_the_function_body() {
        let unit = parse("int f(int a, ) { return a; }\nint g;");
        assert_eq!(messages(&unit), vec!["Expected a type specifier, found ')'"]);
        assert_eq!(unit.items.len(), 1);
        assert!(matches!(unit.items[0].kind, NodeKind::VarDecl { .. }));
    }

    #[test]
    fn test_item_failing_on_its_first_token_reports_once() {
        let unit = parse("int x = 1;\ninteger y = 2;\nint z = 3;");
        assert_eq!(messages(&unit), vec!["Expected a type specifier, found identifier 'integer'"]);
        assert_eq!(unit.items.len(), 2);

        let unit = parse("int x = 1;\nreturn x;\nint z = 3;");
        assert_eq!(messages(&unit), vec!["Expected a type specifier, found keyword 'return'"]);
        assert_eq!(unit.items.len(), 2);
    }

    #[test]
    fn test_deep_expression_nesting_is_reported() {
        let limit = format!("Nesting is too deep (limit is {} levels)", MAX_NESTING);
        let sources = [
            format!("int main() {{ int a = {}1{}; return a; }}", "(".repeat(10_000), ")".repeat(10_000)),
            format!("int main() {{ int a = {}1; return a; }}", "-".repeat(10_000)),
            format!("int main() {{ int a[1]; a[{}0{}] = 1; return 0; }}", "a[".repeat(5_000), "]".repeat(5_000)),
        ];
        for source in &sources {
            let unit = parse(source);
            assert_eq!(messages(&unit), vec![limit.as_str()]);
            assert!(matches!(body(&unit.items[0]).last().map(|n| &n.kind), Some(NodeKind::Return(_))));
        }
    }

    #[test]
    fn test_deep_block_and_initializer_nesting_is_reported() {
        let limit = format!("Nesting is too deep (limit is {} levels)", MAX_NESTING);

        let unit = parse(&format!("int main() {{ {}{} return 0; }}", "{".repeat(5_000), "}".repeat(5_000)));
        assert_eq!(messages(&unit), vec![limit.as_str()]);
        assert!(unit.symbols.is_global_scope());
        assert!(matches!(body(&unit.items[0]).last().map(|n| &n.kind), Some(NodeKind::Return(_))));

        let unit = parse(&format!("int g[1] = {}1{};\nint main() {{ return 0; }}", "{".repeat(1_000), "}".repeat(1_000)));
        assert_eq!(messages(&unit), vec![limit.as_str()]);
        assert_eq!(unit.items.len(), 1);
    }

    #[test]
    fn test_nesting_below_the_limit_is_accepted() {
        let depth = MAX_NESTING / 2;
        parse_ok(&format!("int main() {{ int a = {}1{}; return a; }}", "(".repeat(depth), ")".repeat(depth)));
    }

    #[test]
    fn test_missing_semicolon() {
        let unit = parse("int main() { int a; a = 1 return a; }");
        assert_eq!(messages(&unit), vec!["Expected ';', found keyword 'return'"]);
        assert!(matches!(body(&unit.items[0]).last().map(|n| &n.kind), Some(NodeKind::Return(_))));
    }
}
