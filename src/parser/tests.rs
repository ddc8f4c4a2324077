//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the various language
//! constructs including:
//! - Val/mem declarations and bindings
//! - Operator precedence and tuple assembly
//! - Function, type, and table declarations
//! - Error recovery across statement boundaries

use crate::ast::expressions::Exp;
use crate::ast::statements::{FunctionAttr, NamedId, Stmt};
use crate::lexer::lexer::Lexer;
use crate::lexer::tokens::TokenKind;

use super::lookups::create_token_lookups;
use super::parser::{
    parse_all, parse_dump_exp, parse_dump_stmt_list, parse_exp, parse_stmt, parse_stmt_list,
    parse_string, Parser,
};

fn parser_for(source: &str) -> Parser {
    let mut parser = Parser::new(Lexer::new(source.to_string(), None));
    create_token_lookups(&mut parser);
    parser
}

/// Parses a source expected to contain exactly one statement and
/// unwraps it from its statement-list block.
fn parse_one(source: &str) -> Stmt {
    let results = parse_string(source);
    let stmts = results.outcome.expect("expected a successful parse");
    assert_eq!(stmts.len(), 1, "expected a single top-level block");
    match stmts.into_iter().next().unwrap() {
        Stmt::Block { mut stmts, .. } => {
            assert_eq!(stmts.len(), 1, "expected a single statement");
            stmts.remove(0)
        }
        other => other,
    }
}

fn id_named(exp: &Exp, name: &str) -> bool {
    matches!(exp, Exp::Id { id, .. } if id.len() == 1 && id[0] == name)
}

// -- Declarations and bindings --

#[test]
fn test_parse_val_declaration() {
    match parse_one("val x = 42;") {
        Stmt::Val { lhs, rhs, .. } => {
            assert!(id_named(&lhs, "x"));
            assert!(matches!(rhs, Some(Exp::Int { value: 42, .. })));
        }
        other => panic!("expected a val declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_val_without_rhs() {
    match parse_one("val x : real;") {
        Stmt::Val { lhs, rhs, .. } => {
            assert!(rhs.is_none());
            match lhs {
                Exp::Id { id, ty, .. } => {
                    assert_eq!(id, vec!["x".to_string()]);
                    assert!(matches!(ty.as_deref(), Some(Exp::Id { .. })));
                }
                other => panic!("expected a typed identifier, got {:?}", other),
            }
        }
        other => panic!("expected a val declaration, got {:?}", other),
    }
}

#[test]
fn test_type_annotation_stays_on_identifier() {
    // `val x : real = 0.0;` annotates the identifier; the annotation
    // must not swallow the assignment
    match parse_one("val x : real = 0.0;") {
        Stmt::Val { lhs, rhs, .. } => {
            match lhs {
                Exp::Id { id, ty, .. } => {
                    assert_eq!(id, vec!["x".to_string()]);
                    assert!(id_named(ty.as_deref().expect("expected an annotation"), "real"));
                }
                other => panic!("expected a typed identifier, got {:?}", other),
            }
            assert!(matches!(rhs, Some(Exp::Real { value, .. }) if value == 0.0));
        }
        other => panic!("expected a val declaration, got {:?}", other),
    }
}

#[test]
fn test_val_tuple_declaration() {
    match parse_one("val a,b = 1,2;") {
        Stmt::Val { lhs, rhs, .. } => {
            match lhs {
                Exp::Tuple { elems, .. } => {
                    assert_eq!(elems.len(), 2);
                    assert!(id_named(&elems[0], "a"));
                    assert!(id_named(&elems[1], "b"));
                }
                other => panic!("expected a tuple lhs, got {:?}", other),
            }
            match rhs {
                Some(Exp::Tuple { elems, .. }) => {
                    assert!(matches!(elems[0], Exp::Int { value: 1, .. }));
                    assert!(matches!(elems[1], Exp::Int { value: 2, .. }));
                }
                other => panic!("expected a tuple rhs, got {:?}", other),
            }
        }
        other => panic!("expected a val declaration, got {:?}", other),
    }
}

#[test]
fn test_mem_with_initializer() {
    match parse_one("mem x @ 0.0 = 1.0;") {
        Stmt::Mem { lhs, init, rhs, .. } => {
            assert!(id_named(&lhs, "x"));
            assert!(matches!(init, Some(Exp::Real { value, .. }) if value == 0.0));
            assert!(matches!(rhs, Some(Exp::Real { value, .. }) if value == 1.0));
        }
        other => panic!("expected a mem declaration, got {:?}", other),
    }
}

#[test]
fn test_mem_plain() {
    match parse_one("mem x;") {
        Stmt::Mem { lhs, init, rhs, .. } => {
            assert!(id_named(&lhs, "x"));
            assert!(init.is_none());
            assert!(rhs.is_none());
        }
        other => panic!("expected a mem declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_return_statement() {
    match parse_one("return 42;") {
        Stmt::Return { exp, .. } => assert!(matches!(exp, Exp::Int { value: 42, .. })),
        other => panic!("expected a return statement, got {:?}", other),
    }
}

#[test]
fn test_bind_statement() {
    match parse_one("x = 1;") {
        Stmt::Bind { lhs, rhs, .. } => {
            assert!(id_named(&lhs, "x"));
            assert!(matches!(rhs, Exp::Int { value: 1, .. }));
        }
        other => panic!("expected a binding, got {:?}", other),
    }
}

#[test]
fn test_expression_statement_binds_to_unit() {
    match parse_one("foo();") {
        Stmt::Bind { lhs, rhs, .. } => {
            assert!(matches!(lhs, Exp::Unit { .. }));
            assert!(matches!(rhs, Exp::Call { .. }));
        }
        other => panic!("expected a discarded call, got {:?}", other),
    }
}

#[test]
fn test_bind_without_equal_reports_lhs() {
    let error = parse_stmt("x 1;").expect_err("expected a parse error");
    assert!(error
        .message()
        .contains("while trying to parse a binding (x)"));
}

// -- Control flow --

#[test]
fn test_if_statement_with_else() {
    match parse_one("if (x>0) { y = 1; } else y = 2;") {
        Stmt::If {
            cond,
            then_stmt,
            else_stmt,
            ..
        } => {
            assert!(matches!(cond, Exp::BinOp { ref op, .. } if op == ">"));
            match *then_stmt {
                Stmt::Block { ref stmts, .. } => {
                    assert_eq!(stmts.len(), 1);
                    assert!(matches!(stmts[0], Stmt::Bind { .. }));
                }
                ref other => panic!("expected a block, got {:?}", other),
            }
            match else_stmt.expect("expected an else branch").as_ref() {
                Stmt::Block { stmts, .. } => {
                    assert_eq!(stmts.len(), 1);
                    assert!(matches!(stmts[0], Stmt::Bind { .. }));
                }
                other => panic!("expected a block, got {:?}", other),
            }
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_if_with_single_statement_body() {
    match parse_one("if (x) return y;") {
        Stmt::If {
            then_stmt,
            else_stmt,
            ..
        } => {
            assert!(else_stmt.is_none());
            match *then_stmt {
                Stmt::Block { ref stmts, .. } => {
                    assert!(matches!(stmts[0], Stmt::Return { .. }))
                }
                ref other => panic!("expected a block, got {:?}", other),
            }
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_while_statement() {
    match parse_one("while (x < 10) { x = x + 1; }") {
        Stmt::While { cond, body, .. } => {
            assert!(matches!(cond, Exp::BinOp { ref op, .. } if op == "<"));
            assert!(matches!(*body, Stmt::Block { .. }));
        }
        other => panic!("expected a while statement, got {:?}", other),
    }
}

// -- Functions --

#[test]
fn test_function_declaration() {
    match parse_one("fun add(x:real, y:real) : real { return x + y; }") {
        Stmt::Fun {
            id,
            params,
            body,
            ret,
            attrs,
            ..
        } => {
            assert_eq!(id, vec!["add".to_string()]);
            assert_eq!(params.len(), 2);
            assert!(matches!(params[0], NamedId::Typed { .. }));
            assert!(id_named(ret.as_ref().expect("expected a return type"), "real"));
            assert!(attrs.is_empty());
            match *body {
                Stmt::Block { ref stmts, .. } => {
                    assert_eq!(stmts.len(), 1);
                    assert!(matches!(stmts[0], Stmt::Return { .. }));
                }
                ref other => panic!("expected a block body, got {:?}", other),
            }
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_join_function_attribute() {
    match parse_one("and foo() { }") {
        Stmt::Fun { attrs, .. } => assert_eq!(attrs, vec![FunctionAttr::JoinFunction]),
        other => panic!("expected a function, got {:?}", other),
    }

    match parse_one("fun foo() { }") {
        Stmt::Fun { attrs, .. } => assert!(attrs.is_empty()),
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_function_with_untyped_params() {
    match parse_one("fun f(a, b) { return a; }") {
        Stmt::Fun { params, ret, .. } => {
            assert_eq!(params.len(), 2);
            assert!(matches!(params[0], NamedId::Simple { .. }));
            assert!(ret.is_none());
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

// -- Types and tables --

#[test]
fn test_type_declaration() {
    match parse_one("type V(n:int) { val x : real; val y : real; }") {
        Stmt::Type {
            id, params, decls, ..
        } => {
            assert_eq!(id, vec!["V".to_string()]);
            assert_eq!(params.len(), 1);
            assert!(matches!(params[0], NamedId::Typed { .. }));
            assert_eq!(decls.len(), 2);
            assert_eq!(decls[0].id, vec!["x".to_string()]);
            assert!(id_named(&decls[0].ty, "real"));
            assert_eq!(decls[1].id, vec!["y".to_string()]);
        }
        other => panic!("expected a type declaration, got {:?}", other),
    }
}

#[test]
fn test_empty_type_declaration() {
    match parse_one("type V { }") {
        Stmt::Type { decls, params, .. } => {
            assert!(decls.is_empty());
            assert!(params.is_empty());
        }
        other => panic!("expected a type declaration, got {:?}", other),
    }
}

#[test]
fn test_alias_type_declaration() {
    match parse_one("type T : int;") {
        Stmt::AliasType { id, alias, .. } => {
            assert_eq!(id, vec!["T".to_string()]);
            assert!(id_named(&alias, "int"));
        }
        other => panic!("expected an alias type, got {:?}", other),
    }
}

#[test]
fn test_type_declaration_error_names_both_alternatives() {
    let error = parse_stmt("type T = 1;").expect_err("expected a parse error");
    assert_eq!(
        error.message(),
        "Expecting a ':' or a '{' while trying to parse a type declaration but got '='"
    );
}

#[test]
fn test_table_statement() {
    match parse_one("table t = [| 1.0, 2.0, 3.0 |];") {
        Stmt::Table { id, elems, .. } => {
            assert_eq!(id, vec!["t".to_string()]);
            assert_eq!(elems.len(), 3);
            assert!(matches!(elems[0], Exp::Real { value, .. } if value == 1.0));
            assert!(matches!(elems[2], Exp::Real { value, .. } if value == 3.0));
        }
        other => panic!("expected a table, got {:?}", other),
    }
}

// -- Expressions --

#[test]
fn test_sum_of_product() {
    match parse_exp("a + b * c").unwrap() {
        Exp::BinOp {
            op, left, right, ..
        } => {
            assert_eq!(op, "+");
            assert!(id_named(&left, "a"));
            assert!(matches!(*right, Exp::BinOp { ref op, .. } if op == "*"));
        }
        other => panic!("expected a sum, got {:?}", other),
    }
}

#[test]
fn test_product_then_sum() {
    match parse_exp("a * b + c").unwrap() {
        Exp::BinOp {
            op, left, right, ..
        } => {
            assert_eq!(op, "+");
            assert!(matches!(*left, Exp::BinOp { ref op, .. } if op == "*"));
            assert!(id_named(&right, "c"));
        }
        other => panic!("expected a sum, got {:?}", other),
    }
}

#[test]
fn test_unary_minus_binds_tighter_than_product() {
    match parse_exp("-a * b").unwrap() {
        Exp::BinOp {
            op, left, right, ..
        } => {
            assert_eq!(op, "*");
            assert!(matches!(*left, Exp::UnOp { ref op, .. } if op == "-"));
            assert!(id_named(&right, "b"));
        }
        other => panic!("expected a product, got {:?}", other),
    }
}

#[test]
fn test_comparison_binds_tighter_than_logical() {
    match parse_exp("a == b && c == d").unwrap() {
        Exp::BinOp {
            op, left, right, ..
        } => {
            assert_eq!(op, "&&");
            assert!(matches!(*left, Exp::BinOp { ref op, .. } if op == "=="));
            assert!(matches!(*right, Exp::BinOp { ref op, .. } if op == "=="));
        }
        other => panic!("expected a conjunction, got {:?}", other),
    }
}

#[test]
fn test_binary_operators_associate_left() {
    match parse_exp("a - b - c").unwrap() {
        Exp::BinOp { left, right, .. } => {
            assert!(matches!(*left, Exp::BinOp { .. }));
            assert!(id_named(&right, "c"));
        }
        other => panic!("expected a difference, got {:?}", other),
    }
}

#[test]
fn test_tuple_flattening() {
    match parse_exp("a, b, c").unwrap() {
        Exp::Tuple { elems, loc } => {
            assert_eq!(elems.len(), 3);
            for elem in &elems {
                assert!(!matches!(elem, Exp::Tuple { .. }), "tuples must not nest");
            }
            // The tuple keeps the location of its first element
            assert_eq!(loc.start.col, 1);
            assert_eq!(loc.end.col, 2);
        }
        other => panic!("expected a tuple, got {:?}", other),
    }
}

#[test]
fn test_grouped_tuple_is_not_flattened() {
    match parse_exp("(a, b), c").unwrap() {
        Exp::Tuple { elems, .. } => {
            assert_eq!(elems.len(), 2);
            assert!(matches!(elems[0], Exp::Group { .. }));
            assert!(id_named(&elems[1], "c"));
        }
        other => panic!("expected a tuple, got {:?}", other),
    }
}

#[test]
fn test_call_vs_identifier() {
    match parse_exp("f(1, 2)").unwrap() {
        Exp::Call {
            instance,
            id,
            args,
            attrs,
            ..
        } => {
            assert!(instance.is_none());
            assert_eq!(id, vec!["f".to_string()]);
            assert_eq!(args.len(), 2);
            assert!(matches!(args[0], Exp::Int { value: 1, .. }));
            assert!(attrs.is_empty());
        }
        other => panic!("expected a call, got {:?}", other),
    }

    assert!(matches!(
        parse_exp("f").unwrap(),
        Exp::Id { ty: None, .. }
    ));

    match parse_exp("f()").unwrap() {
        Exp::Call { args, .. } => assert!(args.is_empty()),
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_call_arguments_are_not_a_tuple() {
    match parse_exp("f(a, b)").unwrap() {
        Exp::Call { args, .. } => {
            assert_eq!(args.len(), 2);
            assert!(!matches!(args[0], Exp::Tuple { .. }));
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_dotted_identifier_segments() {
    match parse_exp("a.b.c").unwrap() {
        Exp::Id { id, .. } => assert_eq!(
            id,
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        ),
        other => panic!("expected an identifier, got {:?}", other),
    }
}

#[test]
fn test_unit_and_group() {
    assert!(matches!(parse_exp("()").unwrap(), Exp::Unit { .. }));

    match parse_exp("(1)").unwrap() {
        Exp::Group { exp, .. } => assert!(matches!(*exp, Exp::Int { value: 1, .. })),
        other => panic!("expected a group, got {:?}", other),
    }
}

#[test]
fn test_if_expression() {
    match parse_exp("if a then 1 else 2").unwrap() {
        Exp::If {
            cond,
            then_exp,
            else_exp,
            ..
        } => {
            assert!(id_named(&cond, "a"));
            assert!(matches!(*then_exp, Exp::Int { value: 1, .. }));
            assert!(matches!(*else_exp, Exp::Int { value: 2, .. }));
        }
        other => panic!("expected an if expression, got {:?}", other),
    }
}

#[test]
fn test_typed_expression_on_non_identifier() {
    match parse_exp("(a) : int").unwrap() {
        Exp::Typed { exp, ty, .. } => {
            assert!(matches!(*exp, Exp::Group { .. }));
            assert!(id_named(&ty, "int"));
        }
        other => panic!("expected an ascription, got {:?}", other),
    }
}

#[test]
fn test_ascription_does_not_swallow_comma() {
    match parse_exp("a:int, b:int").unwrap() {
        Exp::Tuple { elems, .. } => {
            assert_eq!(elems.len(), 2);
            assert!(matches!(elems[0], Exp::Id { ty: Some(_), .. }));
            assert!(matches!(elems[1], Exp::Id { ty: Some(_), .. }));
        }
        other => panic!("expected a tuple, got {:?}", other),
    }
}

#[test]
fn test_seq_expression() {
    match parse_exp("{| val x = 1; x; |}").unwrap() {
        Exp::Seq {
            instance, stmts, ..
        } => {
            assert!(instance.is_none());
            assert_eq!(stmts.len(), 2);
            assert!(matches!(stmts[0], Stmt::Val { .. }));
            assert!(matches!(stmts[1], Stmt::Bind { .. }));
        }
        other => panic!("expected a sequence, got {:?}", other),
    }
}

#[test]
fn test_unclosed_seq_reports_missing_delimiter() {
    let error = parse_exp("{| val x = 1;").expect_err("expected a parse error");
    assert_eq!(error.message(), "Expecting a '|}' but the file ended");
}

#[test]
fn test_nud_error_message() {
    let error = parse_exp("*").expect_err("expected a parse error");
    assert_eq!(error.message(), "Not expecting to find '*'");
}

// -- Token stream --

#[test]
fn test_stream_starts_with_prev_equal_to_peeked() {
    let parser = parser_for("val x;");
    assert_eq!(parser.peek_kind(), TokenKind::Val);
    assert_eq!(parser.prev().kind, TokenKind::Val);
}

#[test]
fn test_stream_advance_moves_prev() {
    let mut parser = parser_for("val x;");
    let consumed = parser.advance();
    assert_eq!(consumed.kind, TokenKind::Val);
    assert_eq!(parser.prev().kind, TokenKind::Val);
    assert_eq!(parser.peek_kind(), TokenKind::Id);
}

#[test]
fn test_stream_is_sticky_at_eof() {
    let mut parser = parser_for("x");
    parser.advance();
    assert_eq!(parser.peek_kind(), TokenKind::Eof);
    parser.advance();
    parser.advance();
    assert_eq!(parser.peek_kind(), TokenKind::Eof);
}

#[test]
fn test_consume_mismatch_message() {
    let error = parse_stmt("val x = 1 val").expect_err("expected a parse error");
    assert_eq!(error.message(), "Expecting a ';' but got 'val'");
}

#[test]
fn test_consume_at_eof_message() {
    let error = parse_stmt("val x = 1").expect_err("expected a parse error");
    assert_eq!(error.message(), "Expecting a ';' but the file ended");
}

#[test]
fn test_opt_consume() {
    let mut parser = parser_for("; x");
    assert!(parser.opt_consume(TokenKind::Semi));
    assert!(!parser.opt_consume(TokenKind::Semi));
    assert_eq!(parser.peek_kind(), TokenKind::Id);
}

// -- Error recovery --

#[test]
fn test_recovery_keeps_parsing_after_bad_statement() {
    let mut parser = parser_for("val x = ; val y = 1;");
    let stmts = parse_all(&mut parser);
    let (errors, _, _) = parser.finish();

    assert_eq!(errors.len(), 1);

    let empties = stmts.iter().filter(|s| matches!(s, Stmt::Empty)).count();
    assert_eq!(empties, 1);

    let vals: Vec<&Stmt> = stmts
        .iter()
        .filter_map(|s| match s {
            Stmt::Block { stmts, .. } => Some(stmts),
            _ => None,
        })
        .flatten()
        .filter(|s| matches!(s, Stmt::Val { .. }))
        .collect();
    assert_eq!(vals.len(), 1);
}

#[test]
fn test_recovery_synchronizes_on_semicolons() {
    let results = parse_string("val x = ;;;;; val y = 1;");
    let errors = results.outcome.expect_err("expected an error outcome");
    assert!(!errors.is_empty());
    for error in &errors {
        assert!(error.loc().is_some());
    }
}

#[test]
fn test_recovery_inside_block() {
    // The bad statement is replaced inside the block; the enclosing
    // function still parses
    let mut parser = parser_for("fun f() { val x = ; return 1; }");
    let stmts = parse_all(&mut parser);
    let (errors, _, _) = parser.finish();

    assert_eq!(errors.len(), 1);
    match &stmts[0] {
        Stmt::Block { stmts, .. } => match &stmts[0] {
            Stmt::Fun { body, .. } => match body.as_ref() {
                Stmt::Block { stmts, .. } => {
                    assert!(matches!(stmts[0], Stmt::Empty));
                    assert!(matches!(stmts[1], Stmt::Return { .. }));
                }
                other => panic!("expected a block body, got {:?}", other),
            },
            other => panic!("expected a function, got {:?}", other),
        },
        other => panic!("expected a block, got {:?}", other),
    }
}

#[test]
fn test_unclosed_block_reports_missing_brace() {
    let results = parse_string("fun f() { val x = 1;");
    let errors = results.outcome.expect_err("expected an error outcome");
    assert_eq!(errors[0].message(), "Expecting a '}' but the file ended");
}

#[test]
fn test_errors_are_reported_in_source_order() {
    let results = parse_string("val a = ; val b = ; val c = 1;");
    let errors = results.outcome.expect_err("expected an error outcome");
    assert_eq!(errors.len(), 2);
    let first = errors[0].loc().unwrap().start;
    let second = errors[1].loc().unwrap().start;
    assert!(first <= second);
}

#[test]
fn test_unrecognised_character_is_recovered() {
    let results = parse_string("val x = 1 $;");
    let errors = results.outcome.expect_err("expected an error outcome");
    assert!(errors
        .iter()
        .any(|e| e.message().contains("unrecognised token")));
}

// -- Location coverage --

fn check_exp_locations(exp: &Exp) {
    if !matches!(exp, Exp::Empty) {
        let loc = exp.loc();
        assert!(!loc.file.is_empty(), "location without a file: {:?}", exp);
        assert!(loc.start <= loc.end, "inverted span: {:?}", exp);
    }

    match exp {
        Exp::Id { ty: Some(ty), .. } => check_exp_locations(ty),
        Exp::UnOp { exp, .. } | Exp::Group { exp, .. } => check_exp_locations(exp),
        Exp::BinOp { left, right, .. } => {
            check_exp_locations(left);
            check_exp_locations(right);
        }
        Exp::Call { args, .. } => args.iter().for_each(check_exp_locations),
        Exp::If {
            cond,
            then_exp,
            else_exp,
            ..
        } => {
            check_exp_locations(cond);
            check_exp_locations(then_exp);
            check_exp_locations(else_exp);
        }
        Exp::Tuple { elems, .. } => elems.iter().for_each(check_exp_locations),
        Exp::Seq { stmts, .. } => stmts.iter().for_each(check_stmt_locations),
        Exp::Typed { exp, ty, .. } => {
            check_exp_locations(exp);
            check_exp_locations(ty);
        }
        _ => {}
    }
}

fn check_stmt_locations(stmt: &Stmt) {
    if !matches!(stmt, Stmt::Empty) {
        let loc = stmt.loc();
        assert!(!loc.file.is_empty(), "location without a file: {:?}", stmt);
        assert!(loc.start <= loc.end, "inverted span: {:?}", stmt);
    }

    match stmt {
        Stmt::Val { lhs, rhs, .. } => {
            check_exp_locations(lhs);
            if let Some(rhs) = rhs {
                check_exp_locations(rhs);
            }
        }
        Stmt::Mem { lhs, init, rhs, .. } => {
            check_exp_locations(lhs);
            if let Some(init) = init {
                check_exp_locations(init);
            }
            if let Some(rhs) = rhs {
                check_exp_locations(rhs);
            }
        }
        Stmt::Table { elems, .. } => elems.iter().for_each(check_exp_locations),
        Stmt::Return { exp, .. } => check_exp_locations(exp),
        Stmt::Bind { lhs, rhs, .. } => {
            check_exp_locations(lhs);
            check_exp_locations(rhs);
        }
        Stmt::If {
            cond,
            then_stmt,
            else_stmt,
            ..
        } => {
            check_exp_locations(cond);
            check_stmt_locations(then_stmt);
            if let Some(else_stmt) = else_stmt {
                check_stmt_locations(else_stmt);
            }
        }
        Stmt::Fun { body, ret, .. } => {
            check_stmt_locations(body);
            if let Some(ret) = ret {
                check_exp_locations(ret);
            }
        }
        Stmt::While { cond, body, .. } => {
            check_exp_locations(cond);
            check_stmt_locations(body);
        }
        Stmt::Type { decls, .. } => {
            for decl in decls {
                assert!(!decl.loc.file.is_empty());
                check_exp_locations(&decl.ty);
            }
        }
        Stmt::AliasType { alias, .. } => check_exp_locations(alias),
        Stmt::Block { stmts, .. } => stmts.iter().for_each(check_stmt_locations),
        Stmt::Empty => {}
    }
}

#[test]
fn test_every_node_carries_a_location() {
    let source = "\
fun dsp(input:real) : real {
   mem y @ 0.0;
   val g = if input > 0.5 then 1.0 else 0.0;
   y = y + g * input;
   return y;
}
and reset() {
   val a,b = 1,2;
   osc.phase = -a * b;
}
type State { val y : real; }
table gain = [| 0.0, 0.5, 1.0 |];
";
    let results = parse_string(source);
    let stmts = results.outcome.expect("expected a successful parse");
    stmts.iter().for_each(check_stmt_locations);
}

// -- Dump helpers --

#[test]
fn test_dump_expression() {
    assert_eq!(parse_dump_exp("a + b * c").unwrap(), "(a + (b * c))");
}

#[test]
fn test_dump_statement_list() {
    assert_eq!(
        parse_dump_stmt_list("val x = 1;").unwrap(),
        "{ val x = 1; }"
    );
}

// -- Entry points --

#[test]
fn test_parse_exp_rejects_trailing_input() {
    let error = parse_exp("1 + 2 val").expect_err("expected a parse error");
    assert_eq!(error.message(), "Expecting a end of file but got 'val'");
}

#[test]
fn test_parse_stmt_rejects_trailing_input() {
    let error = parse_stmt("val x = 1; garbage").expect_err("expected a parse error");
    assert_eq!(error.message(), "Expecting a end of file but got 'garbage'");
}

#[test]
fn test_parse_stmt_list_rejects_trailing_input() {
    let error = parse_stmt_list("{ val x = 1; } garbage").expect_err("expected a parse error");
    assert_eq!(error.message(), "Expecting a end of file but got 'garbage'");
}

#[test]
fn test_parse_stmt_list_accepts_blocks() {
    match parse_stmt_list("{ val x = 1; val y = 2; }").unwrap() {
        Stmt::Block { stmts, .. } => assert_eq!(stmts.len(), 2),
        other => panic!("expected a block, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_program() {
    let results = parse_string("");
    assert!(matches!(results.outcome, Ok(stmts) if stmts.is_empty()));
}

#[test]
fn test_results_carry_lines_and_file() {
    let results = parse_string("val x = 1;\nval y = 2;");
    assert_eq!(*results.file, "live.vult");
    assert_eq!(results.lines.line(2), Some("val y = 2;"));
}
