//! Property-based tests for the printer.
//!
//! Random fully-parenthesized expressions are parsed, printed, and parsed
//! again. The two trees must agree, and printing must be idempotent: the
//! printer may drop parentheses only where precedence makes them redundant.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use tc_fmt::{print_program, PrintOptions};
use tc_ir::{Ast, ExprId, ExprKind, Program, StmtKind, StringInterner};
use tc_parse::{parse, ParseOptions};

// Strategies

fn ident() -> impl Strategy<Value = String> {
    // One letter plus digits never collides with a keyword.
    prop::string::string_regex("[a-z][0-9]{0,2}").expect("valid regex")
}

fn number() -> impl Strategy<Value = String> {
    (0u32..10_000).prop_map(|n| n.to_string())
}

fn binary_op() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "**", "*", "/", "%", "+", "-", "<<", ">>", ">>>", "<", ">", "<=", ">=", "instanceof",
        "in", "==", "!=", "===", "!==", "&", "^", "|", "&&", "||", "??",
    ])
}

fn unary_op() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["-", "+", "!", "~", "typeof ", "void "])
}

fn assign_op() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["=", "+=", "-=", "**=", "||=", "??="])
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![ident(), number()];
    leaf.prop_recursive(5, 48, 3, |inner| {
        prop_oneof![
            (unary_op(), inner.clone()).prop_map(|(op, e)| format!("({op}{e})")),
            (inner.clone(), binary_op(), inner.clone())
                .prop_map(|(l, op, r)| format!("({l} {op} {r})")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(t, c, a)| format!("({t} ? {c} : {a})")),
            (ident(), assign_op(), inner.clone()).prop_map(|(n, op, v)| format!("({n} {op} {v})")),
            (inner.clone(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(f, args)| format!("({f})({})", args.join(", "))),
            (inner, ident()).prop_map(|(o, p)| format!("({o}).{p}")),
        ]
    })
}

// Helpers

struct Parsed {
    program: Program,
    ast: Ast,
}

fn parse_source(source: &str, interner: &StringInterner) -> Parsed {
    let lexed = tc_lexer::lex(source, interner);
    assert!(lexed.errors.is_empty(), "lex errors in {source:?}: {:?}", lexed.errors);
    let output = parse(&lexed.tokens, interner, &ParseOptions::default());
    assert!(
        output.errors.is_empty(),
        "parse errors in {source:?}: {:?}",
        output.errors
    );
    Parsed {
        program: output.program,
        ast: output.ast,
    }
}

fn print(parsed: &Parsed, interner: &StringInterner) -> String {
    print_program(&parsed.program, &parsed.ast, interner, &PrintOptions::default())
}

/// S-expression of the single expression statement, spans ignored.
fn dump(parsed: &Parsed, interner: &StringInterner) -> String {
    let stmts = parsed.ast.stmt_list(parsed.program.body);
    assert_eq!(stmts.len(), 1);
    let StmtKind::Expr(expr) = parsed.ast.stmt(stmts[0]).kind else {
        panic!("expected an expression statement");
    };
    let mut out = String::new();
    dump_expr(&parsed.ast, interner, expr, &mut out);
    out
}

fn dump_expr(ast: &Ast, interner: &StringInterner, id: ExprId, out: &mut String) {
    match ast.expr(id).kind {
        ExprKind::Ident(name) => out.push_str(interner.lookup(name)),
        ExprKind::Number(bits) => out.push_str(&f64::from_bits(bits).to_string()),
        ExprKind::Unary { op, operand } => {
            out.push('(');
            out.push_str(op.as_symbol());
            out.push(' ');
            dump_expr(ast, interner, operand, out);
            out.push(')');
        }
        ExprKind::Binary { op, left, right } => {
            out.push('(');
            out.push_str(op.as_symbol());
            out.push(' ');
            dump_expr(ast, interner, left, out);
            out.push(' ');
            dump_expr(ast, interner, right, out);
            out.push(')');
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            out.push_str("(? ");
            dump_expr(ast, interner, test, out);
            out.push(' ');
            dump_expr(ast, interner, consequent, out);
            out.push(' ');
            dump_expr(ast, interner, alternate, out);
            out.push(')');
        }
        ExprKind::Assign { op, target, value } => {
            out.push('(');
            out.push_str(op.as_symbol());
            out.push(' ');
            dump_expr(ast, interner, target, out);
            out.push(' ');
            dump_expr(ast, interner, value, out);
            out.push(')');
        }
        ExprKind::Call { callee, args } => {
            out.push_str("(call ");
            dump_expr(ast, interner, callee, out);
            for &arg in ast.expr_list(args) {
                out.push(' ');
                dump_expr(ast, interner, arg, out);
            }
            out.push(')');
        }
        ExprKind::Member { object, property } => {
            out.push_str("(. ");
            dump_expr(ast, interner, object, out);
            out.push(' ');
            out.push_str(interner.lookup(property));
            out.push(')');
        }
        other => panic!("generator never produces {other:?}"),
    }
}

// Properties

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn printed_expression_parses_to_same_tree(source in expression()) {
        let interner = StringInterner::new();
        let source = format!("{source};");
        let original = parse_source(&source, &interner);
        let printed = print(&original, &interner);
        let reparsed = parse_source(&printed, &interner);

        prop_assert_eq!(dump(&original, &interner), dump(&reparsed, &interner));
    }

    #[test]
    fn printing_is_idempotent(source in expression()) {
        let interner = StringInterner::new();
        let source = format!("{source};");
        let once = print(&parse_source(&source, &interner), &interner);
        let twice = print(&parse_source(&once, &interner), &interner);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn try_statements_reprint_stably(
        params in prop::collection::vec((ident(), prop::option::of(ident())), 0..4),
        default in prop::option::of(prop::option::of(ident())),
        finally in any::<bool>(),
    ) {
        // Need at least one handler or a finalizer.
        prop_assume!(!params.is_empty() || default.is_some() || finally);

        let mut source = String::from("try { f(); }");
        for (param, specifier) in &params {
            match specifier {
                Some(spec) => source.push_str(&format!(" catch ({param}: errors.{spec}) {{ g({param}); }}")),
                None => source.push_str(&format!(" catch ({param}: Error) {{}}")),
            }
        }
        match &default {
            Some(Some(param)) => source.push_str(&format!(" catch ({param}) {{ h(); }}")),
            Some(None) => source.push_str(" catch { h(); }"),
            None => {}
        }
        if finally {
            source.push_str(" finally { done(); }");
        }

        let interner = StringInterner::new();
        let once = print(&parse_source(&source, &interner), &interner);
        let twice = print(&parse_source(&once, &interner), &interner);
        prop_assert_eq!(once, twice);
    }
}
