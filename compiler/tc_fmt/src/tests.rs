use pretty_assertions::assert_eq;
use tc_ir::{Ast, Expr, ExprId, ExprKind, Program, Span, Stmt, StmtId, StmtKind, StringInterner};
use tc_parse::{parse, ParseOptions};

use crate::{print_expr, print_program, PrintOptions};

fn reprint_with(source: &str, options: &PrintOptions) -> String {
    let interner = StringInterner::new();
    let lexed = tc_lexer::lex(source, &interner);
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    let output = parse(&lexed.tokens, &interner, &ParseOptions::default());
    assert!(output.errors.is_empty(), "parse errors: {:?}", output.errors);
    print_program(&output.program, &output.ast, &interner, options)
}

fn reprint(source: &str) -> String {
    reprint_with(source, &PrintOptions::default())
}

#[test]
fn test_try_with_typed_and_default_catches() {
    assert_eq!(
        reprint("try { f() } catch (e: TypeError) { a() } catch { b() } finally { c() }"),
        "\
try {
    f();
} catch (e: TypeError) {
    a();
} catch {
    b();
} finally {
    c();
}
"
    );
}

#[test]
fn test_specifier_forms() {
    assert_eq!(
        reprint("try {} catch (e: errors.NotFound) {} catch (e: new Registry().Kind) {} catch (err) {}"),
        "try {} catch (e: errors.NotFound) {} catch (e: new Registry().Kind) {} catch (err) {}\n"
    );
}

#[test]
fn test_indent_width() {
    assert_eq!(
        reprint_with(
            "function f(a, b) { if (a) { return b; } }",
            &PrintOptions { indent_width: 2 }
        ),
        "\
function f(a, b) {
  if (a) {
    return b;
  }
}
"
    );
}

#[test]
fn test_binary_parentheses() {
    assert_eq!(reprint("x = (a + b) * c;"), "x = (a + b) * c;\n");
    assert_eq!(reprint("x = a - (b - c);"), "x = a - (b - c);\n");
    assert_eq!(reprint("x = (a - b) - c;"), "x = a - b - c;\n");
    assert_eq!(reprint("x = (a ** b) ** c;"), "x = (a ** b) ** c;\n");
    assert_eq!(reprint("x = a ** b ** c;"), "x = a ** b ** c;\n");
    assert_eq!(reprint("x = (-a) ** b;"), "x = (-a) ** b;\n");
}

#[test]
fn test_coalesce_never_mixes_with_logical() {
    assert_eq!(reprint("x = (a || b) ?? c;"), "x = (a || b) ?? c;\n");
    assert_eq!(reprint("x = a ?? (b && c);"), "x = a ?? (b && c);\n");
    assert_eq!(reprint("x = (a ?? b) || c;"), "x = (a ?? b) || c;\n");
}

#[test]
fn test_lowered_type_test_shape() {
    assert_eq!(
        reprint("if ((c = Object(e)) instanceof TypeError) {}"),
        "if ((c = Object(e)) instanceof TypeError) {}\n"
    );
}

#[test]
fn test_statement_start_ambiguity() {
    assert_eq!(reprint("({ a: 1 }).a;"), "({ a: 1 }.a);\n");
    assert_eq!(reprint("(function () {})();"), "(function() {}());\n");
    assert_eq!(reprint("x = { a: 1, b, 'c': 2 };"), "x = { a: 1, b, \"c\": 2 };\n");
}

#[test]
fn test_new_and_member_parentheses() {
    assert_eq!(reprint("x = new (f())();"), "x = new (f())();\n");
    assert_eq!(reprint("x = (new Foo).bar;"), "x = (new Foo).bar;\n");
    assert_eq!(reprint("x = new Foo;"), "x = new Foo;\n");
    assert_eq!(reprint("x = (1).toString();"), "x = (1).toString();\n");
}

#[test]
fn test_array_holes() {
    assert_eq!(reprint("x = [1, , 2, ,];"), "x = [1, , 2, ,];\n");
    assert_eq!(reprint("x = [,];"), "x = [,];\n");
    assert_eq!(reprint("x = [];"), "x = [];\n");
}

#[test]
fn test_for_head_keeps_in_parenthesized() {
    assert_eq!(
        reprint("for (var i = ('a' in o) ? 0 : 1; i < 3; i++) {}"),
        "for (var i = (\"a\" in o) ? 0 : 1; i < 3; i++) {}\n"
    );
    assert_eq!(reprint("for (;;) break;"), "for (;;) break;\n");
    assert_eq!(
        reprint("for (const k in obj) continue;"),
        "for (const k in obj) continue;\n"
    );
}

#[test]
fn test_unary_and_update() {
    assert_eq!(reprint("x = - -a;"), "x = - -a;\n");
    assert_eq!(reprint("x = typeof a;"), "x = typeof a;\n");
    assert_eq!(reprint("x = !a++;"), "x = !a++;\n");
    assert_eq!(reprint("--x;"), "--x;\n");
}

#[test]
fn test_arrows_and_strings() {
    assert_eq!(reprint("f = () => ({ a: 1 });"), "f = () => ({ a: 1 });\n");
    assert_eq!(reprint("g = x => x;"), "g = (x) => x;\n");
    assert_eq!(reprint("s = 'it\\'s';"), "s = \"it's\";\n");
}

#[test]
fn test_empty_program() {
    assert_eq!(reprint(""), "");
}

#[test]
fn test_dangling_else_is_braced() {
    // `if (a) if (b) c(); else d();` with the else on the outer `if`, which
    // the parser could never produce from unbraced text.
    let interner = StringInterner::new();
    let mut ast = Ast::new();
    let span = Span::new(0, 1);
    let ident = |ast: &mut Ast, name: &str| -> ExprId {
        ast.alloc_expr(Expr::new(ExprKind::Ident(interner.intern(name)), span))
    };
    let call_stmt = |ast: &mut Ast, callee: ExprId| -> StmtId {
        let args = ast.alloc_expr_list([]);
        let call = ast.alloc_expr(Expr::new(ExprKind::Call { callee, args }, span));
        ast.alloc_stmt(Stmt::new(StmtKind::Expr(call), span))
    };

    let a = ident(&mut ast, "a");
    let b = ident(&mut ast, "b");
    let c = ident(&mut ast, "c");
    let d = ident(&mut ast, "d");
    let c_call = call_stmt(&mut ast, c);
    let d_call = call_stmt(&mut ast, d);
    let inner = ast.alloc_stmt(Stmt::new(
        StmtKind::If {
            test: b,
            consequent: c_call,
            alternate: StmtId::INVALID,
        },
        span,
    ));
    let outer = ast.alloc_stmt(Stmt::new(
        StmtKind::If {
            test: a,
            consequent: inner,
            alternate: d_call,
        },
        span,
    ));
    let body = ast.alloc_stmt_list([outer]);
    let program = Program { body, span };

    assert_eq!(
        print_program(&program, &ast, &interner, &PrintOptions::default()),
        "\
if (a) {
    if (b) c();
} else d();
"
    );
    assert_eq!(print_expr(a, &ast, &interner), "a");
}
