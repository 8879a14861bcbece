use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tc_fmt::{print_program, PrintOptions};
use tc_ir::{
    AssignOp, Ast, BinaryOp, CatchClause, CatchKind, ExprId, ExprKind, GrammarMode, Name, StmtId,
    StmtKind, StringInterner, VarKind,
};
use tc_parse::{parse, ParseOptions, ParseOutput};

use crate::{desugar, DesugarOptions, Desugared, StructuralErrorKind};

fn parse_source(source: &str, interner: &StringInterner) -> ParseOutput {
    let lexed = tc_lexer::lex(source, interner);
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    parse(&lexed.tokens, interner, &ParseOptions::default())
}

fn parse_clean(source: &str, interner: &StringInterner) -> ParseOutput {
    let output = parse_source(source, interner);
    assert!(output.errors.is_empty(), "parse errors: {:?}", output.errors);
    output
}

fn lower_with(source: &str, interner: &StringInterner, options: &DesugarOptions) -> Desugared {
    let parsed = parse_clean(source, interner);
    desugar(&parsed.program, &parsed.ast, interner, options).unwrap()
}

fn print(desugared: &Desugared, interner: &StringInterner) -> String {
    print_program(
        &desugared.program,
        &desugared.ast,
        interner,
        &PrintOptions::default(),
    )
}

fn desugar_to_source(source: &str) -> String {
    let interner = StringInterner::new();
    let lowered = lower_with(source, &interner, &DesugarOptions::default());
    print(&lowered, &interner)
}

// ── Printed shape ───────────────────────────────────────────────

#[test]
fn typed_catches_without_default_rethrow() {
    assert_eq!(
        desugar_to_source(
            "try { f() } catch (e: TypeError) { a() } catch (e: SyntaxError) { b() } \
             catch (e: Error) { c() }"
        ),
        "\
try {
    f();
} catch ($error) {
    let $caught;
    if (($caught = Object($error)) instanceof TypeError) {
        let e = $caught;
        a();
    } else if (($caught = Object($error)) instanceof SyntaxError) {
        let e = $caught;
        b();
    } else if (($caught = Object($error)) instanceof Error) {
        let e = $caught;
        c();
    } else {
        throw $error;
    }
}
"
    );
}

#[test]
fn default_catch_without_binding_becomes_else_block() {
    assert_eq!(
        desugar_to_source("try { f() } catch (e: Error) { a() } catch { b() }"),
        "\
try {
    f();
} catch ($error) {
    let $caught;
    if (($caught = Object($error)) instanceof Error) {
        let e = $caught;
        a();
    } else {
        b();
    }
}
"
    );
}

#[test]
fn default_binding_sees_unwrapped_value_and_finally_is_kept() {
    assert_eq!(
        desugar_to_source(
            "try { f() } catch (e: errors.NotFound) { a(e) } catch (raw) { b(raw) } finally { c() }"
        ),
        "\
try {
    f();
} catch ($error) {
    let $caught;
    if (($caught = Object($error)) instanceof errors.NotFound) {
        let e = $caught;
        a(e);
    } else {
        let raw = $error;
        b(raw);
    }
} finally {
    c();
}
"
    );
}

#[test]
fn default_only_try_is_unchanged() {
    let source = "try { f(); } catch (err) { log(err); } finally { done(); }\n\
                  try { g(); } catch { h(); }\n\
                  try { k(); } finally { done(); }";
    let interner = StringInterner::new();
    let parsed = parse_clean(source, &interner);
    let lowered = desugar(
        &parsed.program,
        &parsed.ast,
        &interner,
        &DesugarOptions::default(),
    )
    .unwrap();

    assert_eq!(lowered.lowered, 0);
    assert_eq!(
        print(&lowered, &interner),
        print_program(
            &parsed.program,
            &parsed.ast,
            &interner,
            &PrintOptions::default()
        )
    );
}

#[test]
fn boxes_once_per_attempt() {
    let printed = desugar_to_source(
        "try { throw 'oops'; } catch (e: String) { a() } catch (e: Number) { b() } catch { c() }",
    );
    assert_eq!(printed.matches("Object($error)").count(), 2);
    assert_eq!(printed.matches("let $caught;").count(), 1);
}

#[test]
fn synthetic_names_avoid_user_names() {
    assert_eq!(
        desugar_to_source("try { $error = 1; } catch (e: A) { $caught(); }"),
        "\
try {
    $error = 1;
} catch ($error1) {
    let $caught1;
    if (($caught1 = Object($error1)) instanceof A) {
        let e = $caught1;
        $caught();
    } else {
        throw $error1;
    }
}
"
    );
}

#[test]
fn configured_base_names() {
    let interner = StringInterner::new();
    let options = DesugarOptions::default()
        .with_error_name("err")
        .with_caught_name("boxed");
    let lowered = lower_with("try {} catch (e: A) {}", &interner, &options);
    assert_eq!(
        print(&lowered, &interner),
        "\
try {} catch (err) {
    let boxed;
    if ((boxed = Object(err)) instanceof A) {
        let e = boxed;
    } else {
        throw err;
    }
}
"
    );
}

#[test]
fn nested_try_statements_are_lowered() {
    let interner = StringInterner::new();
    let lowered = lower_with(
        "function run() {
             try {
                 try { f(); } catch (e: A) { g(); }
             } catch (e: B) {
                 try { h(); } catch (inner: C) { i(); } catch { j(); }
             }
         }",
        &interner,
        &DesugarOptions::default(),
    );
    assert_eq!(lowered.lowered, 3);

    let printed = print(&lowered, &interner);
    assert!(!printed.contains("(e: "), "{printed}");
    assert!(!printed.contains("(inner: "), "{printed}");
    assert_eq!(printed.matches("instanceof").count(), 3);

    // The output is plain host-language syntax.
    let reparsed = parse_clean(&printed, &interner);
    crate::validate_program(&reparsed.program, &reparsed.ast, GrammarMode::Strict).unwrap();
}

#[test]
fn deeply_nested_body_lowers() {
    let depth = 1_000;
    let source = format!(
        "try {{ x = {}0{}; }} catch (e: A) {{}}",
        "[".repeat(depth),
        "]".repeat(depth)
    );
    let interner = StringInterner::new();
    let lowered = lower_with(&source, &interner, &DesugarOptions::default());
    assert_eq!(lowered.lowered, 1);
}

#[test]
fn rebound_object_below_program_scope_uses_saved_builtin() {
    assert_eq!(
        desugar_to_source(
            "function f(Object) { try { g() } catch (e: TypeError) { h(e) } }"
        ),
        "\
const $Object = Object;
function f(Object) {
    try {
        g();
    } catch ($error) {
        let $caught;
        if (($caught = $Object($error)) instanceof TypeError) {
            let e = $caught;
            h(e);
        } else {
            throw $error;
        }
    }
}
"
    );
}

#[test]
fn every_nested_object_binding_switches_to_the_alias() {
    const TRY: &str = "try { g() } catch (e: TypeError) { h(e) }";
    for source in [
        format!("function f() {{ var Object = 1; {TRY} }}"),
        format!("{{ let Object = 1; {TRY} }}"),
        format!("try {{ {TRY} }} catch (Object) {{}}"),
        format!("f((Object) => {{ {TRY} }});"),
        format!("Object = null;\n{TRY}"),
    ] {
        let printed = desugar_to_source(&source);
        assert!(printed.starts_with("const $Object = Object;\n"), "{printed}");
        assert!(printed.contains("($caught = $Object($error))"), "{printed}");
        assert!(!printed.contains("= Object($error)"), "{printed}");
    }
}

#[test]
fn alias_name_avoids_user_names() {
    let printed = desugar_to_source(
        "let $Object = 1;\nfunction f(Object) { try {} catch (e: A) {} }",
    );
    assert!(printed.starts_with("const $Object1 = Object;\n"), "{printed}");
    assert!(printed.contains("$Object1($error)"), "{printed}");
}

#[test]
fn object_binding_without_typed_catches_changes_nothing() {
    let source = "function f(Object) { try { g(); } catch (e) { h(e); } }";
    let interner = StringInterner::new();
    let parsed = parse_clean(source, &interner);
    let lowered = lower_with(source, &interner, &DesugarOptions::default());
    assert_eq!(lowered.lowered, 0);
    assert_eq!(
        print(&lowered, &interner),
        print_program(
            &parsed.program,
            &parsed.ast,
            &interner,
            &PrintOptions::default()
        )
    );
}

#[test]
fn program_scope_object_binding_is_rejected() {
    for source in [
        "try { var Object = 1; g() } catch (e: TypeError) { h(e) }",
        "function f(Object) { try { g() } catch (e: TypeError) { h(e) } }\n\
         try { var Object = 1; g() } catch (e: TypeError) { h(e) }",
        "let Object = 1;\ntry {} catch (e: A) {}",
        "const Object = 1;\ntry {} catch (e: A) {}",
        "function Object() {}\ntry {} catch (e: A) {}",
        "if (x) { function Object() {} }\ntry {} catch (e: A) {}",
        "for (var Object in o) {}\ntry {} catch (e: A) {}",
    ] {
        let interner = StringInterner::new();
        let parsed = parse_clean(source, &interner);
        let Err(errors) = desugar(
            &parsed.program,
            &parsed.ast,
            &interner,
            &DesugarOptions::default(),
        ) else {
            panic!("`Object` in program scope must not lower: {source}");
        };
        assert_eq!(errors.len(), 1, "{source}");
        assert_eq!(errors[0].kind, StructuralErrorKind::ObjectRebound, "{source}");
        assert_eq!(errors[0].code(), tc_diagnostic::ErrorCode::E2007);
    }
}

// ── Validation gate ─────────────────────────────────────────────

#[test]
fn strict_grammar_rejects_missing_default() {
    let interner = StringInterner::new();
    let parsed = parse_clean("try { f(); } catch (e: A) {}", &interner);
    let options = DesugarOptions::default().with_grammar(GrammarMode::Strict);

    let Err(errors) = desugar(&parsed.program, &parsed.ast, &interner, &options) else {
        panic!("strict grammar should reject a typed-only catch list");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, StructuralErrorKind::MissingDefault);
}

#[test]
fn ordering_errors_block_lowering() {
    let interner = StringInterner::new();
    // The parser reports the ordering error but keeps every clause.
    let parsed = parse_source("try {} catch (x) {} catch (e: A) {}", &interner);
    assert_eq!(parsed.errors.len(), 1);

    let Err(errors) = desugar(
        &parsed.program,
        &parsed.ast,
        &interner,
        &DesugarOptions::default(),
    ) else {
        panic!("a typed catch after the default must not lower");
    };
    assert!(matches!(
        errors.as_slice(),
        [error] if matches!(error.kind, StructuralErrorKind::DefaultNotLast { .. })
    ));
}

// ── Dispatch semantics ──────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// The named handler function was called.
    Ran(String),
    Rethrown,
}

/// Walks the lowered catch clause of the first statement as the runtime
/// would, with `is_instance` deciding each `instanceof` test.
struct Dispatch<'a> {
    ast: &'a Ast,
    interner: &'a StringInterner,
    error: Name,
    caught: Name,
}

impl<'a> Dispatch<'a> {
    fn run(
        lowered: &'a Desugared,
        interner: &'a StringInterner,
        is_instance: impl Fn(&str) -> bool,
    ) -> Outcome {
        let ast = &lowered.ast;
        let first = ast.stmt_list(lowered.program.body)[0];
        let StmtKind::Try(try_stmt) = ast.stmt(first).kind else {
            panic!("expected a try statement");
        };
        let [CatchClause {
            kind: CatchKind::Default { param: Some(error) },
            body,
            ..
        }] = *ast.catches(try_stmt.handlers)
        else {
            panic!("expected exactly one binding catch clause");
        };

        let body = ast.stmt_list(body);
        assert_eq!(body.len(), 2);
        let StmtKind::VarDecl {
            kind: VarKind::Let,
            decls,
        } = ast.stmt(body[0]).kind
        else {
            panic!("expected the boxing slot declaration");
        };
        let [slot] = *ast.decls(decls) else {
            panic!("expected one declarator");
        };
        assert!(!slot.init.is_valid());

        let dispatch = Dispatch {
            ast,
            interner,
            error,
            caught: slot.name,
        };

        let mut link = body[1];
        loop {
            match ast.stmt(link).kind {
                StmtKind::If {
                    test,
                    consequent,
                    alternate,
                } => {
                    if is_instance(dispatch.specifier(test)) {
                        return dispatch.block(consequent, dispatch.caught);
                    }
                    link = alternate;
                }
                StmtKind::Block(_) => return dispatch.block(link, dispatch.error),
                other => panic!("unexpected link {other:?}"),
            }
        }
    }

    /// Checks `(caught = Object(error)) instanceof Spec` and returns `Spec`.
    fn specifier(&self, test: ExprId) -> &'static str {
        let ExprKind::Binary {
            op: BinaryOp::Instanceof,
            left,
            right,
        } = self.ast.expr(test).kind
        else {
            panic!("expected an instanceof test");
        };
        let ExprKind::Assign {
            op: AssignOp::Assign,
            target,
            value,
        } = self.ast.expr(left).kind
        else {
            panic!("expected the boxing assignment");
        };
        assert_eq!(self.ident(target), self.caught);
        let ExprKind::Call { callee, args } = self.ast.expr(value).kind else {
            panic!("expected Object(error)");
        };
        assert_eq!(self.interner.lookup(self.ident(callee)), "Object");
        let [arg] = *self.ast.expr_list(args) else {
            panic!("expected one argument");
        };
        assert_eq!(self.ident(arg), self.error);
        self.interner.lookup(self.ident(right))
    }

    /// Runs a branch block. Bindings must read `source`.
    fn block(&self, id: StmtId, source: Name) -> Outcome {
        let StmtKind::Block(stmts) = self.ast.stmt(id).kind else {
            panic!("expected a block");
        };
        for &stmt in self.ast.stmt_list(stmts) {
            match self.ast.stmt(stmt).kind {
                StmtKind::VarDecl { decls, .. } => {
                    for decl in self.ast.decls(decls) {
                        assert_eq!(self.ident(decl.init), source);
                    }
                }
                StmtKind::Throw(value) => {
                    assert_eq!(self.ident(value), self.error);
                    return Outcome::Rethrown;
                }
                StmtKind::Expr(call) => {
                    let ExprKind::Call { callee, .. } = self.ast.expr(call).kind else {
                        panic!("expected a handler call");
                    };
                    return Outcome::Ran(self.interner.lookup(self.ident(callee)).to_owned());
                }
                other => panic!("unexpected statement {other:?}"),
            }
        }
        panic!("branch fell through");
    }

    fn ident(&self, id: ExprId) -> Name {
        let ExprKind::Ident(name) = self.ast.expr(id).kind else {
            panic!("expected an identifier");
        };
        name
    }
}

#[test]
fn primitive_thrown_value_reaches_default() {
    let interner = StringInterner::new();
    let lowered = lower_with(
        "try { throw 'x'; } catch (e: Error) { a(); } catch { b(); }",
        &interner,
        &DesugarOptions::default(),
    );
    // A boxed string is not an Error instance.
    let outcome = Dispatch::run(&lowered, &interner, |spec| spec == "String");
    assert_eq!(outcome, Outcome::Ran("b".to_owned()));
}

const SPECIFIERS: [&str; 4] = ["A", "B", "C", "D"];

proptest! {
    #[test]
    fn first_matching_clause_wins(
        typed in prop::collection::vec(0..SPECIFIERS.len(), 1..6),
        default in prop::option::of(any::<bool>()),
        instance_of in prop::collection::vec(any::<bool>(), SPECIFIERS.len()),
    ) {
        let mut source = String::from("try { f(); }");
        for (i, &spec) in typed.iter().enumerate() {
            source.push_str(&format!(" catch (e: {}) {{ h{i}(); }}", SPECIFIERS[spec]));
        }
        match default {
            Some(true) => source.push_str(" catch (x) { d(); }"),
            Some(false) => source.push_str(" catch { d(); }"),
            None => {}
        }

        let expected = match typed.iter().position(|&spec| instance_of[spec]) {
            Some(i) => Outcome::Ran(format!("h{i}")),
            None if default.is_some() => Outcome::Ran("d".to_owned()),
            None => Outcome::Rethrown,
        };

        let interner = StringInterner::new();
        let lowered = lower_with(&source, &interner, &DesugarOptions::default());
        let outcome = Dispatch::run(&lowered, &interner, |name| {
            SPECIFIERS
                .iter()
                .position(|&spec| spec == name)
                .is_some_and(|i| instance_of[i])
        });
        prop_assert_eq!(outcome, expected);
    }

    #[test]
    fn default_only_catch_is_identity(
        param in prop::option::of("[a-z][0-9]?"),
        calls in prop::collection::vec("[a-z][0-9]?", 0..4),
        finally in any::<bool>(),
    ) {
        let body: String = calls.iter().map(|c| format!("{c}(); ")).collect();
        let mut source = format!("try {{ {body}}}");
        match &param {
            Some(p) => source.push_str(&format!(" catch ({p}) {{ {body}}}")),
            None => source.push_str(&format!(" catch {{ {body}}}")),
        }
        if finally {
            source.push_str(&format!(" finally {{ {body}}}"));
        }

        let interner = StringInterner::new();
        let parsed = parse_clean(&source, &interner);
        let lowered = desugar(&parsed.program, &parsed.ast, &interner, &DesugarOptions::default())
            .unwrap();

        prop_assert_eq!(lowered.lowered, 0);
        prop_assert_eq!(
            print(&lowered, &interner),
            print_program(&parsed.program, &parsed.ast, &interner, &PrintOptions::default())
        );
    }
}
