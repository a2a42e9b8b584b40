//! Dynamic-scope constructs: `with` blocks and direct `eval`.

mod common;

use common::{analyze_script, analyze_with, find_var, Builder};
use pretty_assertions::assert_eq;
use sable_ast::DeclarationKind::Var;
use sable_scope::{AnalyzeOptions, DynamicScopePolicy, ScopeKind};

#[test]
fn with_taints_references_in_its_body() {
    // var x; with (o) { x; }
    let mut b = Builder::new();
    let decl = b.var(Var, "x", None);
    let object = b.ident("o");
    let read = b.read("x");
    let body = b.block(vec![read]);
    let with = b.ast.alloc(
        sable_ast::NodeKind::WithStatement { object, body },
        sable_ast::Span::DUMMY,
    );
    let program = b.program(vec![decl, with]);
    let mgr = analyze_script(&mut b, program);

    let Some(wscope) = mgr.acquire(with, false) else {
        panic!("with scope missing");
    };
    assert_eq!(mgr.scope(wscope).kind(), ScopeKind::With);
    assert!(mgr.scope(wscope).is_tainted());
    assert!(!mgr.scope(mgr.global_scope()).is_tainted());

    // The body read still resolves statically, but carries the taint.
    let x = find_var(&mgr, &b.ast, mgr.global_scope(), "x");
    let r = mgr.variable(x).references()[0];
    assert_eq!(mgr.reference(r).resolved(), Some(x));
    assert!(mgr.reference(r).is_tainted());

    // The object itself evaluates outside the with scope.
    let Some(o_ref) = mgr.scope(mgr.global_scope()).references().first().copied() else {
        panic!("object reference missing");
    };
    assert!(!mgr.reference(o_ref).is_tainted());
}

#[test]
fn taint_reaches_nested_blocks_but_not_nested_functions() {
    // with (o) { { x; } function f() { y; } }
    let mut b = Builder::new();
    let object = b.ident("o");
    let x_read = b.read("x");
    let inner = b.block(vec![x_read]);
    let y_read = b.read("y");
    let f = b.func_decl("f", vec![], vec![y_read]);
    let body = b.block(vec![inner, f]);
    let with = b.ast.alloc(
        sable_ast::NodeKind::WithStatement { object, body },
        sable_ast::Span::DUMMY,
    );
    let program = b.program(vec![with]);
    let mgr = analyze_script(&mut b, program);

    let Some(bscope) = mgr.acquire(inner, false) else {
        panic!("block scope missing");
    };
    assert!(mgr.scope(bscope).is_tainted());
    let Some(fscope) = mgr.acquire(f, false) else {
        panic!("function scope missing");
    };
    assert!(!mgr.scope(fscope).is_tainted());

    let tainted: Vec<bool> = mgr
        .unresolved_references()
        .iter()
        .map(|&r| mgr.reference(r).is_tainted())
        .collect();
    // o (outside), x (inside the with), y (inside the function).
    assert_eq!(tainted, vec![false, true, false]);
}

#[test]
fn direct_eval_taints_the_scope_it_occurs_in() {
    // function f(s) { eval(s); x; } x;
    let mut b = Builder::new();
    let param = b.ident("s");
    let callee = b.ident("eval");
    let arg = b.ident("s");
    let call = b.call(callee, vec![arg]);
    let call_stmt = b.expr_stmt(call);
    let x_read = b.read("x");
    let f = b.func_decl("f", vec![param], vec![call_stmt, x_read]);
    let outer_read = b.read("x");
    let program = b.program(vec![f, outer_read]);
    let mgr = analyze_script(&mut b, program);

    let Some(fscope) = mgr.acquire(f, false) else {
        panic!("function scope missing");
    };
    assert!(mgr.scope(fscope).is_tainted());
    assert!(!mgr.scope(mgr.global_scope()).is_tainted());

    let flags: Vec<bool> = mgr
        .scope(fscope)
        .references()
        .iter()
        .map(|&r| mgr.reference(r).is_tainted())
        .collect();
    // eval, s, and x inside the function are all affected.
    assert_eq!(flags, vec![true, true, true]);

    // The top-level read is untouched.
    let Some(global_read) = mgr.scope(mgr.global_scope()).references().first().copied() else {
        panic!("global reference missing");
    };
    assert!(!mgr.reference(global_read).is_tainted());
}

#[test]
fn eval_in_a_block_leaves_sibling_blocks_alone() {
    // function f(s) { { x; } { eval(s); } }
    let mut b = Builder::new();
    let param = b.ident("s");
    let x_read = b.read("x");
    let first = b.block(vec![x_read]);
    let callee = b.ident("eval");
    let arg = b.ident("s");
    let call = b.call(callee, vec![arg]);
    let call_stmt = b.expr_stmt(call);
    let second = b.block(vec![call_stmt]);
    let f = b.func_decl("f", vec![param], vec![first, second]);
    let program = b.program(vec![f]);
    let mgr = analyze_script(&mut b, program);

    let Some(first_scope) = mgr.acquire(first, false) else {
        panic!("first block scope missing");
    };
    let Some(second_scope) = mgr.acquire(second, false) else {
        panic!("second block scope missing");
    };
    let Some(fscope) = mgr.acquire(f, false) else {
        panic!("function scope missing");
    };

    // Only the block holding the call and its descendants are affected;
    // taint never climbs to the function or spills into siblings.
    assert!(mgr.scope(second_scope).is_tainted());
    assert!(!mgr.scope(first_scope).is_tainted());
    assert!(!mgr.scope(fscope).is_tainted());

    let Some(x) = mgr.scope(first_scope).references().first().copied() else {
        panic!("x reference missing");
    };
    assert!(!mgr.reference(x).is_tainted());
    assert!(mgr
        .scope(second_scope)
        .references()
        .iter()
        .all(|&r| mgr.reference(r).is_tainted()));
}

#[test]
fn optimistic_analysis_records_no_taint() {
    // with (o) { x; }
    let mut b = Builder::new();
    let object = b.ident("o");
    let read = b.read("x");
    let body = b.block(vec![read]);
    let with = b.ast.alloc(
        sable_ast::NodeKind::WithStatement { object, body },
        sable_ast::Span::DUMMY,
    );
    let program = b.program(vec![with]);
    let options = AnalyzeOptions {
        dynamic_scopes: DynamicScopePolicy::Optimistic,
        ..AnalyzeOptions::default()
    };
    let mgr = analyze_with(&mut b, program, &options);

    let Some(wscope) = mgr.acquire(with, false) else {
        panic!("with scope missing");
    };
    assert!(!mgr.scope(wscope).is_tainted());
    assert!(mgr.references().all(|(_, r)| !r.is_tainted()));
}
