//! Module source units: the module scope, imports, exports.

mod common;

use common::{analyze_with, find_var, scope_names, Builder};
use pretty_assertions::assert_eq;
use sable_ast::DeclarationKind::{Let, Var};
use sable_ast::{NodeId, NodeKind, Span};
use sable_scope::{AnalyzeOptions, DefinitionKind, ScopeKind, SourceKind};

fn module_options() -> AnalyzeOptions {
    AnalyzeOptions { source: SourceKind::Module, ..AnalyzeOptions::default() }
}

fn import_named(b: &mut Builder, imported: &str, local: &str, source: &str) -> NodeId {
    let imported = b.ident(imported);
    let local = b.ident(local);
    let spec = b.ast.alloc(NodeKind::ImportSpecifier { imported, local }, Span::DUMMY);
    let source = b.string(source);
    b.ast.alloc(
        NodeKind::ImportDeclaration { specifiers: vec![spec], source },
        Span::DUMMY,
    )
}

#[test]
fn top_level_bindings_live_on_the_module_scope() {
    // var x; let y;
    let mut b = Builder::new();
    let vx = b.var(Var, "x", None);
    let ly = b.var(Let, "y", None);
    let program = b.program(vec![vx, ly]);
    let mgr = analyze_with(&mut b, program, &module_options());

    let global = mgr.global_scope();
    assert!(mgr.scope(global).variables().is_empty());
    assert!(!mgr.scope(global).is_strict());

    let Some(module) = mgr.acquire(program, true) else {
        panic!("module scope missing");
    };
    assert_eq!(mgr.scope(module).kind(), ScopeKind::Module);
    assert!(mgr.scope(module).is_strict());
    assert_eq!(scope_names(&mgr, &b.ast, module), vec!["x", "y"]);
    assert_eq!(mgr.acquire(program, false), Some(global));
}

#[test]
fn imports_bind_their_local_names() {
    // import { a as b } from "m"; b;
    let mut b = Builder::new();
    let import = import_named(&mut b, "a", "b", "m");
    let read = b.read("b");
    let program = b.program(vec![import, read]);
    let mgr = analyze_with(&mut b, program, &module_options());

    let Some(module) = mgr.acquire(program, true) else {
        panic!("module scope missing");
    };
    let local = find_var(&mgr, &b.ast, module, "b");
    assert_eq!(mgr.variable(local).defs()[0].kind, DefinitionKind::ImportBinding);
    assert_eq!(mgr.variable(local).references().len(), 1);
    // The imported name `a` is not a binding here.
    let Some(a) = b.ast.lookup("a") else {
        panic!("imported name missing from the intern table");
    };
    assert!(mgr.scope(module).variable_by_name(a).is_none());
    assert!(mgr.unresolved_references().is_empty());
}

#[test]
fn export_specifiers_read_their_locals() {
    // let x; export { x };
    let mut b = Builder::new();
    let decl = b.var(Let, "x", None);
    let local = b.ident("x");
    let exported = b.ident("x");
    let spec = b.ast.alloc(NodeKind::ExportSpecifier { local, exported }, Span::DUMMY);
    let export = b.ast.alloc(
        NodeKind::ExportNamedDeclaration { declaration: None, specifiers: vec![spec], source: None },
        Span::DUMMY,
    );
    let program = b.program(vec![decl, export]);
    let mgr = analyze_with(&mut b, program, &module_options());

    let Some(module) = mgr.acquire(program, true) else {
        panic!("module scope missing");
    };
    let x = find_var(&mgr, &b.ast, module, "x");
    assert_eq!(mgr.variable(x).references().len(), 1);
    let r = mgr.variable(x).references()[0];
    assert!(mgr.reference(r).is_read_only());
}

#[test]
fn re_exports_touch_nothing_local() {
    // export { x } from "m";
    let mut b = Builder::new();
    let local = b.ident("x");
    let exported = b.ident("x");
    let spec = b.ast.alloc(NodeKind::ExportSpecifier { local, exported }, Span::DUMMY);
    let source = b.string("m");
    let export = b.ast.alloc(
        NodeKind::ExportNamedDeclaration {
            declaration: None,
            specifiers: vec![spec],
            source: Some(source),
        },
        Span::DUMMY,
    );
    let program = b.program(vec![export]);
    let mgr = analyze_with(&mut b, program, &module_options());

    assert_eq!(mgr.references().count(), 0);
    assert!(mgr.unresolved_references().is_empty());
}

#[test]
fn exported_declarations_are_hoisted_like_any_other() {
    // f(); export function f() {}
    let mut b = Builder::new();
    let callee = b.ident("f");
    let call = b.call(callee, vec![]);
    let stmt = b.expr_stmt(call);
    let f = b.func_decl("f", vec![], vec![]);
    let export = b.ast.alloc(
        NodeKind::ExportNamedDeclaration {
            declaration: Some(f),
            specifiers: vec![],
            source: None,
        },
        Span::DUMMY,
    );
    let program = b.program(vec![stmt, export]);
    let mgr = analyze_with(&mut b, program, &module_options());

    assert!(mgr.unresolved_references().is_empty());
    let Some(module) = mgr.acquire(program, true) else {
        panic!("module scope missing");
    };
    let var = find_var(&mgr, &b.ast, module, "f");
    assert_eq!(mgr.variable(var).references().len(), 1);
}

#[test]
fn default_exported_class_binds_its_name() {
    // export default class C {}
    let mut b = Builder::new();
    let class = b.class_decl("C", None, vec![]);
    let export = b.ast.alloc(NodeKind::ExportDefaultDeclaration { declaration: class }, Span::DUMMY);
    let program = b.program(vec![export]);
    let mgr = analyze_with(&mut b, program, &module_options());

    let Some(module) = mgr.acquire(program, true) else {
        panic!("module scope missing");
    };
    assert_eq!(scope_names(&mgr, &b.ast, module), vec!["C"]);
}

#[test]
fn embedded_sources_get_a_wrapper_function_scope() {
    // var x = 1; under the embedded source kind.
    let mut b = Builder::new();
    let one = b.num(1.0);
    let decl = b.var(Var, "x", Some(one));
    let program = b.program(vec![decl]);
    let options = AnalyzeOptions { source: SourceKind::Embedded, ..AnalyzeOptions::default() };
    let mgr = analyze_with(&mut b, program, &options);

    assert!(mgr.scope(mgr.global_scope()).variables().is_empty());
    let Some(wrapper) = mgr.acquire(program, true) else {
        panic!("wrapper scope missing");
    };
    assert_eq!(mgr.scope(wrapper).kind(), ScopeKind::Function);
    assert_eq!(scope_names(&mgr, &b.ast, wrapper), vec!["x"]);
}

#[test]
fn embedded_sources_can_reference_wrapper_arguments() {
    // arguments; under the embedded source kind.
    let mut b = Builder::new();
    let read = b.read("arguments");
    let program = b.program(vec![read]);
    let options = AnalyzeOptions { source: SourceKind::Embedded, ..AnalyzeOptions::default() };
    let mgr = analyze_with(&mut b, program, &options);

    let Some(wrapper) = mgr.acquire(program, true) else {
        panic!("wrapper scope missing");
    };
    let args = find_var(&mgr, &b.ast, wrapper, "arguments");
    assert_eq!(mgr.variable(args).references().len(), 1);
    assert!(mgr.unresolved_references().is_empty());
}
