//! Unit tests for IR lowering.

use inkwell::{
    context::Context,
    values::{AnyValue, FunctionValue},
};

use super::compiler::Compiler;
use crate::{errors::errors::Error, parser::parser::{parse, Parser}};

fn lower<'a>(compiler: &mut Compiler<'a>, source: &str) -> Result<Vec<FunctionValue<'a>>, Error> {
    let items = parse(source.to_string(), Some("test.is".to_string())).unwrap();

    items
        .iter()
        .map(|item| compiler.compile_top_level(item))
        .collect()
}

fn lower_error(source: &str) -> String {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    lower(&mut compiler, source)
        .unwrap_err()
        .get_error_name()
        .to_string()
}

#[test]
fn test_identity_function() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let functions = lower(&mut compiler, "fn id(x) x").unwrap();

    assert_eq!(functions[0].count_params(), 1);
    let ir = compiler.print_to_string();
    assert!(ir.contains("define double @id(double %x)"));
    assert!(ir.contains("ret double %x"));
    assert!(compiler.verify_module().is_ok());
}

#[test]
fn test_constants_are_folded() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let functions = lower(&mut compiler, "1+2*3").unwrap();

    assert_eq!(functions[0].count_params(), 0);
    assert!(functions[0].print_to_string().to_string().contains("ret double 7.000000e+00"));
}

#[test]
fn test_subtraction_chain_order() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    lower(&mut compiler, "fn f(a b c) a - b - c").unwrap();

    let ir = compiler.print_to_string();
    assert!(ir.contains("%subtmp = fsub double %a, %b"));
    assert!(ir.contains("%subtmp1 = fsub double %subtmp, %c"));
}

#[test]
fn test_arithmetic_operators() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    lower(&mut compiler, "fn f(a b) a * b + a / b").unwrap();

    let ir = compiler.print_to_string();
    assert!(ir.contains("fmul double %a, %b"));
    assert!(ir.contains("fdiv double %a, %b"));
    assert!(ir.contains("%addtmp = fadd double %multmp, %divtmp"));
}

#[test]
fn test_comparison_yields_double() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    lower(&mut compiler, "fn lt(a b) a < b").unwrap();

    let ir = compiler.print_to_string();
    assert!(ir.contains("%cmptmp = fcmp ult double %a, %b"));
    assert!(ir.contains("%booltmp = uitofp i1 %cmptmp to double"));
    assert!(ir.contains("ret double %booltmp"));
}

#[test]
fn test_call_imported_function() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    lower(&mut compiler, "import sin(x) fn f(y) sin(y)").unwrap();

    let ir = compiler.print_to_string();
    assert!(ir.contains("declare double @sin(double)"));
    assert!(ir.contains("%calltmp = call double @sin(double %y)"));
    assert!(compiler.verify_module().is_ok());
}

#[test]
fn test_import_then_define() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let functions = lower(&mut compiler, "import f(a) fn f(x) x * 2").unwrap();

    assert_eq!(functions[0], functions[1]);
    assert!(compiler
        .print_to_string()
        .contains("define double @f(double %x)"));
}

#[test]
fn test_repeated_import_is_reused() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let functions = lower(&mut compiler, "import f(a) import f(b)").unwrap();

    assert_eq!(functions[0], functions[1]);
}

#[test]
fn test_redefinition_is_rejected() {
    assert_eq!(lower_error("fn f(x) x fn f(x) x"), "FunctionRedefinition");
    assert_eq!(lower_error("fn f(x) x import f(x) fn f(y) y"), "FunctionRedefinition");
}

#[test]
fn test_signature_mismatch() {
    assert_eq!(lower_error("import f(a) fn f(a b) a"), "FunctionSignatureMismatch");
    assert_eq!(lower_error("import f(a) import f(a b)"), "FunctionSignatureMismatch");
}

#[test]
fn test_unknown_names() {
    assert_eq!(lower_error("fn f(x) y"), "UnknownVariable");
    assert_eq!(lower_error("g(1)"), "UnknownFunction");
    assert_eq!(lower_error("import f(a b) f(1)"), "ArgumentCountMismatch");
}

#[test]
fn test_parameters_do_not_leak_between_functions() {
    assert_eq!(lower_error("fn f(x) x fn g(y) x"), "UnknownVariable");
}

#[test]
fn test_failed_definition_is_removed() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    assert!(lower(&mut compiler, "fn f(x) x + y").is_err());

    assert!(compiler.module.get_function("f").is_none());
    assert!(compiler.module.get_first_function().is_none());
    assert!(compiler.builder.get_insert_block().is_none());
}

#[test]
fn test_failed_definition_restores_declaration() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    assert!(lower(&mut compiler, "import g(a) fn g(b) c").is_err());

    let function = compiler.module.get_function("g").unwrap();
    assert_eq!(function.count_basic_blocks(), 0);

    let param = function.get_nth_param(0).unwrap().into_float_value();
    assert_eq!(param.get_name().to_str().unwrap(), "a");
    assert!(compiler.verify_module().is_ok());

    // The declaration can still be defined afterwards
    lower(&mut compiler, "fn g(b) b").unwrap();
    assert!(compiler
        .print_to_string()
        .contains("define double @g(double %b)"));
}

#[test]
fn test_unlowerable_operator() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let mut parser = Parser::from_source("1 % 2".to_string(), None);
    parser.binop('%', 40);
    let item = parser.parse_top_level().unwrap().unwrap();

    let error = compiler.compile_top_level(&item).unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidBinaryOperator");
    assert!(compiler.module.get_first_function().is_none());
}

#[test]
fn test_anonymous_functions_are_numbered() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    lower(&mut compiler, "1 2").unwrap();

    let ir = compiler.print_to_string();
    assert!(ir.contains("define double @0()"));
    assert!(ir.contains("define double @1()"));
}

#[test]
fn test_remove_function() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let functions = lower(&mut compiler, "fn one() 1 4 * 2").unwrap();
    // Still positioned in the anonymous function's entry block
    assert!(compiler.builder.get_insert_block().is_some());

    compiler.remove_function(functions[1]);

    assert!(compiler.module.get_function("one").is_some());
    assert_eq!(compiler.module.get_functions().count(), 1);
    assert!(compiler.builder.get_insert_block().is_none());

    // Lowering continues normally afterwards
    lower(&mut compiler, "fn two() one() + 1").unwrap();
    assert!(compiler.verify_module().is_ok());
}

#[test]
fn test_error_position_points_at_name() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let error = lower(&mut compiler, "fn f(x) y").unwrap_err();

    assert_eq!(error.get_position().0, 8);
    assert_eq!(error.get_position().1.as_str(), "test.is");
}
