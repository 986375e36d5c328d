//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Function definitions and imports
//! - Operator precedence and associativity
//! - Calls and grouping
//! - Syntax errors

use super::parser::{parse, Parser};
use crate::ast::ast::{Expr, TopLevel};

fn parse_one(source: &str) -> TopLevel {
    let mut items = parse(source.to_string(), Some("test.is".to_string())).unwrap();
    assert_eq!(items.len(), 1, "expected a single construct in {source:?}");

    items.remove(0)
}

fn parse_body(source: &str) -> String {
    match parse_one(source) {
        TopLevel::Expression(function) => function.body.to_string(),
        other => panic!("expected a top-level expression, got {other:?}"),
    }
}

fn parse_error(source: &str) -> String {
    parse(source.to_string(), Some("test.is".to_string()))
        .unwrap_err()
        .get_error_name()
        .to_string()
}

#[test]
fn test_parse_function_definition() {
    let TopLevel::Definition(function) = parse_one("fn add(a b) a + b") else {
        panic!("expected a definition");
    };

    assert_eq!(function.prototype.name, "add");
    assert_eq!(function.prototype.parameters, vec!["a", "b"]);
    assert_eq!(function.body.to_string(), "(+ a b)");
}

#[test]
fn test_parse_definition_without_parameters() {
    let TopLevel::Definition(function) = parse_one("fn one() 1.0") else {
        panic!("expected a definition");
    };

    assert_eq!(function.prototype.arity(), 0);
    assert!(matches!(function.body, Expr::Number(ref number) if number.value == 1.0));
}

#[test]
fn test_parse_import() {
    let TopLevel::Import(prototype) = parse_one("import sin(x)") else {
        panic!("expected an import");
    };

    assert_eq!(prototype.name, "sin");
    assert_eq!(prototype.parameters, vec!["x"]);
    assert_eq!(prototype.to_string(), "sin(x)");
}

#[test]
fn test_parse_top_level_expression_is_anonymous() {
    let TopLevel::Expression(function) = parse_one("1 + 2") else {
        panic!("expected a top-level expression");
    };

    assert!(function.prototype.is_anonymous());
    assert_eq!(function.prototype.arity(), 0);
    assert_eq!(function.body.to_string(), "(+ 1 2)");
}

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(parse_body("1-2-3"), "(- (- 1 2) 3)");
    assert_eq!(parse_body("1 + 2 - 3 + 4"), "(+ (- (+ 1 2) 3) 4)");
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(parse_body("1+2*3"), "(+ 1 (* 2 3))");
    assert_eq!(parse_body("1*2+3"), "(+ (* 1 2) 3)");
    assert_eq!(parse_body("1+2*3*4"), "(+ 1 (* (* 2 3) 4))");
    assert_eq!(parse_body("1+2*3-4"), "(- (+ 1 (* 2 3)) 4)");
}

#[test]
fn test_comparison_binds_loosest() {
    assert_eq!(parse_body("a < b + 1"), "(< a (+ b 1))");
    assert_eq!(parse_body("a * 2 < b - 1"), "(< (* a 2) (- b 1))");
}

#[test]
fn test_division_has_multiplicative_precedence() {
    assert_eq!(parse_body("1+6/3"), "(+ 1 (/ 6 3))");
    assert_eq!(parse_body("8/4/2"), "(/ (/ 8 4) 2)");
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(parse_body("(1+2)*3"), "(* (+ 1 2) 3)");
    assert_eq!(parse_body("1-(2-3)"), "(- 1 (- 2 3))");
    assert_eq!(parse_body("((x))"), "x");
}

#[test]
fn test_parse_calls() {
    assert_eq!(parse_body("f()"), "f()");
    assert_eq!(parse_body("f(1, x + 2, g(y))"), "f(1, (+ x 2), g(y))");
    assert_eq!(parse_body("f(1) * 2"), "(* f(1) 2)");
}

#[test]
fn test_unregistered_operator_ends_expression() {
    // `%` has no precedence, so the expression ends before it
    let mut parser = Parser::from_source("1 % 2".to_string(), None);

    let Some(TopLevel::Expression(function)) = parser.parse_top_level().unwrap() else {
        panic!("expected a top-level expression");
    };
    assert_eq!(function.body.to_string(), "1");
    assert_eq!(parser.current_token().unwrap().value, "%");
}

#[test]
fn test_registered_operator_is_parsed() {
    let mut parser = Parser::from_source("1 + 2 % 3".to_string(), None);
    parser.binop('%', 40);

    let Some(TopLevel::Expression(function)) = parser.parse_top_level().unwrap() else {
        panic!("expected a top-level expression");
    };
    assert_eq!(function.body.to_string(), "(+ 1 (% 2 3))");
}

#[test]
fn test_non_positive_precedence_disables_operator() {
    let mut parser = Parser::from_source("1 + 2".to_string(), None);
    parser.binop('+', 0);

    let Some(TopLevel::Expression(function)) = parser.parse_top_level().unwrap() else {
        panic!("expected a top-level expression");
    };
    assert_eq!(function.body.to_string(), "1");
}

#[test]
fn test_default_precedence_table() {
    let parser = Parser::from_source(String::new(), None);
    let lookup = parser.get_precedence_lookup();

    assert_eq!(lookup.get(&'<'), Some(&10));
    assert_eq!(lookup.get(&'+'), Some(&20));
    assert_eq!(lookup.get(&'-'), Some(&20));
    assert_eq!(lookup.get(&'*'), Some(&40));
    assert_eq!(lookup.get(&'/'), Some(&40));
}

#[test]
fn test_parse_program() {
    let source = "
        import sin(x);
        fn twice(x) x * 2
        ;;
        twice(sin(1.0))
    ";
    let items = parse(source.to_string(), None).unwrap();

    assert_eq!(items.len(), 3);
    assert!(matches!(items[0], TopLevel::Import(_)));
    assert!(matches!(items[1], TopLevel::Definition(_)));
    assert!(matches!(items[2], TopLevel::Expression(_)));
}

#[test]
fn test_function_body_is_a_single_expression() {
    let items = parse("fn f(x) x 2".to_string(), None).unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].to_string(), "fn f(x) x");
    assert_eq!(items[1].to_string(), "2");
}

#[test]
fn test_empty_source() {
    assert!(parse(String::new(), None).unwrap().is_empty());
    assert!(parse(" ; ; ".to_string(), None).unwrap().is_empty());
}

#[test]
fn test_missing_closing_paren() {
    assert_eq!(parse_error("(1 + 2"), "ExpectedClosingParen");
}

#[test]
fn test_malformed_argument_lists() {
    assert_eq!(parse_error("f(1 2)"), "ExpectedArgumentSeparator");
    assert_eq!(parse_error("f(1,)"), "UnexpectedToken");
    assert_eq!(parse_error("f(1"), "ExpectedArgumentSeparator");
}

#[test]
fn test_malformed_prototypes() {
    assert_eq!(parse_error("fn (x) x"), "ExpectedFunctionName");
    assert_eq!(parse_error("fn f x"), "ExpectedOpenParen");
    assert_eq!(parse_error("fn f(a, b) a"), "ExpectedParameterListEnd");
    assert_eq!(parse_error("import 1()"), "ExpectedFunctionName");
}

#[test]
fn test_unexpected_token() {
    assert_eq!(parse_error(")"), "UnexpectedToken");
    assert_eq!(parse_error("1 + fn"), "UnexpectedToken");
    assert_eq!(parse_error("fn f(x)"), "UnexpectedToken");
}

#[test]
fn test_unterminated_comment_stops_parsing() {
    let mut parser = Parser::from_source("1 + 2 /* open".to_string(), None);

    let error = parser.parse_top_level().unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedComment");
    assert!(!parser.has_tokens().unwrap());
}

#[test]
fn test_recovery_by_skipping_a_token() {
    let mut parser = Parser::from_source(") fn f(x) x".to_string(), None);

    assert!(parser.parse_top_level().is_err());
    parser.skip_token().unwrap();

    let item = parser.parse_top_level().unwrap().unwrap();
    assert_eq!(item.to_string(), "fn f(x) x");
    assert!(parser.parse_top_level().unwrap().is_none());
}

#[test]
fn test_error_positions() {
    let error = parse("fn f(x) x + )".to_string(), None).unwrap_err();

    assert_eq!(error.get_position().0, 12);
}

#[test]
fn test_spans() {
    let TopLevel::Definition(function) = parse_one("fn add(a b) a + b") else {
        panic!("expected a definition");
    };

    assert_eq!(function.span.start.0, 0);
    assert_eq!(function.span.end.0, 17);
    assert_eq!(function.prototype.span.start.0, 3);
    assert_eq!(function.prototype.span.end.0, 11);
    assert_eq!(function.body.get_span().start.0, 12);
}
