use crate::{
    ast::declarations::{Function, Prototype},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, parser::Parser};

/// prototype ::= identifier '(' identifier* ')'
///
/// Parameter names are separated by whitespace only.
pub fn parse_prototype(parser: &mut Parser) -> Result<Prototype, Error> {
    let name = parser.expect_error(TokenKind::Identifier, |token| {
        ErrorImpl::ExpectedFunctionName { token }
    })?;

    parser.expect_error(TokenKind::Char('('), |token| ErrorImpl::ExpectedOpenParen {
        token,
    })?;

    let mut parameters = vec![];
    while parser.current_token_kind()? == TokenKind::Identifier {
        parameters.push(parser.advance()?.value);
    }

    parser.expect_error(TokenKind::Char(')'), |token| {
        ErrorImpl::ExpectedParameterListEnd { token }
    })?;

    Ok(Prototype {
        name: name.value,
        parameters,
        span: parser.span_from(name.span.start),
    })
}

/// definition ::= 'fn' prototype expression
pub fn parse_fn_definition(parser: &mut Parser) -> Result<Function, Error> {
    let start = parser.expect(TokenKind::Fn)?.span.start;

    let prototype = parse_prototype(parser)?;
    let body = parse_expr(parser)?;

    Ok(Function {
        prototype,
        body,
        span: parser.span_from(start),
    })
}

/// import ::= 'import' prototype
pub fn parse_import(parser: &mut Parser) -> Result<Prototype, Error> {
    parser.expect(TokenKind::Import)?;

    parse_prototype(parser)
}

/// Wraps a bare expression in an anonymous function so it can be lowered
/// like any other definition.
pub fn parse_top_level_expr(parser: &mut Parser) -> Result<Function, Error> {
    let body = parse_expr(parser)?;
    let span = body.get_span().clone();

    Ok(Function {
        prototype: Prototype::anonymous(span.clone()),
        body,
        span,
    })
}
