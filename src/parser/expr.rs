use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, CallExpr, NumberExpr, VariableExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::parse_number_literal, tokens::TokenKind},
    Span,
};

use super::parser::Parser;

/// expression ::= primary binoprhs
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let left = parse_primary_expr(parser)?;

    parse_binop_rhs(parser, 0, left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind()? {
        TokenKind::Number => parse_number_expr(parser),
        TokenKind::Identifier => parse_identifier_expr(parser),
        TokenKind::Char('(') => parse_grouping_expr(parser),
        _ => {
            let token = parser.current_token()?;
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ))
        }
    }
}

pub fn parse_number_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance()?;

    Ok(Expr::Number(NumberExpr {
        value: parse_number_literal(&token.value),
        span: token.span,
    }))
}

/// identifier ::= name | name '(' arguments ')'
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let name = parser.advance()?;

    if parser.current_token_kind()? != TokenKind::Char('(') {
        return Ok(Expr::Variable(VariableExpr {
            name: name.value,
            span: name.span,
        }));
    }

    parser.advance()?;
    let arguments = parse_call_arguments(parser)?;

    Ok(Expr::Call(CallExpr {
        callee: name.value,
        arguments,
        span: parser.span_from(name.span.start),
    }))
}

/// Parses comma separated arguments up to and including the closing `)`.
///
/// The opening `(` must already be consumed.
pub fn parse_call_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut arguments = vec![];

    if parser.current_token_kind()? != TokenKind::Char(')') {
        loop {
            arguments.push(parse_expr(parser)?);

            if parser.current_token_kind()? == TokenKind::Char(')') {
                break;
            }

            parser.expect_error(TokenKind::Char(','), |token| {
                ErrorImpl::ExpectedArgumentSeparator { token }
            })?;
        }
    }

    parser.advance()?;

    Ok(arguments)
}

/// grouping ::= '(' expression ')'
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance()?;
    let expr = parse_expr(parser)?;
    parser.expect_error(TokenKind::Char(')'), |token| {
        ErrorImpl::ExpectedClosingParen { token }
    })?;

    Ok(expr)
}

/// Operator-precedence climbing over `(binop primary)*`.
///
/// Consumes operators binding at least as tightly as `min_precedence` and
/// folds them into `left`, so chains of equal precedence associate to the
/// left while tighter operators on the right are grouped first.
pub fn parse_binop_rhs(
    parser: &mut Parser,
    min_precedence: i32,
    mut left: Expr,
) -> Result<Expr, Error> {
    loop {
        let TokenKind::Char(operator) = parser.current_token_kind()? else {
            return Ok(left);
        };

        let precedence = match parser.get_token_precedence()? {
            Some(precedence) if precedence >= min_precedence => precedence,
            _ => return Ok(left),
        };

        parser.advance()?;

        let mut right = parse_primary_expr(parser)?;

        if parser
            .get_token_precedence()?
            .is_some_and(|next_precedence| next_precedence > precedence)
        {
            right = parse_binop_rhs(parser, precedence + 1, right)?;
        }

        let span = Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        };

        left = Expr::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span,
        });
    }
}
