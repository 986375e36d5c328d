use inkwell::{
    values::{BasicMetadataValueEnum, FloatValue},
    FloatPredicate,
};

use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, CallExpr, VariableExpr},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::compiler::{builder_error, Compiler};

/// Generates LLVM IR for the given expression.
///
/// Every expression evaluates to a `double`.
pub fn gen_expression<'a>(
    compiler: &Compiler<'a>,
    expression: &Expr,
) -> Result<FloatValue<'a>, Error> {
    match expression {
        Expr::Number(number) => Ok(compiler.number_type().const_float(number.value)),
        Expr::Variable(variable) => gen_variable(compiler, variable),
        Expr::Binary(binary) => gen_binary(compiler, binary),
        Expr::Call(call) => gen_call(compiler, call),
    }
}

fn gen_variable<'a>(
    compiler: &Compiler<'a>,
    variable: &VariableExpr,
) -> Result<FloatValue<'a>, Error> {
    compiler
        .named_values
        .get(&variable.name)
        .copied()
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownVariable {
                    variable: variable.name.clone(),
                },
                variable.span.start.clone(),
            )
        })
}

fn gen_binary<'a>(
    compiler: &Compiler<'a>,
    binary: &BinaryExpr,
) -> Result<FloatValue<'a>, Error> {
    let left = gen_expression(compiler, &binary.left)?;
    let right = gen_expression(compiler, &binary.right)?;

    let position = &binary.span.start;
    let builder = &compiler.builder;

    let value = match binary.operator {
        '+' => builder.build_float_add(left, right, "addtmp"),
        '-' => builder.build_float_sub(left, right, "subtmp"),
        '*' => builder.build_float_mul(left, right, "multmp"),
        '/' => builder.build_float_div(left, right, "divtmp"),
        '<' => {
            let compared = builder
                .build_float_compare(FloatPredicate::ULT, left, right, "cmptmp")
                .map_err(|error| builder_error(error, position))?;

            // 0.0 or 1.0
            builder.build_unsigned_int_to_float(compared, compiler.number_type(), "booltmp")
        }
        operator => {
            return Err(Error::new(
                ErrorImpl::InvalidBinaryOperator { operator },
                position.clone(),
            ))
        }
    };

    value.map_err(|error| builder_error(error, position))
}

fn gen_call<'a>(compiler: &Compiler<'a>, call: &CallExpr) -> Result<FloatValue<'a>, Error> {
    let position = &call.span.start;

    let Some(function) = compiler.module.get_function(&call.callee) else {
        return Err(Error::new(
            ErrorImpl::UnknownFunction {
                function: call.callee.clone(),
            },
            position.clone(),
        ));
    };

    let expected = function.count_params() as usize;
    if expected != call.arguments.len() {
        return Err(Error::new(
            ErrorImpl::ArgumentCountMismatch {
                function: call.callee.clone(),
                expected,
                received: call.arguments.len(),
            },
            position.clone(),
        ));
    }

    let mut arguments: Vec<BasicMetadataValueEnum<'a>> = Vec::with_capacity(expected);
    for argument in &call.arguments {
        arguments.push(gen_expression(compiler, argument)?.into());
    }

    let call_site = compiler
        .builder
        .build_call(function, &arguments, "calltmp")
        .map_err(|error| builder_error(error, position))?;

    call_site
        .try_as_basic_value()
        .left()
        .map(|value| value.into_float_value())
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::BuilderError {
                    message: format!("call to {:?} produced no value", call.callee),
                },
                position.clone(),
            )
        })
}
