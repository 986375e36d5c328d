use inkwell::values::FunctionValue;

use crate::{
    ast::declarations::{Function, Prototype},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    compiler::{builder_error, Compiler},
    expr::gen_expression,
};

/// Declares the function described by `prototype`.
///
/// An existing function with the same name is reused when its arity
/// matches, otherwise the declaration is rejected.
pub fn gen_prototype<'a>(
    compiler: &Compiler<'a>,
    prototype: &Prototype,
) -> Result<FunctionValue<'a>, Error> {
    if let Some(existing) = compiler.module.get_function(&prototype.name) {
        let expected = existing.count_params() as usize;

        if expected != prototype.arity() {
            return Err(Error::new(
                ErrorImpl::FunctionSignatureMismatch {
                    function: prototype.name.clone(),
                    expected,
                    received: prototype.arity(),
                },
                prototype.span.start.clone(),
            ));
        }

        log::debug!("reusing declaration of {:?}", prototype.name);
        return Ok(existing);
    }

    let function = compiler.create_function_proto(
        &prototype.name,
        compiler.function_type(prototype.arity()),
    );

    for (param, name) in function.get_param_iter().zip(&prototype.parameters) {
        param.into_float_value().set_name(name);
    }

    log::debug!("declared {}", prototype);

    Ok(function)
}

/// Lowers a function definition into the module.
///
/// On failure the module is left as it was: a new function is removed, a
/// function that was previously only declared goes back to being a bare
/// declaration.
pub fn gen_function<'a>(
    compiler: &mut Compiler<'a>,
    function: &Function,
) -> Result<FunctionValue<'a>, Error> {
    let prototype = &function.prototype;

    let previous = compiler.module.get_function(&prototype.name);
    if previous.is_some_and(|existing| existing.count_basic_blocks() > 0) {
        return Err(Error::new(
            ErrorImpl::FunctionRedefinition {
                function: prototype.name.clone(),
            },
            prototype.span.start.clone(),
        ));
    }

    let llvm_function = gen_prototype(compiler, prototype)?;

    let previous_names: Vec<String> = llvm_function
        .get_param_iter()
        .map(|param| {
            param
                .into_float_value()
                .get_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    compiler.named_values.clear();
    for (param, name) in llvm_function.get_param_iter().zip(&prototype.parameters) {
        let value = param.into_float_value();
        value.set_name(name);
        compiler.named_values.insert(name.clone(), value);
    }

    compiler.create_function_block(llvm_function);

    let lowered = gen_expression(compiler, &function.body).and_then(|body| {
        compiler
            .builder
            .build_return(Some(&body))
            .map_err(|error| builder_error(error, &function.body.get_span().start))
    });

    let result = match lowered {
        Ok(_) if llvm_function.verify(false) => Ok(llvm_function),
        Ok(_) => Err(Error::new(
            ErrorImpl::VerificationFailed {
                function: prototype.name.clone(),
            },
            function.span.start.clone(),
        )),
        Err(error) => Err(error),
    };

    compiler.named_values.clear();

    if result.is_err() {
        if previous.is_some() {
            restore_declaration(compiler, llvm_function, &previous_names);
        } else {
            log::debug!("removing partially lowered {:?}", prototype.name);
            compiler.remove_function(llvm_function);
        }
    }

    result
}

/// Strips the body from a function that existed as a declaration before
/// a failed definition.
fn restore_declaration<'a>(
    compiler: &Compiler<'a>,
    function: FunctionValue<'a>,
    names: &[String],
) {
    compiler.builder.clear_insertion_position();

    for block in function.get_basic_blocks() {
        // SAFETY: the blocks were created by the failed definition and
        // nothing outside the function refers to them.
        if unsafe { block.delete() }.is_err() {
            log::warn!("could not delete a block of {:?}", function.get_name());
        }
    }

    for (param, name) in function.get_param_iter().zip(names) {
        param.into_float_value().set_name(name);
    }

    log::debug!(
        "restored declaration of {:?}",
        function.get_name().to_string_lossy()
    );
}
