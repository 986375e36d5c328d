//! Main compiler module.
//!
//! This module contains the core Compiler structure that lowers parsed
//! top-level constructs into an LLVM module. It owns the LLVM module and
//! builder together with the name environment of the function currently
//! being lowered.

use std::{collections::HashMap, path::PathBuf};

use inkwell::{
    basic_block::BasicBlock,
    builder::{Builder, BuilderError},
    context::Context,
    module::{Linkage, Module},
    types::{BasicMetadataTypeEnum, FloatType, FunctionType},
    values::{FloatValue, FunctionValue},
};

use crate::{
    ast::ast::TopLevel,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::decl::{gen_function, gen_prototype};

/// The main compiler structure that holds the state of the lowering process.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the LLVM context
pub struct Compiler<'a> {
    /// Parameters of the function being lowered, by source name.
    /// Cleared at the start of every function.
    pub named_values: HashMap<String, FloatValue<'a>>,

    /// Reference to the LLVM context
    pub context: &'a Context,
    /// The LLVM module being built
    pub module: Module<'a>,
    /// The LLVM IR builder
    pub builder: Builder<'a>,
}

impl<'a> Compiler<'a> {
    /// Creates a new Compiler instance.
    ///
    /// # Arguments
    ///
    /// * `context` - Reference to the LLVM context
    /// * `module_name` - Name of the LLVM module that collects every function
    pub fn new(context: &'a Context, module_name: &str) -> Self {
        Compiler {
            named_values: HashMap::new(),
            module: context.create_module(module_name),
            builder: context.create_builder(),
            context,
        }
    }

    /// Lowers one top-level construct and returns the function it produced.
    ///
    /// Imports yield the declared function, definitions and top-level
    /// expressions the defined one.
    pub fn compile_top_level(&mut self, item: &TopLevel) -> Result<FunctionValue<'a>, Error> {
        let function = match item {
            TopLevel::Import(prototype) => gen_prototype(self, prototype)?,
            TopLevel::Definition(function) | TopLevel::Expression(function) => {
                gen_function(self, function)?
            }
        };

        log::debug!(
            "lowered `{}` into {:?}",
            item,
            function.get_name().to_string_lossy()
        );

        Ok(function)
    }

    /// The language's single numeric type.
    pub fn number_type(&self) -> FloatType<'a> {
        self.context.f64_type()
    }

    /// `double(double, ...)` with `arity` parameters.
    pub fn function_type(&self, arity: usize) -> FunctionType<'a> {
        let params: Vec<BasicMetadataTypeEnum<'a>> = vec![self.number_type().into(); arity];

        self.number_type().fn_type(&params, false)
    }

    /// Creates the function prototype in the module.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the function
    /// * `function_type` - LLVM function type signature
    ///
    /// # Returns
    ///
    /// The created function value with external linkage
    pub fn create_function_proto(
        &self,
        name: &str,
        function_type: FunctionType<'a>,
    ) -> FunctionValue<'a> {
        self.module
            .add_function(name, function_type, Some(Linkage::External))
    }

    /// Creates the entry basic block for a function.
    ///
    /// Positions the builder at the end of the entry block so code
    /// generation can begin.
    pub fn create_function_block(&self, function: FunctionValue<'a>) -> BasicBlock<'a> {
        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);

        entry
    }

    /// Removes a function from the module.
    ///
    /// The builder is detached first, since it may still point into the
    /// function's blocks.
    pub fn remove_function(&self, function: FunctionValue<'a>) {
        self.builder.clear_insertion_position();

        // SAFETY: the function is only referenced by the caller's handle,
        // which is consumed here; lowering never keeps values across functions.
        unsafe { function.delete() };
    }

    /// Prints the whole module as textual LLVM IR.
    pub fn print_to_string(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// Saves the module to a file as textual LLVM IR.
    ///
    /// # Arguments
    ///
    /// * `output_file` - Path where the module file should be written
    pub fn save_module_to_file(&self, output_file: PathBuf) -> Result<(), String> {
        self.module
            .print_to_file(output_file)
            .map_err(|error| error.to_string())
    }

    /// Runs the LLVM verifier over the whole module.
    pub fn verify_module(&self) -> Result<(), String> {
        self.module.verify().map_err(|error| error.to_string())
    }
}

/// Wraps an inkwell builder failure into a compiler error.
pub fn builder_error(error: BuilderError, position: &Position) -> Error {
    Error::new(
        ErrorImpl::BuilderError {
            message: error.to_string(),
        },
        position.clone(),
    )
}
