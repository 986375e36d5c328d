//! Top-level loop tying the parser to the compiler.
//!
//! The driver pulls one construct at a time from the parser, lowers it and
//! reports the outcome. Errors never stop the loop except for lexical ones,
//! which end the input.

use std::io::Write;

use inkwell::values::AnyValue;

use crate::{
    ast::ast::TopLevel,
    compiler::compiler::Compiler,
    display_error,
    errors::errors::{Error, ErrorImpl, ErrorPhase},
    lexer::lexer::ReadFailure,
    parser::parser::Parser,
};

/// Prompt shown before each construct when reading from a terminal.
pub const PROMPT: &str = "is-> ";

#[derive(Debug, Clone, Default)]
pub struct DriverOptions {
    /// Keep the anonymous functions of top-level expressions in the module
    pub keep_anonymous: bool,
    /// Print [`PROMPT`] before reading each construct
    pub interactive: bool,
}

/// Outcome of a [`Driver::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub accepted: usize,
    pub errors: usize,
}

impl Summary {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

pub struct Driver<'a> {
    parser: Parser,
    compiler: Compiler<'a>,
    options: DriverOptions,
    /// Full source text, when known, for error excerpts
    source: Option<String>,
    /// Set by the input stream when reading stops on an error
    input_failure: Option<ReadFailure>,
    summary: Summary,
}

impl<'a> Driver<'a> {
    pub fn new(parser: Parser, compiler: Compiler<'a>, options: DriverOptions) -> Self {
        Driver {
            parser,
            compiler,
            options,
            source: None,
            input_failure: None,
            summary: Summary::default(),
        }
    }

    /// Attaches the source text so reported errors can quote it.
    pub fn with_source(mut self, source: String) -> Self {
        self.source = Some(source);
        self
    }

    /// Watches the slot a [`crate::lexer::lexer::line_chars`] stream
    /// records its read error in, so a failed read is reported instead of
    /// being taken for the end of the input.
    pub fn with_input_failure(mut self, failure: ReadFailure) -> Self {
        self.input_failure = Some(failure);
        self
    }

    pub fn compiler(&self) -> &Compiler<'a> {
        &self.compiler
    }

    pub fn into_compiler(self) -> Compiler<'a> {
        self.compiler
    }

    /// Processes every construct until the input ends.
    pub fn run(&mut self) -> Summary {
        loop {
            self.prompt();

            match self.parser.parse_top_level() {
                Ok(None) => break,
                Ok(Some(item)) => self.handle(&item),
                Err(error) => {
                    self.report(&error);

                    if error.get_phase() == ErrorPhase::Lexical {
                        break;
                    }

                    // Skip the offending token and try again
                    if let Err(error) = self.parser.skip_token() {
                        self.report(&error);
                        break;
                    }
                }
            }
        }

        self.check_input();

        log::info!(
            "{} constructs accepted, {} errors",
            self.summary.accepted,
            self.summary.errors
        );

        self.summary
    }

    fn handle(&mut self, item: &TopLevel) {
        let start = &item.get_span().start;
        log::debug!("lowering construct at {}:{}", start.1, start.0);

        let function = match self.compiler.compile_top_level(item) {
            Ok(function) => function,
            Err(error) => return self.report(&error),
        };

        let label = match item {
            TopLevel::Definition(_) => "Read function definition:",
            TopLevel::Import(_) => "Read import:",
            TopLevel::Expression(_) => "Read top-level expression:",
        };
        eprintln!("{}", label);
        eprintln!("{}", function.print_to_string().to_string().trim_end());

        self.summary.accepted += 1;

        if matches!(item, TopLevel::Expression(_)) && !self.options.keep_anonymous {
            self.compiler.remove_function(function);
        }
    }

    fn check_input(&mut self) {
        let Some(failure) = self
            .input_failure
            .as_ref()
            .and_then(|failure| failure.borrow_mut().take())
        else {
            return;
        };

        let error = Error::new(
            ErrorImpl::InputUnreadable {
                message: failure.to_string(),
            },
            self.parser.end_position(),
        );
        self.report(&error);
    }

    fn report(&mut self, error: &Error) {
        log::debug!("{:?} error: {}", error.get_phase(), error);

        display_error(error, self.source.as_deref());
        self.summary.errors += 1;
    }

    fn prompt(&self) {
        if !self.options.interactive {
            return;
        }

        eprint!("{}", PROMPT);
        let _ = std::io::stderr().flush();
    }
}
