mod cli;

use std::{
    fs,
    io::{self, IsTerminal},
    process,
    rc::Rc,
};

use clap::Parser as _;
use inkwell::context::Context;
use isere::{
    compiler::compiler::Compiler,
    driver::{Driver, DriverOptions},
    lexer::lexer::{line_chars, Lexer, ReadFailure},
    parser::parser::Parser,
};

fn main() {
    env_logger::init();

    let cli = cli::Cli::parse();

    let context = Context::create();
    let compiler = Compiler::new(&context, &cli.module_name);
    let options = DriverOptions {
        keep_anonymous: cli.keep_anonymous,
        interactive: false,
    };

    let mut driver = match &cli.file {
        Some(path) => {
            let source = match fs::read_to_string(path) {
                Ok(source) => source,
                Err(why) => {
                    eprintln!("Failed to read {path:?}: {why}");
                    process::exit(1);
                }
            };

            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            let parser = Parser::from_source(source.clone(), file_name);

            Driver::new(parser, compiler, options).with_source(source)
        }
        None => {
            let interactive = io::stdin().is_terminal();
            let failure = ReadFailure::default();
            let chars = line_chars(io::stdin().lock(), Rc::clone(&failure));
            let parser = Parser::new(Lexer::new(chars, None));

            Driver::new(
                parser,
                compiler,
                DriverOptions {
                    interactive,
                    ..options
                },
            )
            .with_input_failure(failure)
        }
    };

    let summary = driver.run();
    let compiler = driver.into_compiler();

    if let Err(why) = compiler.verify_module() {
        log::warn!("module failed verification: {why}");
    }

    match &cli.output {
        Some(output) => {
            if let Err(why) = compiler.save_module_to_file(output.clone()) {
                eprintln!("Failed to write {output:?}: {why}");
                process::exit(1);
            }
            log::info!("wrote module to {output:?}");
        }
        None => print!("{}", compiler.print_to_string()),
    }

    if summary.has_errors() {
        process::exit(1);
    }
}
