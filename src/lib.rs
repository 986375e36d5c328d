#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod compiler;
pub mod driver;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing the byte offset `position`.
///
/// Returns the 1-based line number, the text of the line and the offset of
/// `position` inside that line. An offset at the very end of the source
/// (errors found at end of input) maps to just past the last line's text.
/// Returns `None` when the offset is beyond that or the source is empty.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last = None;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        last = Some((line_number, line));
        start = end;
        line_number += 1;
    }

    // pos == source.len()
    last.map(|(line_number, line)| {
        let line_pos = line.trim_end_matches(&['\n', '\r'][..]).len();
        (line_number, line.to_string(), line_pos)
    })
}


/// Prints a diagnostic for `error` to stderr.
///
/// When the source text is known the offending line is shown with a caret
/// under the error position; interactive input only gets the message.
pub fn display_error(error: &Error, source: Option<&str>) {
    /*
        Error: message
        -> main.is
           |
        20 | fn f(x y) x + z
           | --------------^
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }

    let Some((line, line_text, line_pos)) =
        source.and_then(|source| get_line_at_position(source, position.0))
    else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("-> {}", position.1);
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
