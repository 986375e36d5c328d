use std::collections::HashMap;

use super::parser::Parser;

/// Binding strength of the built-in binary operators, higher binds tighter.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Relational = 10,
    Additive = 20,
    Multiplicative = 40,
}

pub fn create_precedence_lookups(parser: &mut Parser) {
    // Relational
    parser.binop('<', BindingPower::Relational as i32);

    // Additive and multiplicative
    parser.binop('+', BindingPower::Additive as i32);
    parser.binop('-', BindingPower::Additive as i32);
    parser.binop('*', BindingPower::Multiplicative as i32);
    parser.binop('/', BindingPower::Multiplicative as i32);
}

// Lookup table inside parser struct, so it's easier
pub type PrecedenceLookup = HashMap<char, i32>;
