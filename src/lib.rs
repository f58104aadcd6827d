#![warn(clippy::disallowed_types)]

pub use classify::{classify, MainOperator};
pub use parser::{parse, Expression, ParseError, ParsedFormula};
pub use symbols::*;
pub use truth_table::{generate_table, TruthTable, TruthTableEntry};

pub mod classify;
pub mod parser;
pub mod parser_io;
pub mod table_io;
pub mod translate;
pub mod truth_table;

mod symbols;
