//! Parse layer: the token walk and the results it produces.

pub mod parser;
pub mod result;

pub use parser::Parser;
pub use result::{CommandResult, ParseOutcome, ParseResultRoot};
