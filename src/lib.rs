pub mod cli;
pub mod sql;

pub use sql::{recognize, recognize_exact, ParseError, SelectStatement};
