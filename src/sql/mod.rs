//! The input to the front-end is a SQL query. The output is the attribute list
//! and table name of a `SELECT <attributes> FROM <table>` statement.
pub mod cursor;
pub mod error;
pub mod statement;
pub mod token;

pub use error::ParseError;
pub use statement::{recognize, recognize_exact, recognize_tokens, SelectStatement};
pub use token::{tokenize, Token};
