#![warn(clippy::uninlined_format_args)]

pub mod parser;

pub use parser::JsonLedgerParser;
