//! CLI commands.

pub mod check;
pub mod fmt;
pub mod info;
pub mod parse;
pub mod select;

mod source;
