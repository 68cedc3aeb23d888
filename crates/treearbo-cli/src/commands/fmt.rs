//! Fmt command - print a file in canonical notation.

use std::path::Path;
use treearbo_parser::tree_to_string;

use super::source::Source;
use crate::config::Config;

pub fn run(file: &Path, check: bool, config: &Config) -> miette::Result<()> {
    let source = Source::read(file, config)?;
    let tree = source.parse()?;
    let formatted = tree_to_string(&tree);

    if !check {
        print!("{}", formatted);
        return Ok(());
    }

    if formatted == source.text {
        tracing::info!(uri = %source.uri, "already canonical");
        Ok(())
    } else {
        let line = first_difference(&source.text, &formatted);
        Err(miette::miette!(
            "{} is not in canonical form (first difference on line {})",
            source.uri,
            line
        ))
    }
}

/// 1-based number of the first line where the two texts differ.
fn first_difference(left: &str, right: &str) -> usize {
    let mut left_lines = left.split('\n');
    let mut right_lines = right.split('\n');
    let mut line = 1;

    loop {
        match (left_lines.next(), right_lines.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            _ => return line,
        }
    }
}
