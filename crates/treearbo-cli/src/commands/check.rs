//! Check command - check files for syntax errors.

use std::path::{Path, PathBuf};

use super::source::Source;
use crate::config::Config;

pub fn run(files: &[PathBuf], config: &Config) -> miette::Result<()> {
    if files.is_empty() {
        return Err(miette::miette!("No files specified"));
    }

    let mut failed = 0;
    for file in files {
        if !check_file(file, config)? {
            failed += 1;
        }
    }

    println!();
    if failed > 0 {
        println!("Check complete: {} of {} file(s) failed", failed, files.len());
        Err(miette::miette!("{} file(s) with errors", failed))
    } else {
        println!("Check complete: no issues found");
        Ok(())
    }
}

fn check_file(file: &Path, config: &Config) -> miette::Result<bool> {
    let source = Source::read(file, config)?;

    println!("Checking: {}", source.uri);

    match source.parse() {
        Ok(tree) => {
            tracing::debug!(uri = %source.uri, nodes = tree.kids().len(), "ok");
            println!("  ok");
            Ok(true)
        }
        Err(report) => {
            eprintln!("{:?}", report);
            Ok(false)
        }
    }
}
