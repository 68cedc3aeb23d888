//! Info command - show information about this build.

pub(crate) fn run() -> miette::Result<()> {
    println!("Treearbo tree notation");
    println!("======================");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Components:");
    println!("  treearbo-tree    - Tree values, path edits and rewrite passes");
    println!("  treearbo-parser  - Notation parser and printer");
    println!();

    println!("Notation:");
    println!("  TAB        one nesting level");
    println!("  a b c      chain of nested structural nodes");
    println!("  \\text      data value up to the end of the line");
    println!();

    println!("Environment:");
    println!("  TREEARBO_LOG  log filter (default: warn)");
    println!("  TREEARBO_URI  name reported for stdin (default: ?)");

    Ok(())
}
