//! Parse command - parse a file and show its nodes.

use std::path::Path;
use treearbo_tree::Tree;

use super::source::Source;
use crate::config::Config;

pub fn run(file: &Path, json: bool, config: &Config) -> miette::Result<()> {
    let source = Source::read(file, config)?;
    let tree = source.parse()?;

    if json {
        let rendered = serde_json::to_string_pretty(&tree)
            .map_err(|e| miette::miette!("Failed to serialize tree: {}", e))?;
        println!("{}", rendered);
    } else {
        print!("{}", render(&tree));
        println!("\n{} top-level nodes", tree.kids().len());
    }

    Ok(())
}

/// One line per node: indentation, label or `\value`, and the span.
fn render(tree: &Tree) -> String {
    let mut output = String::new();
    for kid in tree.kids() {
        render_node(&mut output, kid, 0);
    }
    output
}

fn render_node(output: &mut String, node: &Tree, indent: usize) {
    let prefix = "  ".repeat(indent);
    let label = if node.is_list() {
        "(list)".to_string()
    } else {
        node.to_string()
    };
    output.push_str(&format!("{}{}  @ {}\n", prefix, label, node.span()));

    for kid in node.kids() {
        render_node(output, kid, indent + 1);
    }
}
