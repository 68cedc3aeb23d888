//! Select command - print the nodes found at a path.

use std::path::Path;
use treearbo_parser::tree_to_string;
use treearbo_tree::TreePath;

use super::source::Source;
use crate::config::Config;

pub fn run(file: &Path, segments: &[TreePath], config: &Config) -> miette::Result<()> {
    let source = Source::read(file, config)?;
    let tree = source.parse()?;

    let found = tree.select(segments);
    tracing::info!(
        path = %render_path(segments),
        matches = found.kids().len(),
        "selected"
    );

    print!("{}", tree_to_string(&found));

    if found.kids().is_empty() {
        Err(miette::miette!("Nothing found at {}", render_path(segments)))
    } else {
        Ok(())
    }
}

fn render_path(segments: &[TreePath]) -> String {
    let parts: Vec<String> = segments.iter().map(ToString::to_string).collect();
    format!("/{}", parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use treearbo_parser::string_to_tree;
    use treearbo_tree::path;

    #[test]
    fn test_render_path() {
        assert_eq!(render_path(&path!["user", 0, _]), "/user/0/*");
        assert_eq!(render_path(&[]), "/");
    }

    #[test]
    fn test_selection_prints_matches() {
        let tree = string_to_tree("user\n\tname \\ann\n\trole admin\nuser name \\bob\n", "t").unwrap();
        let found = tree.select(&path!["user", "name"]);

        assert_eq!(tree_to_string(&found), "name \\ann\nname \\bob\n");
    }
}
