//! Serializer for the tree notation.

use treearbo_tree::Tree;

/// Render a tree in canonical notation.
///
/// A structural node with a single child keeps that child on its own line,
/// separated by one space; any other children go on the following lines,
/// one tab deeper. List nodes print only their children.
pub fn tree_to_string(tree: &Tree) -> String {
    let mut output = String::new();
    // Pending nodes with their depth and the tabs that precede them.
    let mut pending: Vec<(&Tree, usize, usize)> = vec![(tree, 0, 0)];

    while let Some((tree, depth, tabs)) = pending.pop() {
        output.extend(std::iter::repeat('\t').take(tabs));
        let mut depth = depth;

        if tree.is_struct() {
            // Top-level chains still indent their children by one tab.
            depth = depth.max(1);
            output.push_str(tree.ty());

            if let [only] = tree.kids() {
                output.push(' ');
                pending.push((only, depth, 0));
                continue;
            }

            output.push('\n');
        } else if !tree.value().is_empty() || depth > 0 {
            output.push('\\');
            output.push_str(tree.value());
            output.push('\n');
        }

        for kid in tree.kids().iter().rev() {
            pending.push((kid, depth + 1, depth));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use treearbo_tree::Span;

    fn label(ty: &str, kids: Vec<Tree>) -> Tree {
        Tree::structure(ty, kids, Span::unknown()).unwrap()
    }

    fn data(value: &str) -> Tree {
        Tree::data(value, vec![], Span::unknown())
    }

    fn root(kids: Vec<Tree>) -> Tree {
        Tree::wrap(kids, Span::unknown())
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(tree_to_string(&root(vec![])), "");
    }

    #[test]
    fn test_chain_is_inlined() {
        let tree = root(vec![label("a", vec![label("b", vec![label("c", vec![])])])]);

        assert_eq!(tree_to_string(&tree), "a b c\n");
    }

    #[test]
    fn test_siblings_are_indented() {
        let tree = root(vec![
            label(
                "a",
                vec![label("b", vec![]), label("c", vec![label("d", vec![]), data("v")])],
            ),
            label("e", vec![]),
        ]);

        assert_eq!(tree_to_string(&tree), "a\n\tb\n\tc\n\t\td\n\t\t\\v\ne\n");
    }

    #[test]
    fn test_data_leaf() {
        let tree = root(vec![label("password", vec![data("qwerty")]), data("top")]);

        assert_eq!(tree_to_string(&tree), "password \\qwerty\n\\top\n");
    }

    #[test]
    fn test_multiline_data() {
        let text = Tree::data("foo\nbar", vec![], Span::unknown());
        let tree = root(vec![label("text", vec![text])]);

        assert_eq!(tree_to_string(&tree), "text \\\n\t\\foo\n\t\\bar\n");
    }

    #[test]
    fn test_nested_list_prints_empty_data_line() {
        let tree = root(vec![label(
            "a",
            vec![label("b", vec![Tree::wrap(vec![label("x", vec![])], Span::unknown())])],
        )]);

        assert_eq!(tree_to_string(&tree), "a b \\\n\tx\n");
    }

    #[test]
    fn test_bare_struct() {
        let tree = label("a", vec![label("b", vec![]), label("c", vec![])]);

        assert_eq!(tree_to_string(&tree), "a\n\tb\n\tc\n");
    }

    #[test]
    fn test_deep_chain() {
        let mut node = label("a", vec![]);
        for _ in 1..5_000 {
            node = label("a", vec![node]);
        }

        let printed = tree_to_string(&root(vec![node]));
        assert_eq!(printed, vec!["a"; 5_000].join(" ") + "\n");
    }
}
