//! # Treearbo Parser
//!
//! Converts between tree notation text and [`Tree`] values.
//!
//! The notation is line oriented: leading tabs give the nesting depth,
//! space-separated labels on one line form a chain of nested structural
//! nodes, and a backslash starts a data value running to the end of the line.
//!
//! ## Example
//!
//! ```
//! use treearbo_parser::{string_to_tree, tree_to_string};
//!
//! let source = "server\n\thost \\localhost\n\tport \\8080\n";
//!
//! let tree = string_to_tree(source, "server.tree").unwrap();
//! assert_eq!(tree.kids()[0].ty(), "server");
//! assert_eq!(tree_to_string(&tree), source);
//! ```

mod error;
mod parser;
mod printer;

pub use error::StringToTreeError;
pub use parser::Parser;
pub use printer::tree_to_string;

use treearbo_tree::Tree;

/// Parse notation text into a list node holding the top-level nodes.
///
/// `uri` names the source in spans and error messages.
pub fn string_to_tree(source: &str, uri: &str) -> Result<Tree, StringToTreeError> {
    Parser::new(source, uri).parse()
}
