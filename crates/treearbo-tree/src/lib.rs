//! # Treearbo Tree
//!
//! Immutable ordered trees for the treearbo notation.
//!
//! Every node carries either a structural type label or an opaque data value,
//! a list of children and the [`Span`] it came from. Nodes are never mutated:
//! path edits ([`Tree::insert`], [`Tree::remove`]) and rewrite passes
//! ([`Tree::hack`]) build new trees that share untouched subtrees.
//!
//! ## Example
//!
//! ```
//! use treearbo_tree::{path, Span, Tree};
//!
//! let leaf = Tree::data("secret", vec![], Span::unknown());
//! let root = Tree::wrap(vec![], Span::unknown())
//!     .insert(&leaf, &path!["config", "password", 0])
//!     .unwrap();
//!
//! assert_eq!(root.select(&path!["config", "password", 0]).kids(), &[leaf]);
//! ```

mod error;
mod hack;
mod path;
mod span;
mod tree;

pub use error::{SpanError, TreeError};
pub use hack::{Belt, Handler};
pub use path::TreePath;
pub use span::Span;
pub use tree::{Tree, FORBIDDEN_TYPE_CHARS};
