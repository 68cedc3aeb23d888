//! Path-addressed queries and edits.
//!
//! Edits never touch the receiver: every level along the path is rebuilt
//! with [`Tree::clone_with`] while siblings off the path are shared.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::error::TreeError;
use crate::Tree;

/// One step of a tree path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TreePath {
    /// Children with this structural label
    Type(SmolStr),
    /// The child at this position
    Index(usize),
    /// Every child
    Any,
}

impl From<&str> for TreePath {
    fn from(ty: &str) -> Self {
        TreePath::Type(ty.into())
    }
}

impl From<String> for TreePath {
    fn from(ty: String) -> Self {
        TreePath::Type(ty.into())
    }
}

impl From<SmolStr> for TreePath {
    fn from(ty: SmolStr) -> Self {
        TreePath::Type(ty)
    }
}

impl From<usize> for TreePath {
    fn from(index: usize) -> Self {
        TreePath::Index(index)
    }
}

impl FromStr for TreePath {
    type Err = Infallible;

    /// `*` is the wildcard, decimal digits an index, anything else a label.
    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        if segment == "*" {
            return Ok(TreePath::Any);
        }
        match segment.parse::<usize>() {
            Ok(index) if segment.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(TreePath::Index(index))
            }
            _ => Ok(TreePath::Type(segment.into())),
        }
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreePath::Type(ty) => f.write_str(ty),
            TreePath::Index(index) => write!(f, "{}", index),
            TreePath::Any => f.write_str("*"),
        }
    }
}

/// Build an array of [`TreePath`] segments.
///
/// String-like segments become labels, integers become indices and `_`
/// is the wildcard:
///
/// ```
/// use treearbo_tree::{path, TreePath};
///
/// let path = path!["config", 0, _];
/// assert_eq!(path[1], TreePath::Index(0));
/// assert_eq!(path[2], TreePath::Any);
/// ```
#[macro_export]
macro_rules! path {
    (@segment _) => {
        $crate::TreePath::Any
    };
    (@segment $segment:expr) => {
        $crate::TreePath::from($segment)
    };
    ($($segment:tt),* $(,)?) => {
        [$($crate::path!(@segment $segment)),*]
    };
}

impl Tree {
    /// Collect the nodes reached by `path`, wrapped in a list node.
    ///
    /// An empty path selects the receiver itself.
    pub fn select(&self, path: &[TreePath]) -> Tree {
        let mut next = vec![self.clone()];

        for segment in path {
            if next.is_empty() {
                break;
            }

            let prev = std::mem::take(&mut next);
            for item in &prev {
                match segment {
                    TreePath::Type(ty) => next.extend(
                        item.kids()
                            .iter()
                            .filter(|kid| kid.ty() == ty.as_str())
                            .cloned(),
                    ),
                    TreePath::Index(index) => next.extend(item.kids().get(*index).cloned()),
                    TreePath::Any => next.extend(item.kids().iter().cloned()),
                }
            }
        }

        self.derive_wrap(next)
    }

    /// Keep the children that have a match for `path`.
    ///
    /// With `value`, a match only counts when one of the selected nodes
    /// carries exactly that value.
    pub fn filter(&self, path: &[TreePath], value: Option<&str>) -> Tree {
        let kids = self
            .kids()
            .iter()
            .filter(|item| {
                let found = item.select(path);
                match value {
                    None => !found.kids().is_empty(),
                    Some(value) => found.kids().iter().any(|kid| kid.value() == value),
                }
            })
            .cloned()
            .collect();

        self.clone_with(kids)
    }

    /// Put `value` in place of the nodes addressed by `path`.
    ///
    /// Missing labels along the path are created as structural nodes and
    /// missing indices are padded with empty list nodes, so the call fails
    /// only when a label to create is not a valid structural type. An empty
    /// label is never created: it fails with [`TreeError::EmptyType`], and an
    /// index segment is the way to address a list child.
    pub fn insert(&self, value: &Tree, path: &[TreePath]) -> Result<Tree, TreeError> {
        Ok(self
            .splice(Some(value), path)?
            .unwrap_or_else(|| value.clone()))
    }

    /// Drop the nodes addressed by `path`.
    ///
    /// Returns `None` only for an empty path, which addresses the receiver.
    pub fn remove(&self, path: &[TreePath]) -> Option<Tree> {
        self.splice(None, path).ok().flatten()
    }

    fn splice(&self, value: Option<&Tree>, path: &[TreePath]) -> Result<Option<Tree>, TreeError> {
        let Some((segment, rest)) = path.split_first() else {
            return Ok(value.cloned());
        };

        let kids = match segment {
            TreePath::Type(ty) => {
                let mut matched = false;
                let mut kids = Vec::with_capacity(self.kids().len() + 1);

                for kid in self.kids() {
                    if kid.ty() != ty.as_str() {
                        kids.push(kid.clone());
                        continue;
                    }
                    matched = true;
                    kids.extend(kid.splice(value, rest)?);
                }

                if let (false, Some(value)) = (matched, value) {
                    let fresh = self.derive_struct(ty.clone(), Vec::new())?;
                    kids.extend(fresh.splice(Some(value), rest)?);
                }

                kids
            }
            TreePath::Index(index) => {
                let index = *index;
                if value.is_none() && index >= self.kids().len() {
                    return Ok(Some(self.clone()));
                }

                let mut kids = self.kids().to_vec();
                while kids.len() <= index {
                    kids.push(self.derive_wrap(Vec::new()));
                }

                match kids[index].splice(value, rest)? {
                    Some(kid) => kids[index] = kid,
                    None => {
                        kids.remove(index);
                    }
                }

                kids
            }
            TreePath::Any => {
                if self.kids().is_empty() && value.is_none() {
                    return Ok(Some(self.clone()));
                }

                let targets = if self.kids().is_empty() {
                    vec![self.derive_wrap(Vec::new())]
                } else {
                    self.kids().to_vec()
                };

                let mut kids = Vec::with_capacity(targets.len());
                for target in &targets {
                    kids.extend(target.splice(value, rest)?);
                }
                kids
            }
        };

        Ok(Some(self.clone_with(kids)))
    }
}
