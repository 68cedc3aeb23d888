//! Tree node definition and construction.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::error::TreeError;
use crate::Span;

/// Characters that may not appear in a structural label.
pub const FORBIDDEN_TYPE_CHARS: [char; 4] = [' ', '\t', '\n', '\\'];

/// An immutable tree node.
///
/// A node is either structural (non-empty `ty`), data (non-empty `value`, or
/// continuation lines as children) or a list wrapping its children with
/// neither. Children are reference counted, so cloning a node and every edit
/// share untouched subtrees with the original.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tree {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    ty: SmolStr,
    value: SmolStr,
    kids: Arc<[Tree]>,
    span: Span,
}

impl Tree {
    /// Create a structural node.
    pub fn structure(
        ty: impl Into<SmolStr>,
        kids: Vec<Tree>,
        span: Span,
    ) -> Result<Self, TreeError> {
        let ty = ty.into();
        if ty.is_empty() {
            return Err(TreeError::EmptyType);
        }
        if ty.contains(&FORBIDDEN_TYPE_CHARS[..]) {
            return Err(TreeError::WrongType { ty });
        }
        Ok(Self {
            ty,
            value: SmolStr::default(),
            kids: kids.into(),
            span,
        })
    }

    /// Create a data node.
    ///
    /// A multi-line value is split into one data child per line, placed
    /// before `kids`, and the node itself keeps an empty value.
    pub fn data(value: impl Into<SmolStr>, kids: Vec<Tree>, span: Span) -> Self {
        let value = value.into();
        if !value.contains('\n') {
            return Self {
                ty: SmolStr::default(),
                value,
                kids: kids.into(),
                span,
            };
        }

        let line_span = span.span(span.row(), span.col(), 0);
        let lines = value.split('\n').map(|line| Self {
            ty: SmolStr::default(),
            value: SmolStr::from(line),
            kids: Vec::new().into(),
            span: line_span.after(line.chars().count()),
        });

        Self {
            ty: SmolStr::default(),
            value: SmolStr::default(),
            kids: lines.chain(kids).collect(),
            span,
        }
    }

    /// Create a list node grouping `kids`.
    pub fn wrap(kids: Vec<Tree>, span: Span) -> Self {
        Self {
            ty: SmolStr::default(),
            value: SmolStr::default(),
            kids: kids.into(),
            span,
        }
    }

    /// Create a structural node located at this node.
    pub fn derive_struct(
        &self,
        ty: impl Into<SmolStr>,
        kids: Vec<Tree>,
    ) -> Result<Self, TreeError> {
        Self::structure(ty, kids, self.span.clone())
    }

    /// Create a data node located at this node.
    pub fn derive_data(&self, value: impl Into<SmolStr>, kids: Vec<Tree>) -> Self {
        Self::data(value, kids, self.span.clone())
    }

    /// Create a list node located at this node.
    pub fn derive_wrap(&self, kids: Vec<Tree>) -> Self {
        Self::wrap(kids, self.span.clone())
    }

    /// Copy this node with new children.
    pub fn clone_with(&self, kids: Vec<Tree>) -> Self {
        self.clone_at(kids, self.span.clone())
    }

    /// Copy this node with new children and a new span.
    pub fn clone_at(&self, kids: Vec<Tree>, span: Span) -> Self {
        Self {
            ty: self.ty.clone(),
            value: self.value.clone(),
            kids: kids.into(),
            span,
        }
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kids(&self) -> &[Tree] {
        &self.kids
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn is_struct(&self) -> bool {
        !self.ty.is_empty()
    }

    pub fn is_data(&self) -> bool {
        self.ty.is_empty() && !self.value.is_empty()
    }

    pub fn is_list(&self) -> bool {
        self.ty.is_empty() && self.value.is_empty()
    }

    /// Join the value with the values of the direct data children.
    pub fn text(&self) -> String {
        let lines: Vec<&str> = self
            .kids
            .iter()
            .filter(|kid| kid.ty.is_empty())
            .map(|kid| kid.value.as_str())
            .collect();

        let mut text = String::from(self.value.as_str());
        text.push_str(&lines.join("\n"));
        text
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ty.is_empty() {
            write!(f, "\\{}", self.value)
        } else {
            f.write_str(&self.ty)
        }
    }
}

impl Drop for Tree {
    // Unshared subtrees are unlinked onto a heap stack first, so dropping a
    // deep tree does not recurse once per level.
    fn drop(&mut self) {
        if self.kids.is_empty() {
            return;
        }

        let mut pending = vec![std::mem::replace(&mut self.kids, Vec::new().into())];
        while let Some(mut kids) = pending.pop() {
            let Some(kids) = Arc::get_mut(&mut kids) else {
                continue;
            };
            for kid in kids.iter_mut().filter(|kid| !kid.kids.is_empty()) {
                pending.push(std::mem::replace(&mut kid.kids, Vec::new().into()));
            }
        }
    }
}
