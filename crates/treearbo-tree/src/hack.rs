//! Type-keyed rewrite passes.
//!
//! A [`Belt`] maps structural labels to handlers. Each handler turns one node
//! into zero or more replacement nodes and decides itself whether to descend
//! into the children, usually by calling [`Tree::hack`] on the node it got.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::Tree;

/// A rewrite handler: node, belt and context in, replacement nodes out.
pub type Handler<'a, C> = Box<dyn Fn(&Tree, &Belt<'a, C>, &mut C) -> Vec<Tree> + 'a>;

/// Handlers keyed by node type.
///
/// The empty key is the fallback for any type without its own handler.
pub struct Belt<'a, C = ()> {
    handlers: FxHashMap<SmolStr, Handler<'a, C>>,
}

impl<'a, C> Default for Belt<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> Belt<'a, C> {
    /// Create an empty belt; every node is kept and its children rewritten.
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register the handler for nodes of type `ty`.
    pub fn on(
        mut self,
        ty: impl Into<SmolStr>,
        handler: impl Fn(&Tree, &Belt<'a, C>, &mut C) -> Vec<Tree> + 'a,
    ) -> Self {
        self.handlers.insert(ty.into(), Box::new(handler));
        self
    }

    /// Register the handler for types that have none of their own.
    pub fn fallback(
        self,
        handler: impl Fn(&Tree, &Belt<'a, C>, &mut C) -> Vec<Tree> + 'a,
    ) -> Self {
        self.on("", handler)
    }

    /// Look up the handler for a node type.
    pub fn handler(&self, ty: &str) -> Option<&Handler<'a, C>> {
        self.handlers.get(ty).or_else(|| self.handlers.get(""))
    }
}

impl<'a, C> std::fmt::Debug for Belt<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&str> = self.handlers.keys().map(SmolStr::as_str).collect();
        types.sort_unstable();
        f.debug_struct("Belt").field("types", &types).finish()
    }
}

impl Tree {
    /// Rewrite every child and concatenate the replacements in order.
    pub fn hack<C>(&self, belt: &Belt<'_, C>, context: &mut C) -> Vec<Tree> {
        let mut out = Vec::with_capacity(self.kids().len());
        for kid in self.kids() {
            out.extend(kid.hack_self(belt, context));
        }
        out
    }

    /// Rewrite this node alone.
    ///
    /// Without a matching handler the node is kept and its children are
    /// rewritten.
    pub fn hack_self<C>(&self, belt: &Belt<'_, C>, context: &mut C) -> Vec<Tree> {
        match belt.handler(self.ty()) {
            Some(handler) => handler(self, belt, context),
            None => vec![self.clone_with(self.hack(belt, context))],
        }
    }
}
