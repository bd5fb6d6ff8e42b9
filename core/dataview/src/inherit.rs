//! FILENAME: core/dataview/src/inherit.rs
//! PURPOSE: Copy-on-write wrapper for nodes shared between data view owners.
//! CONTEXT: Groups and group lists are handed out as `Rc` snapshots. A transform
//! that needs to change one wraps it in `Inherited`, which clones the node on
//! the first mutation and reuses that clone for every later mutation. The
//! original node is never written to, so other owners keep seeing it as it was.

use std::ops::Deref;
use std::rc::Rc;

/// A node that may still be shared with other owners.
///
/// The "already cloned" tag is stored here, on the wrapper, so it lives exactly
/// as long as one transform pass holds the node.
#[derive(Debug)]
pub struct Inherited<T> {
    node: Rc<T>,
    inherited: bool,
}

impl<T: Clone> Inherited<T> {
    /// Wraps a node that may be shared. The first mutation will clone it.
    pub fn new(node: Rc<T>) -> Self {
        Inherited {
            node,
            inherited: false,
        }
    }

    /// Wraps a node created by the current pass. It is already owned, so
    /// mutating it never clones.
    pub fn fresh(value: T) -> Self {
        Inherited {
            node: Rc::new(value),
            inherited: true,
        }
    }

    /// True once the node has been cloned (or was created fresh) in this pass.
    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// Returns a mutable reference to this pass's private copy of the node.
    ///
    /// The first call replaces the shared node with a shallow clone; every
    /// subsequent call returns that same clone.
    pub fn inherit_single(&mut self) -> &mut T {
        if !self.inherited {
            self.node = Rc::new(T::clone(&self.node));
            self.inherited = true;
        }
        // The clone is uniquely owned here, so this never copies again.
        Rc::make_mut(&mut self.node)
    }

    /// Releases the node back into shared form.
    pub fn into_shared(self) -> Rc<T> {
        self.node
    }
}

impl<T> Deref for Inherited<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.node
    }
}

/// Copy-on-write access to an optional node. `None` is passed through as-is.
pub fn inherit_single<T: Clone>(node: Option<&mut Inherited<T>>) -> Option<&mut T> {
    node.map(Inherited::inherit_single)
}
