use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::mem::ManuallyDrop;

use super::release_chain;
use crate::SmartPointer;

/// A single list cell: a value and a counted link to the next cell.
///
/// The link sits behind a [`RefCell`] so it can be rewired through a shared
/// [`SmartPointer`], which is also what makes it possible to build a cycle.
///
/// Dropping a node releases the rest of its chain iteratively, so letting go of
/// the last pointer to a long chain never recurses once per node.
pub struct Node<T> {
    data: T,
    pub(super) next: RefCell<SmartPointer<Node<T>>>,
}

impl<T> Node<T> {
    /// A node with no successor.
    pub fn new(data: T) -> Self {
        Self { data, next: RefCell::new(SmartPointer::null()) }
    }

    pub fn get(&self) -> &T {
        &self.data
    }

    /// Returns another pointer to the next node, bumping its count.
    pub fn get_next(&self) -> SmartPointer<Node<T>> {
        self.next.borrow().clone()
    }

    /// Links this node to `next`, keeping a share of it.
    ///
    /// Whatever this node pointed at before is released.
    pub fn set_next(&self, next: &SmartPointer<Node<T>>) {
        // NOTE: the old link is dropped after the `RefCell` borrow has ended
        let old = self.next.replace(next.clone());
        drop(old)
    }

    /// Unlinks this node from its successor and hands back the link.
    pub fn take_next(&self) -> SmartPointer<Node<T>> {
        self.next.take()
    }

    pub fn has_next(&self) -> bool {
        !self.next.borrow().is_null()
    }

    /// Moves the value out, releasing the link to the next node.
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        let next = this.next.get_mut().take();
        // SAFETY: `this` is never dropped or touched again, so `data` is moved out exactly once.
        //         The link left behind is null and owns nothing.
        let data = unsafe { std::ptr::read(&this.data) };
        release_chain(next);
        data
    }
}

impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        release_chain(self.next.get_mut().take())
    }
}

// NOTE: this doesn't follow `next`, since nodes can form cycles
impl<T: Debug> Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("data", &self.data)
            .field("has_next", &self.has_next())
            .finish()
    }
}
