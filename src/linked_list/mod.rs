//! A LIFO singly-linked list whose links are [`SmartPointer`]s.

use std::fmt::{self, Debug};

use log::debug;

use crate::{AccessError, SmartPointer};

mod iter;
mod node;

pub use iter::LinkedListIterator;
pub use node::Node;


/// A singly-linked list where the most recently pushed value is the head.
pub struct LinkedList<T> {
    head: SmartPointer<Node<T>>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub const fn new() -> Self {
        Self { head: SmartPointer::null(), len: 0 }
    }

    /// The number of values pushed and not yet popped.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_null()
    }

    /// Another pointer to the head node, or null if the list is empty.
    pub fn head(&self) -> SmartPointer<Node<T>> {
        self.head.clone()
    }

    /// Complexity: O(1)
    pub fn push(&mut self, data: T) {
        let node = SmartPointer::new(Node::new(data));
        node.set_next(&self.head);
        self.head = node;
        self.len += 1;
    }

    /// Removes the head and returns its value.
    ///
    /// The detached node is unlinked from the rest of the list, so an iterator that is
    /// currently parked on it will stop after yielding it. Its value is moved out when
    /// nothing else points at the node, and cloned otherwise.
    ///
    /// Complexity: O(1)
    pub fn pop(&mut self) -> Result<T, AccessError>
    where
        T: Clone,
    {
        if self.head.is_null() {
            return Err(AccessError::EmptyList)
        }

        let detached = self.head.take();
        self.head = detached.take_next();
        self.len -= 1;

        match SmartPointer::try_unwrap(detached) {
            Ok(node) => Ok(node.into_inner()),
            Err(shared) => Ok(shared.get().clone()),
        }
    }

    /// The value at the head, without removing it.
    pub fn peek(&self) -> Result<&T, AccessError> {
        self.head
            .try_deref()
            .map(Node::get)
            .map_err(|_| AccessError::EmptyList)
    }

    /// A cursor starting at the head. The list itself is not modified.
    pub fn get_iter(&self) -> LinkedListIterator<T> {
        LinkedListIterator::new(self.head.clone())
    }
}

/// Walks the chain starting at `current`, unlinking each node before letting go of it,
/// so that dropping a long list doesn't recurse once per node.
///
/// Stops at the first node that is still shared with someone else (an iterator, or a
/// handle from [`LinkedList::head`]). That node's own `Drop` releases the rest of the
/// chain the same way once its last owner lets go.
fn release_chain<T>(mut current: SmartPointer<Node<T>>) {
    let mut released = 0usize;

    while let Some(node) = current.get_mut() {
        let next = node.next.get_mut().take();
        // `current` has no successor now, so dropping it frees exactly one node
        current = next;
        released += 1;
    }

    if released > 0 {
        debug!("released {released} nodes, stopped at a shared or null link");
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        release_chain(self.head.take())
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pushes in iteration order, so the last value ends up at the head.
impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value)
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: Debug> Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = f.debug_list();
        let mut cursor = self.head.clone();
        while let Ok(node) = cursor.try_deref() {
            entries.entry(node.get());
            let next = node.get_next();
            cursor = next;
        }
        entries.finish()
    }
}
