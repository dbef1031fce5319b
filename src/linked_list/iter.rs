use std::iter::FusedIterator;

use super::Node;
use crate::{AccessError, SmartPointer};

/// A forward-only cursor over a [`LinkedList`](super::LinkedList).
///
/// The cursor holds its own share of the current node, so it keeps the rest of the
/// chain alive even if the list is dropped first. Values pushed onto the list after
/// the iterator was created are never seen.
pub struct LinkedListIterator<T> {
    current: SmartPointer<Node<T>>,
}

impl<T> LinkedListIterator<T> {
    pub(super) fn new(current: SmartPointer<Node<T>>) -> Self {
        Self { current }
    }

    pub fn is_done(&self) -> bool {
        self.current.is_null()
    }

    /// Returns the current value and moves on to the next node.
    pub fn try_next(&mut self) -> Result<T, AccessError>
    where
        T: Clone,
    {
        let node = self.current.try_deref().map_err(|_| AccessError::IteratorExhausted)?;
        let value = node.get().clone();
        let next = node.get_next();

        self.current = next;
        Ok(value)
    }
}

impl<T: Clone> Iterator for LinkedListIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }
}

impl<T: Clone> FusedIterator for LinkedListIterator<T> {}


#[cfg(test)]
mod tests {
    use crate::LinkedList;

    use super::*;

    #[test]
    fn test_exhausted() {
        let mut list = LinkedList::new();
        list.push("only");

        let mut iter = list.get_iter();
        assert!(!iter.is_done());
        assert_eq!(iter.try_next(), Ok("only"));
        assert!(iter.is_done());
        assert_eq!(iter.try_next(), Err(AccessError::IteratorExhausted));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_empty_list() {
        let list: LinkedList<i32> = LinkedList::new();
        let mut iter = list.get_iter();
        assert!(iter.is_done());
        assert_eq!(iter.try_next(), Err(AccessError::IteratorExhausted));
    }

    #[test]
    fn test_snapshot_of_head() {
        let mut list = LinkedList::new();
        list.push(1);
        list.push(2);

        let iter = list.get_iter();
        list.push(3);
        assert_eq!(iter.collect::<Vec<_>>(), [2, 1]);
        assert_eq!(list.get_iter().collect::<Vec<_>>(), [3, 2, 1]);
    }

    #[test]
    fn test_outlives_list() {
        let list: LinkedList<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
        let mut iter = list.get_iter();
        assert_eq!(iter.next().as_deref(), Some("c"));

        drop(list);
        assert_eq!(iter.collect::<Vec<_>>(), ["b", "a"]);
    }
}
