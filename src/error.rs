use thiserror::Error;

/// Misuse of a null pointer, an empty list, or a finished iterator.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// Dereferenced a [`SmartPointer`](crate::SmartPointer) that points to nothing.
    #[error("dereferenced a null SmartPointer")]
    NullPointer,
    /// Popped or peeked an empty [`LinkedList`](crate::LinkedList).
    #[error("the list is empty")]
    EmptyList,
    /// Advanced a [`LinkedListIterator`](crate::LinkedListIterator) past its last node.
    #[error("the iterator is already exhausted")]
    IteratorExhausted,
}
