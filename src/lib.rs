#![deny(unsafe_op_in_unsafe_fn)]

// reference counting
mod error;
pub mod smart_pointer;

// data structures
pub mod linked_list;

// walkthroughs and plumbing for the binary
pub mod demo;
pub mod logging;

pub use error::AccessError;
pub use linked_list::{LinkedList, LinkedListIterator, Node};
pub use smart_pointer::SmartPointer;
