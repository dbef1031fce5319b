use std::sync::atomic::{AtomicUsize, Ordering};

use refcount_list::{AccessError, LinkedList, Node, SmartPointer};

#[test]
fn push_iterate_pop() {
    let mut list = LinkedList::new();
    list.push(1);
    list.push(2);
    list.push(3);

    assert_eq!(list.get_iter().collect::<Vec<_>>(), [3, 2, 1]);

    list.push(4);
    list.push(5);
    let popped: Vec<i32> = (0..3).map(|_| list.pop().unwrap()).collect();
    assert_eq!(popped, [5, 4, 3]);
    assert_eq!(list.len(), 2);
}

#[test]
fn misuse_is_reported() {
    let mut list: LinkedList<u32> = LinkedList::default();
    assert_eq!(list.pop(), Err(AccessError::EmptyList));
    assert_eq!(list.get_iter().try_next(), Err(AccessError::IteratorExhausted));
    assert_eq!(list.head().try_deref().err(), Some(AccessError::NullPointer));
    assert_eq!(AccessError::EmptyList.to_string(), "the list is empty");
}

#[test]
fn last_alias_frees_exactly_once() {
    static NUM_DROPS: AtomicUsize = AtomicUsize::new(0);
    struct DropDetector;
    impl Drop for DropDetector {
        fn drop(&mut self) {
            NUM_DROPS.fetch_add(1, Ordering::Relaxed);
        }
    }

    const K: usize = 8;
    let first = SmartPointer::new(DropDetector);
    let mut aliases: Vec<_> = (0..K - 1).map(|_| first.clone()).collect();
    aliases.push(first);
    assert_eq!(aliases[0].strong_count(), K);

    let last = aliases.pop().unwrap();
    drop(aliases);
    assert_eq!(NUM_DROPS.load(Ordering::Relaxed), 0);
    assert_eq!(last.strong_count(), 1);

    drop(last);
    assert_eq!(NUM_DROPS.load(Ordering::Relaxed), 1);
}

#[test]
fn two_node_cycle_is_never_freed() {
    static NUM_DROPS: AtomicUsize = AtomicUsize::new(0);
    struct DropDetector;
    impl Drop for DropDetector {
        fn drop(&mut self) {
            NUM_DROPS.fetch_add(1, Ordering::Relaxed);
        }
    }

    {
        let node1 = SmartPointer::new(Node::new(DropDetector));
        let node2 = SmartPointer::new(Node::new(DropDetector));
        node1.set_next(&node2);
        node2.set_next(&node1);
    }

    assert_eq!(NUM_DROPS.load(Ordering::Relaxed), 0);
}
