//! The two walkthroughs shipped with the binary.

use std::io::Write;

use log::{debug, info, warn};

use crate::{LinkedList, Node, SmartPointer};

/// Pushes 1, 2, 3, prints the list head to tail, pushes 4 and 5, then pops three
/// values. Prints one number per line: `3 2 1 5 4 3`.
pub fn run_list_demo(out: &mut impl Write) -> anyhow::Result<()> {
    let mut list = LinkedList::new();
    list.push(1);
    list.push(2);
    list.push(3);

    let mut iter = list.get_iter();
    while !iter.is_done() {
        writeln!(out, "{}", iter.try_next()?)?;
    }
    debug!("iterated {} values without touching the list", list.len());

    list.push(4);
    list.push(5);

    for _ in 0..3 {
        writeln!(out, "{}", list.pop()?)?;
    }
    Ok(())
}

/// What was left behind by [`run_cycle_demo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Counts of both nodes right after they were linked to each other.
    pub counts_while_linked: (usize, usize),
    /// How many of the two payloads were freed once every outside pointer was gone.
    pub payloads_freed: usize,
}

/// Links two nodes to each other, drops both outside pointers, and reports how many
/// payloads got freed. With no weak links, the answer is none: the memory leaks.
pub fn run_cycle_demo(out: &mut impl Write) -> anyhow::Result<CycleReport> {
    use std::rc::Rc;
    use std::cell::Cell;

    struct Tracked {
        id: i32,
        freed: Rc<Cell<usize>>,
    }
    impl Drop for Tracked {
        fn drop(&mut self) {
            debug!("freeing node {}", self.id);
            self.freed.set(self.freed.get() + 1);
        }
    }

    let freed = Rc::new(Cell::new(0));

    let node1 = SmartPointer::new(Node::new(Tracked { id: 1, freed: freed.clone() }));
    let node2 = SmartPointer::new(Node::new(Tracked { id: 2, freed: freed.clone() }));
    node1.set_next(&node2);
    node2.set_next(&node1);

    let counts_while_linked = (node1.strong_count(), node2.strong_count());
    info!("linked nodes {} and {} into a cycle", node1.get().id, node2.get().id);
    writeln!(out, "node1 count: {}, node2 count: {}", counts_while_linked.0, counts_while_linked.1)?;

    drop(node1);
    drop(node2);

    let payloads_freed = freed.get();
    if payloads_freed < 2 {
        warn!("{} of 2 nodes were leaked by the cycle", 2 - payloads_freed);
    }
    writeln!(out, "payloads freed after dropping both pointers: {payloads_freed}")?;

    Ok(CycleReport { counts_while_linked, payloads_freed })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_demo_output() {
        let mut out = Vec::new();
        run_list_demo(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3\n2\n1\n5\n4\n3\n");
    }

    #[test]
    fn test_cycle_demo_leaks() {
        let mut out = Vec::new();
        let report = run_cycle_demo(&mut out).unwrap();
        assert_eq!(report, CycleReport { counts_while_linked: (2, 2), payloads_freed: 0 });

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("node1 count: 2, node2 count: 2"));
        assert!(text.ends_with("payloads freed after dropping both pointers: 0\n"));
    }
}
