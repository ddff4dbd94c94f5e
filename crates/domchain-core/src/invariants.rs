//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::dom::{Dom, NodeData, NodeId};

impl Dom {
    pub(crate) fn ensure_node(&self, id: NodeId) -> &NodeData {
        self.nodes_slot(id).unwrap_or_else(|| {
            panic!(
                "Dom: node {} not found \
                 (handles must only be created by their own document)",
                id.as_u32()
            )
        })
    }

    pub(crate) fn ensure_node_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.nodes_slot_mut(id).unwrap_or_else(|| {
            panic!(
                "Dom: node {} not found \
                 (handles must only be created by their own document)",
                id.as_u32()
            )
        })
    }

    pub(crate) fn ensure_child_index(&self, parent: NodeId, child: NodeId) -> usize {
        self.ensure_node(parent)
            .children
            .iter()
            .position(|c| *c == child)
            .unwrap_or_else(|| {
                panic!(
                    "Dom: node {} is not a child of node {}",
                    child.as_u32(),
                    parent.as_u32()
                )
            })
    }

    pub(crate) fn arena_exhausted(index: usize) -> ! {
        panic!("Dom: node slot {index} does not fit a NodeId (arena holds at most u32::MAX nodes)")
    }

    pub(crate) fn listener_ids_exhausted() -> ! {
        panic!("Dom: listener ids exhausted (at most u32::MAX registrations per document)")
    }

    pub(crate) fn not_an_element(id: NodeId) -> ! {
        panic!(
            "Dom: node {} is not an element (Element handles only wrap elements)",
            id.as_u32()
        )
    }
}
