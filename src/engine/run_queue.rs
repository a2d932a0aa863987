// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::collections::VecDeque;

use super::TraversalOrder;

/// A node waiting to run, with the payload it will receive.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    pub node_id: String,
    pub input: Value,
}

impl WorkItem {
    pub fn new(node_id: impl Into<String>, input: Value) -> Self {
        Self {
            node_id: node_id.into(),
            input,
        }
    }
}

/// Traversal queue of a run, FIFO or LIFO depending on the traversal order.
///
/// Pushes are never deduplicated here; the scheduler skips already processed
/// nodes when it pops them.
#[derive(Debug)]
pub struct RunQueue {
    items: VecDeque<WorkItem>,
    order: TraversalOrder,
}

impl RunQueue {
    pub fn new(order: TraversalOrder) -> Self {
        Self {
            items: VecDeque::new(),
            order,
        }
    }

    pub fn push(&mut self, item: WorkItem) {
        self.items.push_back(item);
    }

    /// Push items that were produced together (seeds, or one node's fan-out)
    /// so that the first of them is popped first in either order.
    pub fn push_batch(&mut self, batch: Vec<WorkItem>) {
        match self.order {
            TraversalOrder::BreadthFirst => self.items.extend(batch),
            TraversalOrder::DepthFirst => self.items.extend(batch.into_iter().rev()),
        }
    }

    pub fn pop(&mut self) -> Option<WorkItem> {
        match self.order {
            TraversalOrder::BreadthFirst => self.items.pop_front(),
            TraversalOrder::DepthFirst => self.items.pop_back(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every pending item, returning them in queue order.
    pub fn drain(&mut self) -> Vec<WorkItem> {
        self.items.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(queue: &mut RunQueue) -> Vec<String> {
        std::iter::from_fn(|| queue.pop()).map(|item| item.node_id).collect()
    }

    fn batch(ids: &[&str]) -> Vec<WorkItem> {
        ids.iter().map(|id| WorkItem::new(*id, json!(null))).collect()
    }

    #[test]
    fn test_breadth_first_is_fifo() {
        let mut queue = RunQueue::new(TraversalOrder::BreadthFirst);
        queue.push_batch(batch(&["b", "c"]));
        queue.push(WorkItem::new("d", json!(1)));
        assert_eq!(queue.len(), 3);
        assert_eq!(ids(&mut queue), vec!["b", "c", "d"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_depth_first_pops_first_of_latest_batch() {
        let mut queue = RunQueue::new(TraversalOrder::DepthFirst);
        queue.push_batch(batch(&["b", "c"]));
        assert_eq!(queue.pop().map(|i| i.node_id), Some("b".to_string()));
        queue.push_batch(batch(&["d", "e"]));
        assert_eq!(ids(&mut queue), vec!["d", "e", "c"]);
    }

    #[test]
    fn test_drain() {
        let mut queue = RunQueue::new(TraversalOrder::BreadthFirst);
        queue.push_batch(batch(&["a", "b"]));
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
    }
}
