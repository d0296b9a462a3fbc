use std::{collections::VecDeque, fmt::Display};

/// Min-priority queue kept sorted on insertion.
///
/// Items with equal priority come out in the order they were pushed.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    nodes: VecDeque<(T, usize)>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            nodes: VecDeque::new(),
        }
    }

    pub fn push(&mut self, item: T, priority: usize) {
        // Behind every node with the same or lower priority
        let insert_ind = self.nodes.partition_point(|(_, p)| *p <= priority);
        self.nodes.insert(insert_ind, (item, priority));
    }

    pub fn pop(&mut self) -> Option<T> {
        self.nodes.pop_front().map(|(item, _)| item)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl<T: Display> Display for PriorityQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (ind, (item, priority)) in self.nodes.iter().enumerate() {
            if ind > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", item, priority)?;
        }
        write!(f, "]")
    }
}
