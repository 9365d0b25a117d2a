use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-priority queue: [`MinQueue::pop_min`] returns the smallest item
/// according to its [`Ord`].
///
/// `BinaryHeap` is a max-heap, so items are stored wrapped in [`Reverse`].
#[derive(Debug)]
pub struct MinQueue<T> {
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> MinQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, item: T) {
        self.heap.push(Reverse(item));
    }

    pub fn pop_min(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(item)| item)
    }

    pub fn peek_min(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(item)| item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Ord> Default for MinQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
