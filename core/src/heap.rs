/// A value paired with the priority it was queued under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapEntry<T> {
    pub value: T,
    pub priority: f64,
}

/// Binary min-heap keyed by `f64` priority.
///
/// There is no decrease-key. Solvers push a fresh entry on every improvement
/// and discard stale pops (lazy deletion), so one value may be queued more
/// than once.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    data: Vec<HeapEntry<T>>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn peek(&self) -> Option<&HeapEntry<T>> {
        self.data.first()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Insert `value` with `priority`. O(log n).
    pub fn push(&mut self, value: T, priority: f64) {
        self.data.push(HeapEntry { value, priority });
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the lowest-priority entry. O(log n).
    pub fn pop(&mut self) -> Option<HeapEntry<T>> {
        if self.data.is_empty() {
            return None;
        }
        // swap_remove moves the last entry into the root slot
        let root = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(root)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.data[parent].priority <= self.data[idx].priority {
                break;
            }
            self.data.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;

            if left < len && self.data[left].priority < self.data[smallest].priority {
                smallest = left;
            }
            if right < len && self.data[right].priority < self.data[smallest].priority {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.data.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(heap: &mut MinHeap<u32>) -> Vec<f64> {
        let mut out = Vec::new();
        while let Some(e) = heap.pop() {
            out.push(e.priority);
        }
        out
    }

    #[test]
    fn test_pop_returns_minimum() {
        let mut heap = MinHeap::new();
        heap.push(0, 10.0);
        heap.push(1, 3.0);
        heap.push(2, 7.0);

        let first = heap.pop().unwrap();
        assert_eq!(first.value, 1);
        assert_eq!(first.priority, 3.0);
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_empty() {
        let mut heap: MinHeap<u32> = MinHeap::default();
        assert!(heap.is_empty());
        assert!(heap.pop().is_none());
        assert!(heap.peek().is_none());
    }

    #[test]
    fn test_drain_sorted() {
        let mut heap = MinHeap::with_capacity(16);
        let priorities = [5.0, -1.0, 8.5, 0.0, 3.0, 3.0, 12.0, -7.25, 4.0, 1.0];
        for (i, &p) in priorities.iter().enumerate() {
            heap.push(i as u32, p);
        }

        let mut expected = priorities.to_vec();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(drain(&mut heap), expected);
    }

    #[test]
    fn test_duplicate_values_kept() {
        // Same value queued twice under different priorities: both come out
        let mut heap = MinHeap::new();
        heap.push(7, 9.0);
        heap.push(7, 2.0);
        assert_eq!(heap.pop().unwrap(), HeapEntry { value: 7, priority: 2.0 });
        assert_eq!(heap.pop().unwrap(), HeapEntry { value: 7, priority: 9.0 });
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut heap = MinHeap::new();
        let mut rng = 12345u64;
        let mut shadow: Vec<f64> = Vec::new();

        for round in 0..500 {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            let p = ((rng >> 33) % 1000) as f64;
            if round % 3 == 2 {
                let popped = heap.pop().map(|e| e.priority);
                shadow.sort_by(|a, b| b.partial_cmp(a).unwrap());
                assert_eq!(popped, shadow.pop());
            } else {
                heap.push(round, p);
                shadow.push(p);
            }
            assert_eq!(heap.peek().map(|e| e.priority), {
                let mut s = shadow.clone();
                s.sort_by(|a, b| a.partial_cmp(b).unwrap());
                s.first().copied()
            });
        }
    }

    #[test]
    fn test_clear() {
        let mut heap = MinHeap::new();
        heap.push("a", 1.0);
        heap.clear();
        assert!(heap.is_empty());
    }
}
