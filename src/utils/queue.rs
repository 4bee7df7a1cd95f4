use alloc::boxed::Box;

/// A growable first-in first-out queue.
///
/// Backed by a ring buffer that doubles its capacity when full, so both operations are amortized
/// O(1). The tree only relies on `enqueue` and `dequeue`.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    /// The ring buffer, allocated on the heap.
    buf: Box<[T]>,
    /// The index of the front element in the buffer
    front: usize,
    /// The current number of elements stored in the queue
    len: usize,
}

impl<T> Queue<T>
where
    T: Default + Clone,
{
    /// Creates a new `Queue` able to hold `cap` elements before growing.
    ///
    /// # Arguments
    ///
    /// * `cap` - The initial capacity, clamped to at least one
    ///
    /// # Returns
    ///
    /// * `Self` - The empty queue
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: vec![T::default(); cap.max(1)].into_boxed_slice(),
            front: 0,
            len: 0,
        }
    }

    /// Returns true if the queue is empty
    #[inline]
    #[allow(dead_code)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of elements stored in the queue
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Pushes a new element to the back of the queue, growing the buffer if it is full
    ///
    /// # Arguments
    ///
    /// * `value` - The value to enqueue
    #[inline]
    pub fn enqueue(&mut self, value: T) {
        if self.len == self.buf.len() {
            self.grow();
        }

        let back = (self.front + self.len) % self.buf.len();
        self.buf[back] = value;
        self.len += 1;
    }

    /// Pops the element from the front of the queue
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The oldest element, or `None` if the queue is empty
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let value = core::mem::take(&mut self.buf[self.front]);
        self.front = (self.front + 1) % self.buf.len();
        self.len -= 1;

        Some(value)
    }

    /// Doubles the capacity, moving the live elements to the start of the new buffer.
    fn grow(&mut self) {
        let cap = self.buf.len();
        let mut buf = vec![T::default(); cap * 2].into_boxed_slice();

        for (i, slot) in buf.iter_mut().take(self.len).enumerate() {
            *slot = core::mem::take(&mut self.buf[(self.front + i) % cap]);
        }

        self.buf = buf;
        self.front = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_enqueue_dequeue_order() {
        let mut queue = Queue::with_capacity(3);

        queue.enqueue(1);
        queue.enqueue(2);
        queue.enqueue(3);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.dequeue(), Some(2));
        assert_eq!(queue.dequeue(), Some(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_empty() {
        let mut queue = Queue::<usize>::with_capacity(2);
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_growth_preserves_order() {
        let mut queue = Queue::with_capacity(1);

        for i in 0..10 {
            queue.enqueue(i);
        }

        assert_eq!(queue.len(), 10);
        for i in 0..10 {
            assert_eq!(queue.dequeue(), Some(i));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_growth_after_wraparound() {
        let mut queue = Queue::with_capacity(3);

        queue.enqueue(1);
        queue.enqueue(2);
        queue.enqueue(3);
        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.dequeue(), Some(2));

        queue.enqueue(4);
        queue.enqueue(5);
        queue.enqueue(6);

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.dequeue(), Some(3));
        assert_eq!(queue.dequeue(), Some(4));
        assert_eq!(queue.dequeue(), Some(5));
        assert_eq!(queue.dequeue(), Some(6));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut queue = Queue::with_capacity(0);
        queue.enqueue(7);
        assert_eq!(queue.dequeue(), Some(7));
    }

    #[test]
    fn test_interleaved_operations() {
        let mut queue = Queue::with_capacity(2);
        let mut pushed = Vec::new();
        let mut popped = Vec::new();

        for round in 0..20 {
            queue.enqueue(round);
            queue.enqueue(round + 100);
            pushed.extend([round, round + 100]);
            popped.extend(queue.dequeue());
        }

        assert_eq!(popped, pushed[..20]);
        assert_eq!(popped[..4], [0, 100, 1, 101]);
        assert_eq!(queue.len(), 20);

        let rest: Vec<i32> = core::iter::from_fn(|| queue.dequeue()).collect();
        assert_eq!(rest, pushed[20..]);
        assert_eq!(rest[..2], [10, 110]);
        assert_eq!(rest[18..], [19, 119]);
    }
}
