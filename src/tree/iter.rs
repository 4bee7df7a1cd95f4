use alloc::vec::Vec;
use core::iter::FusedIterator;

use super::node::{Arena, NIL};
use crate::utils::Queue;

/// In-order iterator over `(value, count)` pairs, following the next/prev thread.
///
/// Created by [`CountedTree::iter`](crate::CountedTree::iter).
#[derive(Debug)]
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(arena: &'a Arena<T>, first: usize, last: usize, len: usize) -> Self {
        Self {
            arena,
            front: first,
            back: last,
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.arena.node_at(self.front);
        self.front = node.next;
        self.remaining -= 1;
        Some((&node.value, node.count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.arena.node_at(self.back);
        self.back = node.prev;
        self.remaining -= 1;
        Some((&node.value, node.count))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Pre-order (node, left, right) iterator over `(value, count)` pairs.
#[derive(Debug)]
pub struct PreOrder<'a, T> {
    arena: &'a Arena<T>,
    stack: Vec<usize>,
}

impl<'a, T> PreOrder<'a, T> {
    pub(super) fn new(arena: &'a Arena<T>, root: usize) -> Self {
        let mut stack = Vec::new();
        if root != NIL {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.arena.node_at(idx);

        if node.right != NIL {
            self.stack.push(node.right);
        }
        if node.left != NIL {
            self.stack.push(node.left);
        }
        Some((&node.value, node.count))
    }
}

impl<T> FusedIterator for PreOrder<'_, T> {}

/// Post-order (left, right, node) iterator over `(value, count)` pairs.
#[derive(Debug)]
pub struct PostOrder<'a, T> {
    arena: &'a Arena<T>,
    /// Pending nodes, flagged once their children have been pushed
    stack: Vec<(usize, bool)>,
}

impl<'a, T> PostOrder<'a, T> {
    pub(super) fn new(arena: &'a Arena<T>, root: usize) -> Self {
        let mut stack = Vec::new();
        if root != NIL {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, expanded)) = self.stack.pop() {
            let node = self.arena.node_at(idx);
            if expanded {
                return Some((&node.value, node.count));
            }

            self.stack.push((idx, true));
            if node.right != NIL {
                self.stack.push((node.right, false));
            }
            if node.left != NIL {
                self.stack.push((node.left, false));
            }
        }
        None
    }
}

impl<T> FusedIterator for PostOrder<'_, T> {}

/// Breadth-first iterator over `(value, count)` pairs, top level first and left to right
/// within a level.
#[derive(Debug)]
pub struct LevelOrder<'a, T> {
    arena: &'a Arena<T>,
    queue: Queue<usize>,
}

impl<'a, T> LevelOrder<'a, T> {
    pub(super) fn new(arena: &'a Arena<T>, root: usize, len: usize) -> Self {
        // The widest level of an AVL tree holds at most about half its nodes.
        let mut queue = Queue::with_capacity(len / 2 + 1);
        if root != NIL {
            queue.enqueue(root);
        }
        Self { arena, queue }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.queue.dequeue()?;
        let node = self.arena.node_at(idx);

        if node.left != NIL {
            self.queue.enqueue(node.left);
        }
        if node.right != NIL {
            self.queue.enqueue(node.right);
        }
        Some((&node.value, node.count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), None)
    }
}

impl<T> FusedIterator for LevelOrder<'_, T> {}
