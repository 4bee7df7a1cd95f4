use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Display, Write};

use super::node::{Arena, NIL};

/// A [`Display`] adaptor drawing a tree as an ASCII box diagram.
///
/// Each node is labelled with its value, followed by `:count` when it holds more than one
/// occurrence. Children hang below their parent on `/` and `\` branches.
///
/// Created by [`CountedTree::diagram`](crate::CountedTree::diagram).
pub struct Diagram<'a, T> {
    arena: &'a Arena<T>,
    root: usize,
}

impl<'a, T> Diagram<'a, T> {
    pub(super) fn new(arena: &'a Arena<T>, root: usize) -> Self {
        Self { arena, root }
    }
}

/// A rendered subtree: equal-width lines plus the column of the root label's midpoint.
struct Block {
    lines: Vec<String>,
    width: usize,
    middle: usize,
}

fn repeat(ch: char, n: usize) -> impl Iterator<Item = char> {
    core::iter::repeat_n(ch, n)
}

fn label<T: Display>(value: &T, count: usize) -> String {
    if count > 1 {
        format!("{value}:{count}")
    } else {
        format!("{value}")
    }
}

fn layout<T: Display>(arena: &Arena<T>, idx: usize) -> Block {
    let node = arena.node_at(idx);
    let label = label(&node.value, node.count);
    let u = label.chars().count();

    match (node.left, node.right) {
        (NIL, NIL) => Block {
            lines: vec![label],
            width: u,
            middle: u / 2,
        },
        (left, NIL) => {
            let child = layout(arena, left);
            let (n, x) = (child.width, child.middle);

            let mut first: String = repeat(' ', x + 1).collect();
            first.extend(repeat('_', n.saturating_sub(x + 1)));
            first.push_str(&label);

            let mut second: String = repeat(' ', x).collect();
            second.push('/');
            second.extend(repeat(' ', n.saturating_sub(x + 1) + u));

            let mut lines = vec![first, second];
            lines.extend(child.lines.into_iter().map(|mut line| {
                line.extend(repeat(' ', u));
                line
            }));

            Block {
                lines,
                width: n + u,
                middle: n + u / 2,
            }
        }
        (NIL, right) => {
            let child = layout(arena, right);
            let (n, x) = (child.width, child.middle);

            let mut first = label;
            first.extend(repeat('_', x));
            first.extend(repeat(' ', n.saturating_sub(x)));

            let mut second: String = repeat(' ', u + x).collect();
            second.push('\\');
            second.extend(repeat(' ', n.saturating_sub(x + 1)));

            let mut lines = vec![first, second];
            lines.extend(child.lines.into_iter().map(|line| {
                let mut padded: String = repeat(' ', u).collect();
                padded.push_str(&line);
                padded
            }));

            Block {
                lines,
                width: n + u,
                middle: u / 2,
            }
        }
        (left, right) => {
            let left = layout(arena, left);
            let right = layout(arena, right);
            let (n, x) = (left.width, left.middle);
            let (m, y) = (right.width, right.middle);

            let mut first: String = repeat(' ', x + 1).collect();
            first.extend(repeat('_', n.saturating_sub(x + 1)));
            first.push_str(&label);
            first.extend(repeat('_', y));
            first.extend(repeat(' ', m.saturating_sub(y)));

            let mut second: String = repeat(' ', x).collect();
            second.push('/');
            second.extend(repeat(' ', n.saturating_sub(x + 1) + u + y));
            second.push('\\');
            second.extend(repeat(' ', m.saturating_sub(y + 1)));

            let rows = left.lines.len().max(right.lines.len());
            let mut lines = Vec::with_capacity(rows + 2);
            lines.push(first);
            lines.push(second);

            let blank_left: String = repeat(' ', n).collect();
            let blank_right: String = repeat(' ', m).collect();
            for row in 0..rows {
                let mut line = left.lines.get(row).unwrap_or(&blank_left).clone();
                line.extend(repeat(' ', u));
                line.push_str(right.lines.get(row).unwrap_or(&blank_right));
                lines.push(line);
            }

            Block {
                lines,
                width: n + m + u,
                middle: n + u / 2,
            }
        }
    }
}

impl<T: Display> Display for Diagram<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root == NIL {
            return Ok(());
        }

        let block = layout(self.arena, self.root);
        for (i, line) in block.lines.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            f.write_str(line.trim_end())?;
        }
        Ok(())
    }
}

impl<T: Display> fmt::Debug for Diagram<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
