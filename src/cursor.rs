//! A stateful, bidirectional cursor over a [`Tree`]'s in-order sequence.
//!
//! Where the [traversals](crate::traverse) are one-shot and forward-only, a
//! [`Cursor`] rests at a position and can be stepped in either direction
//! from it, re-entrantly: step, inspect, step again, reverse. Positions
//! before the first key and past the last one are ordinary cursor states,
//! not errors; no cursor operation panics on any tree, including an empty
//! one.
//!
//! Stepping walks the tree's parent back-links rather than keeping a stack,
//! so a step costs `O(height)` in the worst case and `O(1)` amortized over a
//! full sweep.

use std::ptr;

use crate::tree::{Node, Tree};

impl<T> Tree<T> {
    /// Opens a cursor over this tree's in-order sequence, borrowing the tree
    /// for the cursor's lifetime.
    ///
    /// The cursor starts *before* the first key, so a bare
    /// [`step_forward`](Cursor::step_forward) loop sweeps the whole
    /// sequence; call [`reset`](Cursor::reset) to land on the first key
    /// directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in vec![2, 1, 3] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// let mut cursor = tree.cursor();
    /// assert_eq!(cursor.current(), None);
    ///
    /// let mut keys = Vec::new();
    /// while cursor.step_forward() {
    ///     keys.push(*cursor.current().unwrap());
    /// }
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor {
            tree: self,
            position: Position::Before,
        }
    }
}

/// A bidirectional iterator-like handle into a [`Tree`]'s in-order
/// sequence. See [`Tree::cursor`].
pub struct Cursor<'a, T> {
    tree: &'a Tree<T>,
    position: Position<'a, T>,
}

/// Every cursor state corresponds to a well-defined point of the in-order
/// sequence: before the first key, at a node, or past the last key.
enum Position<'a, T> {
    Before,
    At(&'a Node<T>),
    After,
}

// Manual impls because a derive would demand `T: Copy` even though only a
// reference to `T`'s node is held.
impl<'a, T> Clone for Position<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for Position<'a, T> {}

impl<'a, T> Cursor<'a, T> {
    /// Positions the cursor at the in-order-first key (the leftmost node).
    /// On an empty tree the cursor ends up with no current key.
    pub fn reset(&mut self) {
        self.position = match self.tree.root() {
            Some(root) => Position::At(root.leftmost()),
            None => Position::Before,
        };
    }

    /// The key at the cursor's position, or `None` when the cursor is
    /// before the first key, past the last one, or the tree is empty.
    pub fn current(&self) -> Option<&'a T> {
        match self.position {
            Position::At(node) => Some(node.key()),
            Position::Before | Position::After => None,
        }
    }

    /// Steps to the next key in ascending order and returns whether a key
    /// is now positioned.
    ///
    /// From before-first this lands on the first key; once the sequence is
    /// exhausted the cursor rests past-the-end, where further forward steps
    /// stay put and keep returning `false`.
    pub fn step_forward(&mut self) -> bool {
        self.position = match self.position {
            Position::Before => match self.tree.root() {
                Some(root) => Position::At(root.leftmost()),
                None => Position::After,
            },
            Position::At(node) => match successor(node) {
                Some(next) => Position::At(next),
                None => Position::After,
            },
            Position::After => Position::After,
        };
        matches!(self.position, Position::At(_))
    }

    /// Steps to the previous key in ascending order and returns whether a
    /// key is now positioned.
    ///
    /// The exact mirror of [`step_forward`](Cursor::step_forward): from
    /// past-the-end this lands on the last key, and an exhausted backward
    /// sweep rests before-the-first. For any interior position the two
    /// steps compose to a no-op, in either order.
    pub fn step_backward(&mut self) -> bool {
        self.position = match self.position {
            Position::After => match self.tree.root() {
                Some(root) => Position::At(root.rightmost()),
                None => Position::Before,
            },
            Position::At(node) => match predecessor(node) {
                Some(previous) => Position::At(previous),
                None => Position::Before,
            },
            Position::Before => Position::Before,
        };
        matches!(self.position, Position::At(_))
    }
}

/// The in-order successor of `node`: the leftmost node of its right subtree
/// if there is one, otherwise the first ancestor reached from a left child.
/// `None` when `node` holds the largest key.
fn successor<'a, T>(node: &'a Node<T>) -> Option<&'a Node<T>> {
    if let Some(right) = node.right() {
        return Some(right.leftmost());
    }
    let mut child = node;
    while let Some(parent) = child.parent() {
        if is_left_child(parent, child) {
            return Some(parent);
        }
        child = parent;
    }
    None
}

/// The in-order predecessor of `node`: the rightmost node of its left
/// subtree if there is one, otherwise the first ancestor reached from a
/// right child. `None` when `node` holds the smallest key.
fn predecessor<'a, T>(node: &'a Node<T>) -> Option<&'a Node<T>> {
    if let Some(left) = node.left() {
        return Some(left.rightmost());
    }
    let mut child = node;
    while let Some(parent) = child.parent() {
        if !is_left_child(parent, child) {
            return Some(parent);
        }
        child = parent;
    }
    None
}

/// Whether `child` hangs off `parent`'s left slot, by node identity. A key
/// comparison would do for a BST, but identity keeps the walk free of `Ord`
/// bounds.
fn is_left_child<T>(parent: &Node<T>, child: &Node<T>) -> bool {
    parent.left().map_or(false, |left| ptr::eq(left, child))
}

#[cfg(test)]
mod tests {
    use crate::tree::Tree;

    fn tree_of(keys: &[i32]) -> Tree<i32> {
        let mut tree = Tree::new();
        for key in keys {
            tree.insert(*key).unwrap();
        }
        tree
    }

    #[test]
    fn reset_lands_on_the_smallest_key() {
        let tree = tree_of(&[75, 57, 90, 32, 7, 44, 60, 86, 93, 99]);

        let mut cursor = tree.cursor();
        cursor.reset();
        assert_eq!(cursor.current(), Some(&7));
    }

    #[test]
    fn forward_sweep_is_the_in_order_sequence() {
        let tree = tree_of(&[5, 3, 7, 2, 4, 6, 8]);

        let mut cursor = tree.cursor();
        let mut keys = Vec::new();
        while cursor.step_forward() {
            keys.push(*cursor.current().unwrap());
        }

        assert!(tree.in_order().copied().eq(keys));
    }

    #[test]
    fn backward_sweep_is_the_reversed_in_order_sequence() {
        let tree = tree_of(&[5, 3, 7, 2, 4, 6, 8]);

        let mut cursor = tree.cursor();
        // Run off the far end first.
        while cursor.step_forward() {}

        let mut keys = Vec::new();
        while cursor.step_backward() {
            keys.push(*cursor.current().unwrap());
        }

        assert_eq!(keys, [8, 7, 6, 5, 4, 3, 2]);
    }

    #[test]
    fn forward_then_backward_restores_every_interior_position() {
        let tree = tree_of(&[5, 3, 7, 2, 4, 6, 8]);

        let mut cursor = tree.cursor();
        cursor.reset();
        loop {
            let here = cursor.current().copied();
            cursor.step_forward();
            cursor.step_backward();
            assert_eq!(cursor.current().copied(), here);

            if !cursor.step_forward() {
                break;
            }
        }
    }

    #[test]
    fn backward_then_forward_restores_every_interior_position() {
        let tree = tree_of(&[5, 3, 7, 2, 4, 6, 8]);

        let mut cursor = tree.cursor();
        while cursor.step_forward() {}
        while cursor.step_backward() {
            let here = cursor.current().copied();
            cursor.step_backward();
            cursor.step_forward();
            assert_eq!(cursor.current().copied(), here);
        }
    }

    #[test]
    fn direction_reversal_mid_walk() {
        let tree = tree_of(&[5, 3, 7, 2, 4, 6, 8]);

        let mut cursor = tree.cursor();
        cursor.reset();
        cursor.step_forward();
        cursor.step_forward();
        assert_eq!(cursor.current(), Some(&4));

        cursor.step_backward();
        assert_eq!(cursor.current(), Some(&3));

        cursor.step_forward();
        assert_eq!(cursor.current(), Some(&4));
    }

    #[test]
    fn boundaries_are_states_not_errors() {
        let tree = tree_of(&[1, 2]);
        let mut cursor = tree.cursor();

        // Walking backward off the start stays put.
        assert!(!cursor.step_backward());
        assert!(!cursor.step_backward());
        assert_eq!(cursor.current(), None);

        // First forward step recovers the first key.
        assert!(cursor.step_forward());
        assert_eq!(cursor.current(), Some(&1));

        // Walking off the far end parks past-the-end.
        assert!(cursor.step_forward());
        assert!(!cursor.step_forward());
        assert!(!cursor.step_forward());
        assert_eq!(cursor.current(), None);

        // And a backward step recovers the last key.
        assert!(cursor.step_backward());
        assert_eq!(cursor.current(), Some(&2));
    }

    #[test]
    fn empty_tree_cursor_never_finds_a_key() {
        let tree: Tree<i32> = Tree::new();
        let mut cursor = tree.cursor();

        cursor.reset();
        assert_eq!(cursor.current(), None);
        assert!(!cursor.step_forward());
        assert_eq!(cursor.current(), None);
        assert!(!cursor.step_backward());
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn single_node_tree() {
        let tree = tree_of(&[10]);
        let mut cursor = tree.cursor();

        cursor.reset();
        assert_eq!(cursor.current(), Some(&10));
        assert!(!cursor.step_forward());
        assert!(cursor.step_backward());
        assert_eq!(cursor.current(), Some(&10));
    }
}

#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use crate::test::quick::Op;
    use crate::tree::Tree;

    quickcheck::quickcheck! {
        /// Fuzzes the cursor against an index model over the sorted key
        /// vector. Positions are modeled as `0` (before-first),
        /// `1..=len` (at key `i - 1`) and `len + 1` (past-the-end).
        ///
        /// Inserts are applied up front because the cursor borrows the tree
        /// for as long as it lives; the step ops then replay in order.
        fn fuzz_cursor_matches_index_model(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut keys = BTreeSet::new();

            for op in &ops {
                if let Op::Insert(key) = op {
                    if tree.insert(*key).is_ok() != keys.insert(*key) {
                        return false;
                    }
                }
            }

            let sorted: Vec<i8> = keys.into_iter().collect();
            let len = sorted.len();

            let mut cursor = tree.cursor();
            let mut pos = 0usize;
            for op in &ops {
                match op {
                    Op::Insert(_) => continue,
                    Op::Reset => {
                        cursor.reset();
                        pos = if len == 0 { 0 } else { 1 };
                    }
                    Op::StepForward => {
                        let moved = cursor.step_forward();
                        pos = (pos + 1).min(len + 1);
                        if moved != (1..=len).contains(&pos) {
                            return false;
                        }
                    }
                    Op::StepBackward => {
                        let moved = cursor.step_backward();
                        pos = pos.saturating_sub(1);
                        if moved != (1..=len).contains(&pos) {
                            return false;
                        }
                    }
                }

                let expected = if (1..=len).contains(&pos) {
                    Some(&sorted[pos - 1])
                } else {
                    None
                };
                if cursor.current() != expected {
                    return false;
                }
            }

            true
        }
    }

    quickcheck::quickcheck! {
        fn forward_sweep_reproduces_in_order(keys: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for key in keys {
                let _ = tree.insert(key);
            }

            let mut cursor = tree.cursor();
            let mut swept = Vec::new();
            while cursor.step_forward() {
                swept.push(*cursor.current().unwrap());
            }

            tree.in_order().copied().eq(swept)
        }
    }

    quickcheck::quickcheck! {
        fn round_trip_law_holds_everywhere(keys: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for key in keys {
                let _ = tree.insert(key);
            }

            let mut cursor = tree.cursor();
            while cursor.step_forward() {
                let here = cursor.current().copied();
                cursor.step_forward();
                if !cursor.step_backward() || cursor.current().copied() != here {
                    return false;
                }
            }

            true
        }
    }
}
