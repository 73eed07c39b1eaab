//! Lazy, one-shot traversals over a [`Tree`].
//!
//! Each of [`Tree::pre_order`], [`Tree::in_order`] and [`Tree::post_order`]
//! produces a fresh iterator borrowing the tree; a produced sequence is
//! consumed once, forward only. The recursion that defines the three orders
//! is simulated with explicit stacks, so iterating a degenerate
//! linked-list-shaped tree costs heap space instead of call stack.

use std::iter::FusedIterator;

use crate::tree::{Node, Tree};

impl<T> Tree<T> {
    /// A lazy sequence visiting each node before either of its subtrees
    /// (node, then left subtree, then right subtree).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in vec![5, 3, 7, 2, 4, 6, 8] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// let keys: Vec<_> = tree.pre_order().copied().collect();
    /// assert_eq!(keys, [5, 3, 2, 4, 7, 6, 8]);
    /// ```
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder {
            stack: self.root().into_iter().collect(),
            remaining: self.len(),
        }
    }

    /// A lazy sequence visiting the left subtree, then the node, then the
    /// right subtree. For a BST this is exactly ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in vec![5, 3, 7, 2, 4, 6, 8] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// let keys: Vec<_> = tree.in_order().copied().collect();
    /// assert_eq!(keys, [2, 3, 4, 5, 6, 7, 8]);
    /// ```
    pub fn in_order(&self) -> InOrder<'_, T> {
        let mut iter = InOrder {
            stack: Vec::new(),
            remaining: self.len(),
        };
        if let Some(root) = self.root() {
            iter.push_left_spine(root);
        }
        iter
    }

    /// A lazy sequence visiting both subtrees before the node itself (left
    /// subtree, then right subtree, then node).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in vec![5, 3, 7, 2, 4, 6, 8] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// let keys: Vec<_> = tree.post_order().copied().collect();
    /// assert_eq!(keys, [2, 4, 3, 6, 8, 7, 5]);
    /// ```
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder {
            stack: self.root().map(|root| (root, false)).into_iter().collect(),
            remaining: self.len(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    /// Iterating a borrowed tree yields its keys in ascending order.
    fn into_iter(self) -> InOrder<'a, T> {
        self.in_order()
    }
}

/// Iterator over a tree's keys in pre-order. See [`Tree::pre_order`].
pub struct PreOrder<'a, T> {
    // Roots of the subtrees still to visit; the top entry is next.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        // Push right below left so the left subtree is popped first.
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        if let Some(left) = node.left() {
            self.stack.push(left);
        }
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PreOrder<'_, T> {}
impl<T> FusedIterator for PreOrder<'_, T> {}

/// Iterator over a tree's keys in in-order, i.e. ascending. See
/// [`Tree::in_order`].
pub struct InOrder<'a, T> {
    // The left spine of the subtree being visited: every entry's left
    // subtree is already consumed, its key and right subtree are pending.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    fn push_left_spine(&mut self, mut node: &'a Node<T>) {
        loop {
            self.stack.push(node);
            match node.left() {
                Some(left) => node = left,
                None => break,
            }
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right() {
            self.push_left_spine(right);
        }
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for InOrder<'_, T> {}
impl<T> FusedIterator for InOrder<'_, T> {}

/// Iterator over a tree's keys in post-order. See [`Tree::post_order`].
pub struct PostOrder<'a, T> {
    // The flag records whether the node's subtrees have already been pushed;
    // a node is yielded the second time it is popped.
    stack: Vec<(&'a Node<T>, bool)>,
    remaining: usize,
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                self.remaining -= 1;
                return Some(node.key());
            }
            self.stack.push((node, true));
            if let Some(right) = node.right() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left() {
                self.stack.push((left, false));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PostOrder<'_, T> {}
impl<T> FusedIterator for PostOrder<'_, T> {}
