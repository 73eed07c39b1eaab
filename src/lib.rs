//! An ordered, in-memory Binary Search Tree (BST) with lazy traversals
//! and a bidirectional cursor.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure storing keys so that they can
//! be located, and enumerated in order, without scanning every key. It is
//! defined recursively using the notion of a `Node`. A `Node` stores one
//! key and sometimes has child `Node`s. The most important invariants of
//! a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! The [`Tree`] in this crate holds each key at most once: inserting a key
//! that is already present is rejected with a [`DuplicateKeyError`] and
//! leaves the tree untouched. The tree is deliberately *not* balanced, so
//! its height (and with it the cost of every descent) is `O(n)` in the
//! worst case: keys inserted in sorted order degenerate into a linked
//! list. Keys are never removed; the whole node store is freed when the
//! tree is dropped.
//!
//! ## Enumerating keys
//!
//! Two complementary ways to walk the tree are provided:
//!
//! * **One-shot lazy sequences**: [`Tree::pre_order`], [`Tree::in_order`]
//!   and [`Tree::post_order`] each return a fresh, forward-only
//!   [`Iterator`] over borrowed keys. In-order yields keys in ascending
//!   order as a direct consequence of the BST invariants.
//! * **A re-enterable cursor**: [`Tree::cursor`] returns a [`Cursor`]
//!   that can rest at any point of the in-order sequence and step forward
//!   *or backward* from there, which a one-shot iterator cannot do.
//!
//! ```
//! use ordered_tree::Tree;
//!
//! let mut tree = Tree::new();
//! for key in vec![5, 3, 7, 2, 4, 6, 8] {
//!     tree.insert(key).unwrap();
//! }
//!
//! let ascending: Vec<_> = tree.in_order().copied().collect();
//! assert_eq!(ascending, [2, 3, 4, 5, 6, 7, 8]);
//!
//! let mut cursor = tree.cursor();
//! cursor.reset();
//! assert_eq!(cursor.current(), Some(&2));
//! cursor.step_forward();
//! cursor.step_forward();
//! assert_eq!(cursor.current(), Some(&4));
//! cursor.step_backward();
//! assert_eq!(cursor.current(), Some(&3));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod cursor;
pub mod traverse;
pub mod tree;


pub use cursor::Cursor;
pub use traverse::{InOrder, PostOrder, PreOrder};
pub use tree::{DuplicateKeyError, Tree};
