//! The tree itself: node store and insertion engine.
//!
//! Nodes are heap allocated and exclusively owned by their parent (the root
//! by the [`Tree`]). Each node also carries a non-owning back-reference to
//! its parent, which the [cursor](crate::cursor) uses to walk upward without
//! keeping its own stack. Ownership never flows through the parent link, so
//! there are no reference cycles: dropping the tree follows child links only.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! tree.insert(1).unwrap();
//! assert!(tree.contains(&1));
//!
//! // Inserting the same key again is rejected and hands the key back.
//! let err = tree.insert(1).unwrap_err();
//! assert_eq!(err.0, 1);
//! assert_eq!(tree.len(), 1);
//! ```

use std::cmp::Ordering;
use std::error;
use std::fmt;
use std::ptr::NonNull;

/// An ordered set of keys backed by an unbalanced Binary Search Tree.
///
/// Keys are inserted with [`insert`](Tree::insert), which rejects
/// duplicates, and read back through the lazy traversals on this type or
/// through a [`Cursor`](crate::Cursor). There is no removal; the node store
/// is released all at once when the tree is dropped.
///
/// No rebalancing is performed, so an adversarial insertion order (for
/// example, already-sorted keys) degrades every descent to `O(n)`.
pub struct Tree<T> {
    // This is a `Link` instead of an `Option<Node>` so that it can be moved
    // around with the `Tree` without the children's parent pointers breaking.
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    // TODO stack based drop
    fn drop(&mut self) {
        if let Some(mut root) = self.root.take().0 {
            // SAFETY: We own the root we're dropping so this won't be called
            // twice. The root was initially allocated using `Box::new` (in
            // `Node::new_boxed`) so this should be well aligned, etc.
            unsafe { drop(Box::from_raw(root.as_mut())) };
        }
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    // TODO stack based Clone
    fn clone(&self) -> Self {
        let root = self.root().map(|root| {
            let new_root = Box::leak(Box::new(root.clone()));
            new_root.parent = Link(None);
            new_root.fix_left_child_parent();
            new_root.fix_right_child_parent();
            NonNull::from(new_root)
        });
        Self {
            root: Link(root),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
        }
    }

    /// Inserts the given key into the tree. If the key is already present
    /// the tree is left unchanged and the rejected key is handed back inside
    /// the error, so a batch-inserting caller can skip or report duplicates
    /// without aborting.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(10).is_ok());
    /// assert!(tree.insert(10).is_err());
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> Result<(), DuplicateKeyError<T>>
    where
        T: Ord,
    {
        match self.root_mut() {
            Some(root) => root.insert(key)?,
            None => self.root = Link(Some(NonNull::from(Box::leak(Node::new_boxed(key))))),
        }
        self.len += 1;
        Ok(())
    }

    /// Returns whether the given key is present in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, key: &T) -> bool
    where
        T: Ord,
    {
        self.root().map_or(false, |n| n.contains(key))
    }

    /// The number of keys in the tree, i.e. the number of successful
    /// insertions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The smallest key in the tree (the in-order-first one), or `None` for
    /// an empty tree.
    pub fn first(&self) -> Option<&T> {
        self.root().map(|n| n.leftmost().key())
    }

    /// The largest key in the tree (the in-order-last one), or `None` for an
    /// empty tree.
    pub fn last(&self) -> Option<&T> {
        self.root().map(|n| n.rightmost().key())
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        // SAFETY: If the root is not `None` then it is a valid `Node`. Because
        // we take `&self` here, there can be no aliasing with
        // `self.root_mut()`. There can only be aliasing with
        // `self.root.unwrap().as_mut()`. This code would be unsafe so it'd be
        // the caller's responsibility to ensure there is no existing borrow of
        // `root`.
        unsafe { self.root.0.as_ref().map(|root| root.as_ref()) }
    }

    fn root_mut(&mut self) -> Option<&mut Node<T>> {
        // SAFETY: If the root is not `None` then it is a valid `Node`. Because
        // we take `&mut self` here, there can be no aliasing with
        // `self.root/root_mut()`. There can only be aliasing with
        // `self.root.unwrap().as_mut/ref()`. This code would be unsafe so it'd
        // be the caller's responsibility to ensure there is no existing borrow
        // of `root`.
        unsafe { self.root.0.as_mut().map(|root| root.as_mut()) }
    }
}

/// The error returned by [`Tree::insert`] for a key that is already present.
///
/// Carries the rejected key, returning its ownership to the caller. The tree
/// is guaranteed to be unmodified when this error is produced.
#[derive(Debug, PartialEq, Eq)]
pub struct DuplicateKeyError<T>(
    /// The key whose insertion was rejected.
    pub T,
);

impl<T> fmt::Display for DuplicateKeyError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a node with this key already exists in the tree")
    }
}

impl<T: fmt::Debug> error::Error for DuplicateKeyError<T> {}

pub(crate) struct Link<T>(Option<NonNull<Node<T>>>);

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}
impl<T> Copy for Link<T> {}

impl<T> Link<T> {
    fn node(&self) -> Option<&Node<T>> {
        // SAFETY: If the node is not `None` then it is a valid `Node`. Because
        // we take `&self` here, there can be no aliasing with
        // `self.node_mut()`. There can only be aliasing with
        // `self.0.unwrap().as_mut()`. This code would be unsafe so it'd be the
        // caller's responsibility to ensure there is no existing borrow of the
        // inner pointer.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    fn node_mut(&mut self) -> Option<&mut Node<T>> {
        unsafe { self.0.as_mut().map(|ptr| ptr.as_mut()) }
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }
}

pub(crate) struct Node<T> {
    key: T,
    left: Link<T>,
    right: Link<T>,
    parent: Link<T>,
}

impl<T> Drop for Node<T> {
    // TODO Stack based drop
    fn drop(&mut self) {
        // SAFETY: Dropping a node doesn't drop its parent and we are the only
        // owners of these children so we won't drop them twice. They were
        // initially allocated using `Box::new` (in `Node::new_boxed`) so they
        // should be well aligned, etc.
        unsafe {
            if let Some(mut left) = self.left.0.take() {
                drop(Box::from_raw(left.as_mut()));
            }
            if let Some(mut right) = self.right.0.take() {
                drop(Box::from_raw(right.as_mut()));
            }
        }
    }
}

impl<T> Clone for Node<T>
where
    T: Clone,
{
    // TODO stack based Clone
    fn clone(&self) -> Self {
        let left = self.left().map(|left| {
            let new_left = Box::leak(Box::new(left.clone()));
            new_left.fix_left_child_parent();
            new_left.fix_right_child_parent();
            NonNull::from(new_left)
        });
        let right = self.right().map(|right| {
            let new_right = Box::leak(Box::new(right.clone()));
            new_right.fix_left_child_parent();
            new_right.fix_right_child_parent();
            NonNull::from(new_right)
        });
        Self {
            key: self.key.clone(),
            left: Link(left),
            right: Link(right),
            parent: self.parent,
        }
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(key: T) -> Box<Self> {
        Box::new(Node {
            key,
            left: Link(None),
            right: Link(None),
            parent: Link(None),
        })
    }

    pub(crate) fn key(&self) -> &T {
        &self.key
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.node()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.node()
    }

    /// The node owning this one, or `None` at the root. The link is
    /// non-owning; it is only ever read, never dropped through.
    pub(crate) fn parent(&self) -> Option<&Self> {
        self.parent.node()
    }

    fn left_mut(&mut self) -> Option<&mut Self> {
        self.left.node_mut()
    }

    fn right_mut(&mut self) -> Option<&mut Self> {
        self.right.node_mut()
    }

    /// Descends left children as far as possible: the in-order-first node of
    /// the subtree rooted here.
    pub(crate) fn leftmost(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// Descends right children as far as possible: the in-order-last node of
    /// the subtree rooted here.
    pub(crate) fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    fn fix_left_child_parent(&mut self) {
        let self_ptr = NonNull::from(&*self);
        if let Some(left) = self.left_mut() {
            left.parent = Link(Some(self_ptr));
        }
    }

    fn fix_right_child_parent(&mut self) {
        let self_ptr = NonNull::from(&*self);
        if let Some(right) = self.right_mut() {
            right.parent = Link(Some(self_ptr));
        }
    }

    fn contains(&self, key: &T) -> bool
    where
        T: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => self.left().map_or(false, |n| n.contains(key)),
            Ordering::Equal => true,
            Ordering::Greater => self.right().map_or(false, |n| n.contains(key)),
        }
    }

    fn insert(&mut self, key: T) -> Result<(), DuplicateKeyError<T>>
    where
        T: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => match self.left_mut() {
                Some(left) => left.insert(key)?,
                None => {
                    let mut new_left = Self::new_boxed(key);
                    new_left.parent = Link(Some(self.into()));
                    self.left = Link(Some(NonNull::from(Box::leak(new_left))));
                }
            },
            Ordering::Equal => return Err(DuplicateKeyError(key)),
            Ordering::Greater => match self.right_mut() {
                Some(right) => right.insert(key)?,
                None => {
                    let mut new_right = Self::new_boxed(key);
                    new_right.parent = Link(Some(self.into()));
                    self.right = Link(Some(NonNull::from(Box::leak(new_right))));
                }
            },
        }

        if cfg!(debug_assertions) {
            if let Some(left) = self.left() {
                assert!(self.key > left.key);
            }
            if let Some(right) = self.right() {
                assert!(self.key < right.key);
            }
        }

        Ok(())
    }
}
