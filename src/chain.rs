//! Chain: singly linked, owning list used as a hash-map bucket.
//!
//! Every node owns its payload and at most one successor; there are no
//! back-pointers. Structural operations at the head or after a known node
//! are O(1). Deleting a node by identity scans from the head to find its
//! predecessor and is O(len).

use core::fmt;

/// Link to the next node; `None` terminates the chain.
type Link<T> = Option<Box<Node<T>>>;

/// A chain node owning one payload.
pub struct Node<T> {
    payload: T,
    next: Link<T>,
}

/// Identity of a node while it is linked into a chain.
///
/// Ids compare by address only. Once the node is removed its id may be
/// reused by a later allocation, so an id must not outlive its node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(*const ());

impl<T> Node<T> {
    /// Allocates a detached node.
    pub fn new(payload: T) -> Box<Self> {
        Box::new(Self {
            payload,
            next: None,
        })
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// Consumes a detached node and returns its payload.
    pub fn into_payload(self: Box<Self>) -> T {
        self.payload
    }

    pub fn next(&self) -> Option<&Node<T>> {
        self.next.as_deref()
    }

    pub fn next_mut(&mut self) -> Option<&mut Node<T>> {
        self.next.as_deref_mut()
    }

    pub fn id(&self) -> NodeId {
        NodeId(self as *const Self as *const ())
    }

    /// Links a new node holding `payload` directly after this one.
    pub fn insert_after(&mut self, payload: T) {
        self.insert_node_after(Node::new(payload));
    }

    /// Links a detached node directly after this one.
    pub fn insert_node_after(&mut self, mut node: Box<Node<T>>) {
        node.next = self.next.take();
        self.next = Some(node);
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/// Owning, possibly empty, acyclic sequence of nodes.
pub struct Chain<T> {
    first: Link<T>,
}

impl<T> Chain<T> {
    pub const fn new() -> Self {
        Self { first: None }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Counts nodes by walking the chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn first(&self) -> Option<&Node<T>> {
        self.first.as_deref()
    }

    pub fn first_mut(&mut self) -> Option<&mut Node<T>> {
        self.first.as_deref_mut()
    }

    pub fn push_front(&mut self, payload: T) {
        self.push_front_node(Node::new(payload));
    }

    pub fn push_front_node(&mut self, mut node: Box<Node<T>>) {
        node.next = self.first.take();
        self.first = Some(node);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.pop_front_node().map(Node::into_payload)
    }

    /// Detaches the head node without freeing it.
    pub fn pop_front_node(&mut self) -> Option<Box<Node<T>>> {
        let mut node = self.first.take()?;
        self.first = node.next.take();
        Some(node)
    }

    /// Unlinks the node with identity `id` and returns its payload.
    ///
    /// Returns `None` and leaves the chain untouched when no linked node
    /// has that identity.
    pub fn delete(&mut self, id: NodeId) -> Option<T> {
        self.remove_first(|node| node.id() == id)
    }

    /// Unlinks the first node matching `pred` and returns its payload.
    pub fn remove_first<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&Node<T>) -> bool,
    {
        let mut link = &mut self.first;
        while link.as_deref().is_some_and(|node| !pred(node)) {
            link = match link {
                Some(node) => &mut node.next,
                None => return None,
            };
        }
        let mut node = link.take()?;
        *link = node.next.take();
        Some(node.into_payload())
    }

    /// Returns the first node matching `pred`.
    pub fn find<F>(&self, mut pred: F) -> Option<&Node<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cur = self.first();
        while let Some(node) = cur {
            if pred(&node.payload) {
                return Some(node);
            }
            cur = node.next();
        }
        None
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: self.first() }
    }

    /// Drops every node, head first.
    pub fn clear(&mut self) {
        // Unlink one node at a time so long chains do not recurse in Drop.
        while self.pop_front_node().is_some() {}
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for Chain<T> {
    fn clone(&self) -> Self {
        let mut out = Chain::new();
        let mut tail: &mut Link<T> = &mut out.first;
        for payload in self.iter() {
            let node = tail.insert(Node::new(payload.clone()));
            tail = &mut node.next;
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over chain payloads, head to tail.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next();
        Some(&node.payload)
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
