//! Arena node for the singly-linked bucket list.

slotmap::new_key_type! {
    /// Generational key of a node inside one list's arena.
    pub struct NodeKey;
}

/// One link of a chain: a value and the key of its successor.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Option<NodeKey>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Self {
        Node { value, next: None }
    }

    pub(crate) fn with_next(value: T, next: Option<NodeKey>) -> Self {
        Node { value, next }
    }
}
