//! LinkedList: singly-linked sequence over a per-list slotmap arena.

use crate::error::{InvalidPosition, ValueNotFound};
use crate::node::{Node, NodeKey};
use core::fmt;
use core::iter::FusedIterator;
use slotmap::{SecondaryMap, SlotMap};

type Arena<T> = SlotMap<NodeKey, Node<T>>;

/// An ordered, singly-linked list.
///
/// Nodes live in an arena owned by the list and are linked by generational
/// keys, so append and unlink are O(1) without manual allocation pairing.
/// Slots released by `erase` are reused by later appends. The arena is only
/// built by the first insert: an empty list owns no heap memory.
pub struct LinkedList<T> {
    nodes: Option<Arena<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub const fn new() -> Self {
        Self {
            nodes: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` after the current tail.
    pub fn append(&mut self, value: T) {
        let _ = self.append_keyed(value);
    }

    /// Alias of [`append`](Self::append).
    pub fn push_back(&mut self, value: T) {
        let _ = self.append_keyed(value);
    }

    pub(crate) fn append_keyed(&mut self, value: T) -> NodeKey {
        let nodes = self.nodes.get_or_insert_with(SlotMap::with_key);
        let key = nodes.insert(Node::new(value));
        match self.tail.and_then(|tail| nodes.get_mut(tail)) {
            Some(tail) => tail.next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.len += 1;
        key
    }

    pub fn push_front(&mut self, value: T) {
        let _ = self.push_front_keyed(value);
    }

    fn push_front_keyed(&mut self, value: T) -> NodeKey {
        let nodes = self.nodes.get_or_insert_with(SlotMap::with_key);
        let key = nodes.insert(Node::with_next(value, self.head));
        if self.tail.is_none() {
            self.tail = Some(key);
        }
        self.head = Some(key);
        self.len += 1;
        key
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.unlink(None, head)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|k| self.get(k))
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|k| self.get(k))
    }

    /// Inserts `value` so that it ends up at position `pos`, shifting the
    /// element previously there (and everything after it) back by one.
    /// A `pos` at or past the end appends.
    pub fn insert_at(&mut self, value: T, pos: usize) {
        if pos == 0 {
            return self.push_front(value);
        }
        if pos >= self.len {
            return self.append(value);
        }

        let mut prev = self.head;
        for _ in 1..pos {
            prev = prev.and_then(|k| self.node(k)).and_then(|n| n.next);
        }

        match prev {
            Some(prev) => {
                let _ = self.link_after(prev, value);
            }
            None => self.append(value),
        }
    }

    /// Inserts `value` in front of the element at cursor `pos`, as reported
    /// by [`Iter::cursor`]. A `None` cursor is past the end and appends.
    ///
    /// Fails with [`InvalidPosition`] if `pos` names no element of this list;
    /// the list is unchanged on failure.
    pub fn insert_before(
        &mut self,
        value: T,
        pos: Option<NodeKey>,
    ) -> Result<NodeKey, InvalidPosition> {
        let target = match pos {
            Some(target) => target,
            None => return Ok(self.append_keyed(value)),
        };
        let (_, prev, _) = self.locate(|k, _| k == target).ok_or(InvalidPosition)?;
        Ok(match prev {
            Some(prev) => self.link_after(prev, value),
            None => self.push_front_keyed(value),
        })
    }

    /// Returns an iterator positioned at the first element equal to `value`.
    /// When nothing matches the iterator is already past the end.
    pub fn search(&self, value: &T) -> Iter<'_, T>
    where
        T: PartialEq,
    {
        match self.locate(|_, v| v == value) {
            Some((pos, _, key)) => Iter {
                nodes: self.nodes.as_ref(),
                cursor: Some(key),
                remaining: self.len - pos,
            },
            None => Iter {
                nodes: self.nodes.as_ref(),
                cursor: None,
                remaining: 0,
            },
        }
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Unlinks and returns the first element equal to `value`.
    pub fn erase(&mut self, value: &T) -> Result<T, ValueNotFound>
    where
        T: PartialEq,
    {
        self.remove_by(|v| v == value).ok_or(ValueNotFound)
    }

    /// Drops every element. The arena keeps its allocation.
    pub fn clear(&mut self) {
        if let Some(nodes) = self.nodes.as_mut() {
            nodes.clear();
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: self.nodes.as_ref(),
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Mutable iteration in chain order.
    ///
    /// Each call splits the arena into disjoint borrows first, which costs
    /// one pass over the arena and one side-table allocation sized to it.
    /// An empty list skips both.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len;
        let links = match self.nodes.as_mut() {
            Some(nodes) if len > 0 => {
                let mut links = SecondaryMap::with_capacity(nodes.capacity());
                for (key, node) in nodes.iter_mut() {
                    let Node { value, next } = node;
                    links.insert(key, (value, *next));
                }
                Some(links)
            }
            _ => None,
        };
        IterMut {
            links,
            cursor: self.head,
            remaining: len,
        }
    }

    fn node(&self, key: NodeKey) -> Option<&Node<T>> {
        self.nodes.as_ref()?.get(key)
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&T> {
        self.node(key).map(|n| &n.value)
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        self.nodes.as_mut()?.get_mut(key).map(|n| &mut n.value)
    }

    /// Key of the first element accepted by `pred`.
    pub(crate) fn find_key_by<F>(&self, mut pred: F) -> Option<NodeKey>
    where
        F: FnMut(&T) -> bool,
    {
        self.locate(|_, v| pred(v)).map(|(_, _, key)| key)
    }

    pub(crate) fn remove_by<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (_, prev, key) = self.locate(|_, v| pred(v))?;
        self.unlink(prev, key)
    }

    /// Removes the node with `key` if it is linked into this chain.
    pub(crate) fn remove_key(&mut self, key: NodeKey) -> Option<T> {
        let (_, prev, key) = self.locate(|k, _| k == key)?;
        self.unlink(prev, key)
    }

    /// Iterator starting at `key`, or None if `key` is not in this chain.
    pub(crate) fn iter_from_key(&self, key: NodeKey) -> Option<Iter<'_, T>> {
        let (pos, _, key) = self.locate(|k, _| k == key)?;
        Some(Iter {
            nodes: self.nodes.as_ref(),
            cursor: Some(key),
            remaining: self.len - pos,
        })
    }

    /// Walks the chain from the head and returns the position, predecessor
    /// and key of the first node accepted by `pred`.
    fn locate<F>(&self, mut pred: F) -> Option<(usize, Option<NodeKey>, NodeKey)>
    where
        F: FnMut(NodeKey, &T) -> bool,
    {
        let mut prev = None;
        let mut cursor = self.head;
        let mut pos = 0;
        while let Some(key) = cursor {
            let node = self.node(key)?;
            if pred(key, &node.value) {
                return Some((pos, prev, key));
            }
            prev = Some(key);
            cursor = node.next;
            pos += 1;
        }
        None
    }

    // `prev` must be linked into this chain.
    fn link_after(&mut self, prev: NodeKey, value: T) -> NodeKey {
        let nodes = self.nodes.get_or_insert_with(SlotMap::with_key);
        let next = nodes.get(prev).and_then(|n| n.next);
        let key = nodes.insert(Node::with_next(value, next));
        if let Some(prev) = nodes.get_mut(prev) {
            prev.next = Some(key);
        }
        if self.tail == Some(prev) {
            self.tail = Some(key);
        }
        self.len += 1;
        key
    }

    fn unlink(&mut self, prev: Option<NodeKey>, key: NodeKey) -> Option<T> {
        let nodes = self.nodes.as_mut()?;
        let node = nodes.remove(key)?;
        match prev.and_then(|p| nodes.get_mut(p)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        if self.tail == Some(key) {
            self.tail = prev;
        }
        self.len -= 1;
        Some(node.value)
    }

    fn arena_len(&self) -> usize {
        self.nodes.as_ref().map_or(0, SlotMap::len)
    }

    #[cfg(test)]
    pub(crate) fn has_arena(&self) -> bool {
        self.nodes.is_some()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.head.is_none(), self.len == 0, "head/len disagree");
        assert_eq!(self.len, self.arena_len(), "len/arena disagree");
        let mut steps = 0;
        let mut last = None;
        let mut cursor = self.head;
        while let Some(key) = cursor {
            steps += 1;
            assert!(steps <= self.len, "chain longer than len (cycle?)");
            last = Some(key);
            cursor = self.node(key).expect("linked key resolves").next;
        }
        assert_eq!(steps, self.len, "chain shorter than len");
        assert_eq!(last, self.tail, "tail is not the last node");
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        // The arena releases every node; the chain bookkeeping must agree.
        debug_assert!(
            self.head.is_some() || self.len == 0,
            "linked list reports {} elements but has no head",
            self.len
        );
        debug_assert_eq!(self.len, self.arena_len());
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    /// Copies the arena slot for slot, so a node key from `self` names the
    /// same element in the clone.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
        }
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

/// Forward iterator over shared references, in chain order.
pub struct Iter<'a, T> {
    nodes: Option<&'a Arena<T>>,
    cursor: Option<NodeKey>,
    remaining: usize,
}

impl<T> Iter<'_, T> {
    /// Key of the element the next call to `next` yields; None once past
    /// the end. Feed it to [`LinkedList::insert_before`].
    pub fn cursor(&self) -> Option<NodeKey> {
        self.cursor
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let node = self.nodes?.get(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

/// Forward iterator over mutable references, in chain order.
pub struct IterMut<'a, T> {
    links: Option<SecondaryMap<NodeKey, (&'a mut T, Option<NodeKey>)>>,
    cursor: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        let (value, next) = self.links.as_mut()?.remove(self.cursor?)?;
        self.cursor = next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator; pops from the front.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
