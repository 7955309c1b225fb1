//! HashTable: fixed-capacity separate chaining over linked-list buckets.

use crate::entry::Entry;
use crate::error::{InsertError, KeyNotFound};
use crate::hash::{DefaultHash, KeyHash};
use crate::iter::{IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};
use crate::linked_list::LinkedList;
use crate::node::NodeKey;
use crate::reentrancy::ReentryCheck;
use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;
use log::{debug, trace};

/// Smallest capacity a table is ever built with.
pub const MIN_CAPACITY: usize = 16;

/// Rounds a requested capacity to the one a table is actually built with:
/// at least [`MIN_CAPACITY`], otherwise the next power of two.
///
/// # Panics
/// Panics if the next power of two does not fit in `usize`.
pub fn normalize_capacity(requested: usize) -> usize {
    if requested <= MIN_CAPACITY {
        return MIN_CAPACITY;
    }
    match requested.checked_next_power_of_two() {
        Some(capacity) => capacity,
        None => panic!("capacity overflow"),
    }
}

/// Copyable reference to one stored entry: its bucket and its node key.
///
/// A handle goes stale when its entry is removed; stale handles resolve to
/// `None` and never alias an entry inserted later.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle {
    bucket: usize,
    node: NodeKey,
}

impl Handle {
    /// Index of the bucket holding the entry.
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    pub fn entry<'a, K, V, H>(&self, table: &'a HashTable<K, V, H>) -> Option<&'a Entry<K, V>> {
        table.buckets.get(self.bucket)?.get(self.node)
    }

    pub fn key<'a, K, V, H>(&self, table: &'a HashTable<K, V, H>) -> Option<&'a K> {
        self.entry(table).map(Entry::key)
    }

    pub fn value<'a, K, V, H>(&self, table: &'a HashTable<K, V, H>) -> Option<&'a V> {
        self.entry(table).map(Entry::value)
    }

    pub fn value_mut<'a, K, V, H>(&self, table: &'a mut HashTable<K, V, H>) -> Option<&'a mut V> {
        table
            .buckets
            .get_mut(self.bucket)?
            .get_mut(self.node)
            .map(Entry::value_mut)
    }
}

/// A key-value table with separate chaining.
///
/// The bucket array is allocated once, at construction, and never grows:
/// every key stays in bucket `hash(key) % capacity` for the table's
/// lifetime. Keys only need `PartialEq` (so float keys work, though a NaN
/// key can never be found again); hashing is done by the functor `H`.
///
/// | Method | Cost |
/// |-|-|
/// | `insert`, `find`, `get`, `remove` | `O(chain length)` |
/// | `len`, `capacity`, `is_empty` | `O(1)` |
/// | full iteration | `O(capacity + len)` |
pub struct HashTable<K, V, H = DefaultHash> {
    buckets: Box<[LinkedList<Entry<K, V>>]>,
    len: usize,
    hasher: H,
    reentry: ReentryCheck,
}

impl<K, V> HashTable<K, V, DefaultHash> {
    /// Creates an empty table with [`MIN_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(MIN_CAPACITY, DefaultHash)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHash)
    }
}

impl<K, V, H> HashTable<K, V, H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_capacity_and_hasher(MIN_CAPACITY, hasher)
    }

    /// Creates an empty table whose capacity is `requested` normalized by
    /// [`normalize_capacity`].
    pub fn with_capacity_and_hasher(requested: usize, hasher: H) -> Self {
        let capacity = normalize_capacity(requested);
        if capacity != requested {
            debug!("hash table capacity {} normalized to {}", requested, capacity);
        }
        Self {
            buckets: (0..capacity).map(|_| LinkedList::new()).collect(),
            len: 0,
            hasher,
            reentry: ReentryCheck::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets. Always a power of two, at least [`MIN_CAPACITY`].
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket. Informational only: nothing resizes on it.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Length of the chain in `bucket`, or None if out of range.
    pub fn bucket_len(&self, bucket: usize) -> Option<usize> {
        self.buckets.get(bucket).map(LinkedList::len)
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Removes the entry a handle refers to. Stale handles return None.
    pub fn remove_handle(&mut self, handle: Handle) -> Option<(K, V)> {
        let entry = self.buckets.get_mut(handle.bucket)?.remove_key(handle.node)?;
        self.len -= 1;
        Some(entry.into_parts())
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.buckets.iter(), None, self.len)
    }

    /// Iteration starting at the entry `handle` refers to and continuing
    /// through the rest of its chain and the following buckets. Returns None
    /// for a stale handle.
    pub fn iter_from(&self, handle: Handle) -> Option<Iter<'_, K, V>> {
        let chain = self.buckets.get(handle.bucket)?.iter_from_key(handle.node)?;
        let rest = &self.buckets[handle.bucket + 1..];
        let remaining = chain.len() + rest.iter().map(LinkedList::len).sum::<usize>();
        Some(Iter::new(rest.iter(), Some(chain), remaining))
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.buckets.iter_mut(), self.len)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.iter_mut())
    }

    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys(self.into_iter())
    }

    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues(self.into_iter())
    }

    /// Bucket index for `key`, without the reentrancy check.
    fn index_for<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        H: KeyHash<Q>,
    {
        (self.hasher.hash(key) % self.buckets.len() as u64) as usize
    }

    fn locate<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        let bucket = self.index_for(key);
        let chain = &self.buckets[bucket];
        if chain.is_empty() {
            return None;
        }
        chain
            .find_key_by(|e| e.key.borrow() == key)
            .map(|node| Handle { bucket, node })
    }
}

impl<K, V, H> HashTable<K, V, H>
where
    K: PartialEq,
{
    /// Bucket the functor assigns to `key`, whether or not it is stored.
    pub fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        H: KeyHash<Q>,
    {
        let _g = self.reentry.enter();
        self.index_for(key)
    }

    /// Stores `key` → `value` at the end of its bucket's chain.
    ///
    /// Fails with [`InsertError::DuplicateKey`] if the key is already
    /// present; the existing value is kept and nothing is appended.
    pub fn insert(&mut self, key: K, value: V) -> Result<Handle, InsertError>
    where
        H: KeyHash<K>,
    {
        self.insert_with(key, || value)
    }

    /// Like [`insert`](Self::insert), but only builds the value when the key
    /// is new.
    pub fn insert_with<F>(&mut self, key: K, default: F) -> Result<Handle, InsertError>
    where
        H: KeyHash<K>,
        F: FnOnce() -> V,
    {
        let _g = self.reentry.enter();
        let bucket = self.index_for(&key);
        let chain = &mut self.buckets[bucket];
        if chain.find_key_by(|e| e.key == key).is_some() {
            trace!("rejected duplicate key in bucket {}", bucket);
            return Err(InsertError::DuplicateKey);
        }
        if !chain.is_empty() {
            trace!("bucket {} chain grows to {}", bucket, chain.len() + 1);
        }
        let node = chain.append_keyed(Entry::new(key, default()));
        self.len += 1;
        Ok(Handle { bucket, node })
    }

    /// Handle to the entry for `key`, or None (past-the-end) when absent.
    pub fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        let _g = self.reentry.enter();
        self.locate(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        self.find(key).is_some()
    }

    pub fn get_entry<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        self.find(key)?.entry(self)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        self.get_entry(key).map(Entry::value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        self.find(key)?.value_mut(self)
    }

    /// Value for a key the caller expects to be present.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        self.get(key).ok_or(KeyNotFound)
    }

    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        self.get_mut(key).ok_or(KeyNotFound)
    }

    /// Value for `key`, inserting `V::default()` first when the key is
    /// missing. Size grows by one only on a miss.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        H: KeyHash<K>,
        V: Default,
    {
        let _g = self.reentry.enter();
        let bucket = self.index_for(&key);
        let chain = &mut self.buckets[bucket];
        let node = match chain.find_key_by(|e| e.key == key) {
            Some(node) => node,
            None => {
                self.len += 1;
                chain.append_keyed(Entry::new(key, V::default()))
            }
        };
        match chain.get_mut(node) {
            Some(entry) => &mut entry.value,
            None => unreachable!("node key was just produced by this bucket"),
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Unlinks the entry for `key` and returns it as an owned pair.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        let _g = self.reentry.enter();
        let bucket = self.index_for(key);
        let entry = self.buckets[bucket].remove_by(|e| e.key.borrow() == key)?;
        self.len -= 1;
        Some(entry.into_parts())
    }

    /// Like [`remove`](Self::remove), but a missing key is an error.
    pub fn erase<Q>(&mut self, key: &Q) -> Result<V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: KeyHash<Q>,
    {
        self.remove(key).ok_or(KeyNotFound)
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self)
    where
        H: KeyHash<K>,
    {
        let mut total = 0;
        for (i, bucket) in self.buckets.iter().enumerate() {
            bucket.assert_consistent();
            total += bucket.len();
            for entry in bucket.iter() {
                assert_eq!(self.index_for(&entry.key), i, "entry stored in the wrong bucket");
            }
        }
        assert_eq!(total, self.len, "len is not the sum of chain lengths");
        assert!(self.capacity().is_power_of_two() && self.capacity() >= MIN_CAPACITY);
    }
}

impl<K, V> Default for HashTable<K, V, DefaultHash> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, Q, V, H> Index<&Q> for HashTable<K, V, H>
where
    K: PartialEq + Borrow<Q>,
    Q: PartialEq + ?Sized,
    H: KeyHash<Q>,
{
    type Output = V;

    /// # Panics
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key not found in hash table"),
        }
    }
}

impl<K: Clone, V: Clone, H: Clone> Clone for HashTable<K, V, H> {
    /// Buckets are copied slot for slot: a handle into the source resolves
    /// to the same key's entry in the clone, and a stale one stays stale.
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            hasher: self.hasher.clone(),
            reentry: ReentryCheck::new(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for HashTable<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, H> Extend<(K, V)> for HashTable<K, V, H>
where
    K: PartialEq,
    H: KeyHash<K>,
{
    /// Inserts every pair; a key already present keeps its first value.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            if self.insert(k, v).is_err() {
                trace!("extend skipped a duplicate key");
            }
        }
    }
}

impl<K, V, H> FromIterator<(K, V)> for HashTable<K, V, H>
where
    K: PartialEq,
    H: KeyHash<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut table = Self::with_capacity_and_hasher(iter.size_hint().0, H::default());
        table.extend(iter);
        table
    }
}

impl<K, V, H> IntoIterator for HashTable<K, V, H> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.buckets.into_vec().into_iter(), self.len)
    }
}

impl<'a, K, V, H> IntoIterator for &'a HashTable<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, H> IntoIterator for &'a mut HashTable<K, V, H> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
