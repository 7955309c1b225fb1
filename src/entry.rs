//! Key/value pair stored in a bucket node.

/// A stored key and its value. Keys are immutable once stored; changing a
/// key in place could move it to a different bucket.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
