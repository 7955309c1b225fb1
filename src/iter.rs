//! Table iterators. Order: bucket 0's chain to exhaustion, then the chain of
//! each following non-empty bucket, until every bucket is exhausted.

use crate::entry::Entry;
use crate::linked_list::{self, LinkedList};
use core::iter::FusedIterator;
use core::slice;

type Bucket<K, V> = LinkedList<Entry<K, V>>;

/// Iterator over `(&K, &V)` pairs.
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, Bucket<K, V>>,
    chain: Option<linked_list::Iter<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        buckets: slice::Iter<'a, Bucket<K, V>>,
        chain: Option<linked_list::Iter<'a, Entry<K, V>>>,
        remaining: usize,
    ) -> Self {
        Iter {
            buckets,
            chain,
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(entry.pair());
            }
            self.chain = Some(self.buckets.find(|b| !b.is_empty())?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            buckets: self.buckets.clone(),
            chain: self.chain.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over `(&K, &mut V)` pairs. Keys stay immutable.
pub struct IterMut<'a, K, V> {
    buckets: slice::IterMut<'a, Bucket<K, V>>,
    chain: Option<linked_list::IterMut<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(buckets: slice::IterMut<'a, Bucket<K, V>>, remaining: usize) -> Self {
        IterMut {
            buckets,
            chain: None,
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining = self.remaining.saturating_sub(1);
                let Entry { key, value } = entry;
                return Some((&*key, value));
            }
            self.chain = Some(self.buckets.find(|b| !b.is_empty())?.iter_mut());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)` pairs.
pub struct IntoIter<K, V> {
    buckets: std::vec::IntoIter<Bucket<K, V>>,
    chain: Option<linked_list::IntoIter<Entry<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(buckets: std::vec::IntoIter<Bucket<K, V>>, remaining: usize) -> Self {
        IntoIter {
            buckets,
            chain: None,
            remaining,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(entry.into_parts());
            }
            self.chain = Some(self.buckets.find(|b| !b.is_empty())?.into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

macro_rules! project {
    ($(#[$doc:meta])* $name:ident<$($lt:lifetime,)? K, V>($inner:ty) => $item:ty, |$pat:pat_param| $out:expr) => {
        $(#[$doc])*
        pub struct $name<$($lt,)? K, V>(pub(crate) $inner);

        impl<$($lt,)? K, V> Iterator for $name<$($lt,)? K, V> {
            type Item = $item;

            #[inline]
            fn next(&mut self) -> Option<$item> {
                self.0.next().map(|$pat| $out)
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.0.size_hint()
            }
        }

        impl<$($lt,)? K, V> ExactSizeIterator for $name<$($lt,)? K, V> {}
        impl<$($lt,)? K, V> FusedIterator for $name<$($lt,)? K, V> {}
    };
}

project!(
    /// Iterator over keys.
    Keys<'a, K, V>(Iter<'a, K, V>) => &'a K, |(k, _)| k
);
project!(
    /// Iterator over values.
    Values<'a, K, V>(Iter<'a, K, V>) => &'a V, |(_, v)| v
);
project!(
    /// Iterator over mutable values.
    ValuesMut<'a, K, V>(IterMut<'a, K, V>) => &'a mut V, |(_, v)| v
);
project!(
    /// Owning iterator over keys.
    IntoKeys<K, V>(IntoIter<K, V>) => K, |(k, _)| k
);
project!(
    /// Owning iterator over values.
    IntoValues<K, V>(IntoIter<K, V>) => V, |(_, v)| v
);
