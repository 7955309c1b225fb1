//! chained-hashtable: a fixed-capacity, separate-chaining hash table built
//! over singly-linked bucket lists.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container whose pieces can each be reasoned
//!   about on their own.
//! - Layers:
//!   - `Node<T>`: one value plus the key of its successor.
//!   - `LinkedList<T>`: ordered chain of nodes stored in a per-list slotmap
//!     arena; append, search, erase-by-value, forward iteration.
//!   - `KeyHash<K>`: pluggable hash functor; `DefaultHash` is the
//!     multiplicative (Knuth) hash.
//!   - `HashTable<K, V, H>`: one `LinkedList<Entry<K, V>>` per bucket,
//!     `index = hash(key) % capacity`.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` (a debug-only reentrancy check lives
//!   inside the table).
//! - Capacity is a power of two, at least 16, fixed at construction. There
//!   is no rehash, so a key never moves between buckets.
//! - Unique keys: duplicate inserts fail with `InsertError::DuplicateKey`
//!   and leave the stored value untouched.
//! - Absence is `None` (the past-the-end position); accessors that require
//!   presence return `KeyNotFound`.
//!
//! Iteration
//! - Tables iterate bucket 0's chain to exhaustion, then each following
//!   non-empty bucket, until all buckets are exhausted. Every entry is seen
//!   exactly once.
//!
//! Hashing caveats
//! - `DefaultHash` maps every float key to 0 and every string to its length.
//!   Both are kept as documented behavior; pick `MixingHash` or a custom
//!   `KeyHash` impl for real distribution.
//!
//! Reentrancy
//! - The table calls user code (hash functor, `K: PartialEq`) while walking
//!   a chain. Calling back into the same table from there panics in debug
//!   builds.
//!
//! Notes and non-goals
//! - No resizing, no concurrency, no persistence.
//! - Handles are plain `(bucket, node)` pairs; they go stale on removal and
//!   never alias a later entry thanks to generational node keys.

pub mod entry;
pub mod error;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;
pub mod iter;
pub mod linked_list;
pub mod node;
mod reentrancy;

// Public surface
pub use entry::Entry;
pub use error::{InsertError, InvalidPosition, KeyNotFound, ValueNotFound};
pub use hash::{DefaultHash, FnHash, KeyHash, KnuthHash, MixingHash};
pub use hash_table::{normalize_capacity, Handle, HashTable, MIN_CAPACITY};
pub use linked_list::LinkedList;
pub use node::NodeKey;
