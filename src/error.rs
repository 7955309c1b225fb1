//! Error types reported by the list and the table.

use thiserror::Error;

/// Returned by `insert` when the key is already present. The table is left
/// unchanged: the existing value is not overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("duplicate key")]
    DuplicateKey,
}

/// Returned by accessors that require the key to be present (`at`, `erase`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("key not found in hash table")]
pub struct KeyNotFound;

/// Returned by `LinkedList::erase` when no element compares equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value not found in list")]
pub struct ValueNotFound;

/// Returned by `LinkedList::insert_before` when the cursor names no element
/// of that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("position not in list")]
pub struct InvalidPosition;
