//! Hash functors: strategies mapping a key to an unsigned bucket seed.
//!
//! The table reduces the seed modulo its capacity. `DefaultHash` is the
//! textbook multiplicative hash and is weak for two key kinds:
//! - floats always hash to 0, so every float key shares bucket 0;
//! - strings hash to their byte length, so same-length strings share a
//!   bucket.
//!
//! Both are kept as documented behavior. Use [`MixingHash`] (or your own
//! [`KeyHash`] impl) when keys need real distribution.

use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Knuth's multiplicative constant (an odd number close to 2^32 / phi).
pub const KNUTH_MULTIPLIER: u64 = 2_654_435_761;

const LOW_32_BITS: u64 = 0xFFFF_FFFF;

/// A hashing strategy for keys of type `K`.
pub trait KeyHash<K: ?Sized> {
    fn hash(&self, key: &K) -> u64;
}

/// `(x * KNUTH_MULTIPLIER) mod 2^32`.
#[inline]
pub const fn knuth(x: u64) -> u64 {
    x.wrapping_mul(KNUTH_MULTIPLIER) & LOW_32_BITS
}

/// Keys that [`DefaultHash`] knows how to hash.
pub trait KnuthHash {
    fn knuth_hash(&self) -> u64;
}

macro_rules! knuth_unsigned {
    ($($t:ty),*) => {$(
        impl KnuthHash for $t {
            #[inline]
            fn knuth_hash(&self) -> u64 {
                knuth(*self as u64)
            }
        }
    )*};
}

// Signed keys are sign-extended first, so -1 multiplies as 2^64 - 1.
macro_rules! knuth_signed {
    ($($t:ty),*) => {$(
        impl KnuthHash for $t {
            #[inline]
            fn knuth_hash(&self) -> u64 {
                knuth(*self as i64 as u64)
            }
        }
    )*};
}

knuth_unsigned!(u8, u16, u32, u64, usize);
knuth_signed!(i8, i16, i32, i64, isize);

impl KnuthHash for char {
    #[inline]
    fn knuth_hash(&self) -> u64 {
        knuth(*self as u64)
    }
}

impl KnuthHash for bool {
    #[inline]
    fn knuth_hash(&self) -> u64 {
        knuth(*self as u64)
    }
}

impl KnuthHash for f32 {
    #[inline]
    fn knuth_hash(&self) -> u64 {
        0
    }
}

impl KnuthHash for f64 {
    #[inline]
    fn knuth_hash(&self) -> u64 {
        0
    }
}

impl KnuthHash for str {
    #[inline]
    fn knuth_hash(&self) -> u64 {
        self.len() as u64
    }
}

impl KnuthHash for String {
    #[inline]
    fn knuth_hash(&self) -> u64 {
        self.as_str().knuth_hash()
    }
}

impl<T: KnuthHash + ?Sized> KnuthHash for &T {
    #[inline]
    fn knuth_hash(&self) -> u64 {
        (**self).knuth_hash()
    }
}

/// The default functor: Knuth multiplicative hashing for integers, 0 for
/// floats, length for strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultHash;

impl<K: KnuthHash + ?Sized> KeyHash<K> for DefaultHash {
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        key.knuth_hash()
    }
}

/// Bit-mixing functor for any `K: Hash`, backed by a [`BuildHasher`].
///
/// Defaults to hashbrown's builder.
#[derive(Debug, Clone, Default)]
pub struct MixingHash<S = DefaultHashBuilder> {
    builder: S,
}

impl<S> MixingHash<S> {
    pub fn with_builder(builder: S) -> Self {
        Self { builder }
    }
}

impl<K, S> KeyHash<K> for MixingHash<S>
where
    K: Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.builder.hash_one(key)
    }
}

/// Adapts a closure `Fn(&K) -> u64` into a functor.
#[derive(Clone, Copy)]
pub struct FnHash<F>(pub F);

impl<K, F> KeyHash<K> for FnHash<F>
where
    K: ?Sized,
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        (self.0)(key)
    }
}

impl<F> fmt::Debug for FnHash<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnHash(..)")
    }
}
