//! Deterministic hash-based class and member identity.
//!
//! [`TypeHash`] is a 64-bit hash computed from a class's case-folded
//! qualified name, or from an owner class plus member name. Instances carry
//! the hash of their class so the heap never stores names.
//!
//! # Examples
//!
//! ```
//! use classmodel_core::TypeHash;
//!
//! let a = TypeHash::from_name("libclasses\\a");
//! assert_eq!(a, TypeHash::from_name("libclasses\\a"));
//!
//! let get = TypeHash::from_method(a, "get_value");
//! let set = TypeHash::from_method(a, "set_value");
//! assert_ne!(get, set);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
///
/// Keeps a class named `x` and a method named `x` from colliding.
pub mod hash_constants {
    /// Domain marker for class hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for method hashes
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for property hashes
    pub const PROPERTY: u64 = 0x1a095090689d4647;
}

/// A deterministic 64-bit hash identifying a class or one of its members.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a class hash from a qualified name.
    ///
    /// Callers pass the lookup key (see [`crate::QualifiedName::lookup_key`]);
    /// this function does not fold case itself.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a method hash from its owner class and method name.
    ///
    /// Method names are case-insensitive, so the name is folded first.
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str) -> Self {
        let folded = name.to_ascii_lowercase();
        let member = owner.0.rotate_left(17) ^ xxh64(folded.as_bytes(), 0);
        TypeHash(hash_constants::METHOD ^ member)
    }

    /// Create a property hash from its owner class and property name.
    ///
    /// Property names are case-sensitive.
    #[inline]
    pub fn from_property(owner: TypeHash, name: &str) -> Self {
        let member = owner.0.rotate_left(17) ^ xxh64(name.as_bytes(), 0);
        TypeHash(hash_constants::PROPERTY ^ member)
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
