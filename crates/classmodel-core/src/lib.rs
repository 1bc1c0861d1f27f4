//! Core types for the classmodel runtime.
//!
//! This crate holds everything shared between the registry and the runtime:
//! names and hashes, runtime values, class entries, instance storage, and
//! the [`CallContext`] through which method bodies reach the runtime.

mod entries;
mod error;
mod qualified_name;
mod type_hash;
mod value;

pub mod runtime;

pub use entries::{ClassEntry, MemberFlags, MethodEntry, PropertyEntry};
pub use error::{ClassModelError, RegistrationError, RuntimeError};
pub use qualified_name::{NAMESPACE_SEPARATOR, QualifiedName};
pub use runtime::{
    CallContext, NativeCallable, NativeFn, ObjectHandle, ObjectHeap, RuntimeHost, ScriptObject,
};
pub use type_hash::TypeHash;
pub use value::Value;
