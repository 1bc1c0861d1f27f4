//! Native method storage and callable trait.

use std::fmt;
use std::sync::Arc;

use crate::{RuntimeError, TypeHash, Value};

use super::CallContext;

/// Type-erased method body.
///
/// Wraps any callable implementing `NativeCallable` so methods of every
/// class can be stored uniformly in the registry. The callable is shared
/// through an `Arc`, letting the runtime clone the body out of the registry
/// before invoking it.
pub struct NativeFn {
    /// Method identity (owner class + method name).
    pub id: TypeHash,
    inner: Arc<dyn NativeCallable + Send + Sync>,
}

impl NativeFn {
    /// Create a new NativeFn from a callable with a specific ID.
    pub fn new<F>(id: TypeHash, f: F) -> Self
    where
        F: NativeCallable + Send + Sync + 'static,
    {
        Self {
            id,
            inner: Arc::new(f),
        }
    }

    /// Call this method body with the given context.
    pub fn call(&self, ctx: &mut CallContext<'_>) -> Result<Value, RuntimeError> {
        self.inner.call(ctx)
    }

    /// Re-key this body under a new ID, sharing the same callable.
    pub fn with_id(&self, id: TypeHash) -> Self {
        Self {
            id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Clone for NativeFn {
    fn clone(&self) -> Self {
        self.with_id(self.id)
    }
}

/// Trait for callable method bodies.
///
/// The `call` method receives a `CallContext` giving access to `this`, the
/// arguments, and the rest of the runtime (output, static members, other
/// classes).
pub trait NativeCallable {
    /// Call this function with the given context.
    fn call(&self, ctx: &mut CallContext<'_>) -> Result<Value, RuntimeError>;
}

impl<F> NativeCallable for F
where
    F: Fn(&mut CallContext<'_>) -> Result<Value, RuntimeError>,
{
    fn call(&self, ctx: &mut CallContext<'_>) -> Result<Value, RuntimeError> {
        (self)(ctx)
    }
}
