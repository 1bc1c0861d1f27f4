//! Runtime-facing types: instance storage, method bodies and the call
//! context handed to them.
//!
//! Method bodies never see the concrete runtime. They talk to it through
//! [`RuntimeHost`], which the runtime crate implements.

mod call_context;
mod native_fn;
mod object_heap;

pub use call_context::CallContext;
pub use native_fn::{NativeCallable, NativeFn};
pub use object_heap::{ObjectHandle, ObjectHeap, ScriptObject};

use crate::{QualifiedName, RuntimeError, Value};

/// Operations a method body may perform on the runtime that invoked it.
///
/// Class names passed here are already resolved; relative names are handled
/// by [`CallContext`].
pub trait RuntimeHost {
    /// Append text to the runtime's output.
    fn echo(&mut self, text: &str);

    /// Invoke a static method.
    fn call_static(
        &mut self,
        class: &QualifiedName,
        method: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError>;

    /// Invoke a method on an instance.
    fn call_method(
        &mut self,
        this: ObjectHandle,
        method: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError>;

    /// Create an instance.
    fn construct(
        &mut self,
        class: &QualifiedName,
        args: &[Value],
    ) -> Result<ObjectHandle, RuntimeError>;

    /// Read a static property.
    fn read_static(&self, class: &QualifiedName, name: &str) -> Result<Value, RuntimeError>;

    /// Read a class constant.
    fn read_constant(&self, class: &QualifiedName, name: &str) -> Result<Value, RuntimeError>;

    /// Overwrite a static property.
    fn write_static(
        &mut self,
        class: &QualifiedName,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError>;

    /// Read an instance property.
    fn get_property(&self, this: ObjectHandle, name: &str) -> Result<Value, RuntimeError>;

    /// Overwrite an instance property.
    fn set_property(
        &mut self,
        this: ObjectHandle,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError>;
}
