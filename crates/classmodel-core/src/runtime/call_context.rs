//! Call context bridging the runtime and method bodies.

use std::fmt;

use crate::{QualifiedName, RuntimeError, Value};

use super::{ObjectHandle, RuntimeHost};

/// Context for a single method invocation.
///
/// Carries the defining class, the receiver (absent for static calls) and
/// the arguments, and forwards everything else to the [`RuntimeHost`].
///
/// Class references made from inside a body resolve against the defining
/// class's namespace:
///
/// ```ignore
/// // inside LibClasses\A
/// ctx.call_static("SUB\\V", "static_fun", &[])?;   // LibClasses\SUB\V
/// ctx.call_static("\\SUB\\V", "static_fun", &[])?; // SUB\V
/// ctx.read_static("self", "field")?;               // LibClasses\A
/// ```
pub struct CallContext<'a> {
    host: &'a mut dyn RuntimeHost,
    class: &'a QualifiedName,
    method: &'a str,
    this: Option<ObjectHandle>,
    args: &'a [Value],
}

impl<'a> CallContext<'a> {
    /// Create a new call context.
    ///
    /// # Arguments
    ///
    /// * `host` - The runtime executing the call
    /// * `class` - The class that defines the method
    /// * `method` - The method name, for diagnostics
    /// * `this` - The receiver, or `None` for static calls
    /// * `args` - The call arguments
    pub fn new(
        host: &'a mut dyn RuntimeHost,
        class: &'a QualifiedName,
        method: &'a str,
        this: Option<ObjectHandle>,
        args: &'a [Value],
    ) -> Self {
        Self {
            host,
            class,
            method,
            this,
            args,
        }
    }

    /// The class that defines the executing method.
    pub fn class(&self) -> &QualifiedName {
        self.class
    }

    /// The executing method's name.
    pub fn method(&self) -> &str {
        self.method
    }

    /// Get the receiver.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingThis`] for static invocations.
    pub fn this(&self) -> Result<ObjectHandle, RuntimeError> {
        self.this.ok_or_else(|| RuntimeError::MissingThis {
            class: self.class.to_string(),
            method: self.method.to_string(),
        })
    }

    /// Get the number of arguments passed.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Get an argument by position.
    pub fn arg(&self, index: usize) -> Result<&Value, RuntimeError> {
        self.args
            .get(index)
            .ok_or_else(|| RuntimeError::MissingArgument {
                method: format!("{}::{}", self.class, self.method),
                required: index + 1,
                passed: self.args.len(),
            })
    }

    /// All arguments.
    pub fn args(&self) -> &[Value] {
        self.args
    }

    /// Resolve a class reference written inside the defining class.
    pub fn resolve_class(&self, reference: &str) -> QualifiedName {
        if reference.eq_ignore_ascii_case("self") || reference.eq_ignore_ascii_case("static") {
            return self.class.clone();
        }
        QualifiedName::resolve_in(reference, &self.class.namespace)
    }

    /// Write text to the runtime output.
    pub fn echo(&mut self, text: &str) {
        self.host.echo(text);
    }

    /// Call a static method on a referenced class.
    pub fn call_static(
        &mut self,
        class: &str,
        method: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let target = self.resolve_class(class);
        self.host.call_static(&target, method, args)
    }

    /// Call a method on an instance.
    pub fn call_method(
        &mut self,
        this: ObjectHandle,
        method: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        self.host.call_method(this, method, args)
    }

    /// Construct an instance of a referenced class.
    pub fn construct(&mut self, class: &str, args: &[Value]) -> Result<ObjectHandle, RuntimeError> {
        let target = self.resolve_class(class);
        self.host.construct(&target, args)
    }

    /// Read a static property of a referenced class.
    pub fn read_static(&self, class: &str, name: &str) -> Result<Value, RuntimeError> {
        let target = self.resolve_class(class);
        self.host.read_static(&target, name)
    }

    /// Read a constant of a referenced class.
    pub fn read_constant(&self, class: &str, name: &str) -> Result<Value, RuntimeError> {
        let target = self.resolve_class(class);
        self.host.read_constant(&target, name)
    }

    /// Write a static property of a referenced class.
    pub fn write_static(
        &mut self,
        class: &str,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let target = self.resolve_class(class);
        self.host.write_static(&target, name, value)
    }

    /// Read a property of the receiver.
    pub fn get_field(&self, name: &str) -> Result<Value, RuntimeError> {
        let this = self.this()?;
        self.host.get_property(this, name)
    }

    /// Overwrite a property of the receiver.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        let this = self.this()?;
        self.host.set_property(this, name, value)
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("class", &self.class)
            .field("method", &self.method)
            .field("this", &self.this)
            .field("arg_count", &self.args.len())
            .finish()
    }
}
