//! Runtime: member resolution and dispatch.
//!
//! A [`Runtime`] owns the class registry (and through it every class's
//! static slots), the heap of live instances, and the output buffer. All
//! operations go through `&mut self`, so state changes are strictly
//! sequential.
//!
//! # Example
//!
//! ```
//! use classmodel::{Runtime, fixtures::example1};
//! use classmodel_core::Value;
//!
//! let mut runtime = Runtime::new();
//! runtime.install(example1::module()).unwrap();
//!
//! let a = example1::construct(&mut runtime).unwrap();
//! example1::set_value(&mut runtime, a, Value::from("hello")).unwrap();
//! assert_eq!(example1::get_value(&mut runtime, a).unwrap(), Value::from("hello"));
//! ```

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use classmodel_core::{
    CallContext, ClassEntry, ClassModelError, NativeFn, ObjectHandle, ObjectHeap, QualifiedName,
    RuntimeError, RuntimeHost, ScriptObject, TypeHash, Value,
};
use classmodel_registry::ClassRegistry;

use crate::{Module, Output, RuntimeOptions};

/// Name of the method run by [`Runtime::construct`] when a class declares it.
pub const CONSTRUCTOR: &str = "__construct";

/// A resolved method, detached from the registry so it can run while the
/// runtime is mutably borrowed.
struct BoundMethod {
    class: QualifiedName,
    name: String,
    required_args: usize,
    is_static: bool,
    body: NativeFn,
}

impl BoundMethod {
    fn new(entry: &ClassEntry, method: &classmodel_core::MethodEntry) -> Self {
        Self {
            class: entry.name.clone(),
            name: method.name.clone(),
            required_args: method.required_args,
            is_static: method.is_static(),
            body: method.body.clone(),
        }
    }
}

/// Class model runtime.
#[derive(Debug)]
pub struct Runtime {
    registry: ClassRegistry,
    heap: ObjectHeap,
    output: Output,
    options: RuntimeOptions,
    depth: usize,
}

impl Runtime {
    /// Create a runtime with default options.
    pub fn new() -> Self {
        Self::with_options(RuntimeOptions::default())
    }

    /// Create a runtime with the given options.
    pub fn with_options(options: RuntimeOptions) -> Self {
        Self {
            registry: ClassRegistry::new(),
            heap: ObjectHeap::new(),
            output: Output::new(options.echo_stdout()),
            options,
            depth: 0,
        }
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a single class.
    pub fn register_class(&mut self, class: ClassEntry) -> Result<TypeHash, ClassModelError> {
        Ok(self.registry.register(class)?)
    }

    /// Register every class of a module.
    ///
    /// Stops at the first class that fails to register; classes registered
    /// before it stay registered.
    pub fn install(&mut self, module: Module) -> Result<(), ClassModelError> {
        debug!(
            namespace = %module.namespace().join("\\"),
            classes = module.class_count(),
            "installing module"
        );
        for class in module.into_classes() {
            self.register_class(class)?;
        }
        Ok(())
    }

    /// The class registry.
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// The options this runtime was created with.
    pub fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    // ==========================================================================
    // Output
    // ==========================================================================

    /// Everything echoed so far.
    pub fn output(&self) -> &str {
        self.output.as_str()
    }

    /// Take the echoed text, clearing the buffer.
    pub fn take_output(&mut self) -> String {
        self.output.take()
    }

    // ==========================================================================
    // Static Members
    // ==========================================================================

    /// Read a static property.
    pub fn read_static(&self, class: &QualifiedName, name: &str) -> Result<Value, RuntimeError> {
        self.registry.read_static(class, name)
    }

    /// Read a class constant.
    pub fn read_constant(&self, class: &QualifiedName, name: &str) -> Result<Value, RuntimeError> {
        self.registry.read_constant(class, name)
    }

    /// Overwrite a static property.
    pub fn write_static(
        &mut self,
        class: &QualifiedName,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError> {
        self.registry.write_static(class, name, value)
    }

    /// Invoke a static method.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::UnresolvedReference`] if the class or method is unknown
    /// - [`RuntimeError::NotStatic`] if the method needs an instance
    /// - anything the method body itself returns
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn call_static(
        &mut self,
        class: &QualifiedName,
        method: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let bound = {
            let (entry, found) = self.registry.resolve_method(class, method)?;
            BoundMethod::new(entry, found)
        };
        if !bound.is_static {
            return Err(RuntimeError::NotStatic {
                class: bound.class.to_string(),
                method: bound.name,
            });
        }
        self.dispatch(bound, None, args)
    }

    // ==========================================================================
    // Instances
    // ==========================================================================

    /// Create an instance.
    ///
    /// Instance properties start at their declared defaults; a declared
    /// `__construct` then runs with `args`. If it fails the instance is
    /// released and the error returned.
    ///
    /// The instance lives until [`Runtime::release`] is called with its
    /// handle. Handles are plain copyable indices, so dropping one does not
    /// free the instance.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn construct(
        &mut self,
        class: &QualifiedName,
        args: &[Value],
    ) -> Result<ObjectHandle, RuntimeError> {
        let (object, constructor) = {
            let entry = self.registry.resolve(class)?;
            let fields: FxHashMap<String, Value> = entry
                .instance_properties()
                .map(|p| (p.name.clone(), p.default.clone()))
                .collect();
            let constructor = entry
                .find_method(CONSTRUCTOR)
                .map(|m| BoundMethod::new(entry, m));
            (ScriptObject::new(entry.type_hash, fields), constructor)
        };

        let handle = self.heap.allocate(object);
        debug!(class = %class, index = handle.index, "constructed instance");

        if let Some(constructor) = constructor
            && let Err(err) = self.dispatch(constructor, Some(handle), args)
        {
            self.heap.free(handle);
            return Err(err);
        }
        Ok(handle)
    }

    /// Invoke a method on an instance.
    ///
    /// Static methods may be called through an instance; they run without
    /// `this`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn call_method(
        &mut self,
        this: ObjectHandle,
        method: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let bound = {
            let entry = self.class_of(this)?;
            let found = entry
                .find_method(method)
                .ok_or_else(|| RuntimeError::unresolved(&entry.name, method))?;
            BoundMethod::new(entry, found)
        };
        let receiver = if bound.is_static { None } else { Some(this) };
        self.dispatch(bound, receiver, args)
    }

    /// Read an instance property.
    pub fn get_property(&self, this: ObjectHandle, name: &str) -> Result<Value, RuntimeError> {
        let object = self.object(this)?;
        match object.get(name) {
            Some(value) => Ok(value.clone()),
            None => Err(RuntimeError::UnknownProperty {
                class: self.class_name(object.class),
                property: name.to_string(),
            }),
        }
    }

    /// Overwrite an instance property.
    ///
    /// Writing a property the class does not declare creates it on this
    /// instance only.
    pub fn set_property(
        &mut self,
        this: ObjectHandle,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let object = self
            .heap
            .get_mut(this)
            .ok_or(RuntimeError::StaleHandle { index: this.index })?;
        trace!(
            index = this.index,
            property = name,
            value = value.type_name(),
            "set property"
        );
        object.set(name, value);
        Ok(())
    }

    /// Destroy an instance, discarding its fields.
    ///
    /// Every handle to it becomes stale. Returns false if the handle was
    /// already stale.
    pub fn release(&mut self, this: ObjectHandle) -> bool {
        self.heap.free(this)
    }

    /// Qualified name of an instance's class.
    pub fn instance_class(&self, this: ObjectHandle) -> Result<QualifiedName, RuntimeError> {
        Ok(self.class_of(this)?.name.clone())
    }

    /// Number of live instances.
    pub fn live_instances(&self) -> usize {
        self.heap.live_count()
    }

    // ==========================================================================
    // Internals
    // ==========================================================================

    fn object(&self, this: ObjectHandle) -> Result<&ScriptObject, RuntimeError> {
        self.heap
            .get(this)
            .ok_or(RuntimeError::StaleHandle { index: this.index })
    }

    fn class_of(&self, this: ObjectHandle) -> Result<&ClassEntry, RuntimeError> {
        let hash = self.object(this)?.class;
        self.registry
            .get_by_hash(hash)
            .ok_or_else(|| RuntimeError::UnresolvedReference {
                reference: hash.to_string(),
            })
    }

    fn class_name(&self, hash: TypeHash) -> String {
        self.registry
            .get_by_hash(hash)
            .map(|entry| entry.name.to_string())
            .unwrap_or_else(|| hash.to_string())
    }

    /// Run a resolved method body.
    fn dispatch(
        &mut self,
        method: BoundMethod,
        this: Option<ObjectHandle>,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        if args.len() < method.required_args {
            return Err(RuntimeError::MissingArgument {
                method: format!("{}::{}", method.class, method.name),
                required: method.required_args,
                passed: args.len(),
            });
        }
        let limit = self.options.max_call_depth();
        if self.depth >= limit {
            return Err(RuntimeError::CallDepthExceeded { limit });
        }

        trace!(
            class = %method.class,
            method = %method.name,
            depth = self.depth,
            instance = this.is_some(),
            "dispatch"
        );

        self.depth += 1;
        let result = {
            let mut ctx = CallContext::new(self, &method.class, &method.name, this, args);
            method.body.call(&mut ctx)
        };
        self.depth -= 1;
        result
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeHost for Runtime {
    fn echo(&mut self, text: &str) {
        self.output.write(text);
    }

    fn call_static(
        &mut self,
        class: &QualifiedName,
        method: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        Runtime::call_static(self, class, method, args)
    }

    fn call_method(
        &mut self,
        this: ObjectHandle,
        method: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        Runtime::call_method(self, this, method, args)
    }

    fn construct(
        &mut self,
        class: &QualifiedName,
        args: &[Value],
    ) -> Result<ObjectHandle, RuntimeError> {
        Runtime::construct(self, class, args)
    }

    fn read_static(&self, class: &QualifiedName, name: &str) -> Result<Value, RuntimeError> {
        Runtime::read_static(self, class, name)
    }

    fn read_constant(&self, class: &QualifiedName, name: &str) -> Result<Value, RuntimeError> {
        Runtime::read_constant(self, class, name)
    }

    fn write_static(
        &mut self,
        class: &QualifiedName,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError> {
        Runtime::write_static(self, class, name, value)
    }

    fn get_property(&self, this: ObjectHandle, name: &str) -> Result<Value, RuntimeError> {
        Runtime::get_property(self, this, name)
    }

    fn set_property(
        &mut self,
        this: ObjectHandle,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError> {
        Runtime::set_property(self, this, name, value)
    }
}
