//! Object member-resolution runtime.
//!
//! Classes are registered by namespace-qualified name; the [`Runtime`]
//! resolves static properties, static calls (including calls a method body
//! makes into other namespaces), and instance property/method access.
//!
//! ```
//! use classmodel::{Module, Runtime};
//! use classmodel_core::{MethodEntry, QualifiedName, Value};
//!
//! let mut module = Module::new(&["LibClasses", "SUB"]);
//! let v = module.class("V").with_method(MethodEntry::static_("static_fun", 0, |ctx| {
//!     ctx.echo("V\n");
//!     Ok(Value::Int(7))
//! }));
//! module.add(v);
//!
//! let mut runtime = Runtime::new();
//! runtime.install(module).unwrap();
//!
//! let v = QualifiedName::from("LibClasses\\SUB\\V");
//! assert_eq!(runtime.call_static(&v, "static_fun", &[]).unwrap(), Value::Int(7));
//! assert_eq!(runtime.output(), "V\n");
//! ```

pub mod fixtures;
mod module;
mod options;
mod output;
mod runtime;

pub use module::Module;
pub use options::{RuntimeOptions, RuntimeProperty};
pub use output::Output;
pub use runtime::{CONSTRUCTOR, Runtime};

pub use classmodel_core::{
    ClassEntry, ClassModelError, MemberFlags, MethodEntry, ObjectHandle, PropertyEntry,
    QualifiedName, RegistrationError, RuntimeError, TypeHash, Value,
};
pub use classmodel_registry::ClassRegistry;
