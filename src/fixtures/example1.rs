//! `lib_examples/example1`: the `LibClasses\A` class.
//!
//! `A` declares
//!
//! - `static $field = "static public field\n"`
//! - `static function static_fun()`, which delegates to `SUB\V::static_fun()`
//! - `$value = 'str'` with `set_value($v)` / `get_value()`
//!
//! `SUB\V` is not part of this module. It is resolved relative to
//! `LibClasses` when `static_fun` runs, so whoever drives the fixture must
//! register `LibClasses\SUB\V` first or the call fails with an unresolved
//! reference.

use classmodel_core::{
    CallContext, MethodEntry, ObjectHandle, PropertyEntry, QualifiedName, RuntimeError, Value,
};

use crate::{Module, Runtime};

/// Namespace of the fixture.
pub const NAMESPACE: &str = "LibClasses";

/// Fully qualified name of the fixture class.
pub const CLASS: &str = "LibClasses\\A";

/// Class referenced by `static_fun`, as written in the method body.
pub const DELEGATE: &str = "SUB\\V";

/// Initial value of `A::$field`.
pub const STATIC_FIELD_DEFAULT: &str = "static public field\n";

/// Initial value of `$a->value`.
pub const VALUE_DEFAULT: &str = "str";

fn static_fun_body(ctx: &mut CallContext<'_>) -> Result<Value, RuntimeError> {
    ctx.echo("[example1] A: called static_fun()\n");
    ctx.echo("[example1] A: call SUB\\V::static_fun()\n");
    ctx.call_static(DELEGATE, "static_fun", &[])
}

fn set_value_body(ctx: &mut CallContext<'_>) -> Result<Value, RuntimeError> {
    ctx.echo("[example1] A: called public function set_value()\n");
    let v = ctx.arg(0)?.clone();
    ctx.set_field("value", v)?;
    Ok(Value::Null)
}

fn get_value_body(ctx: &mut CallContext<'_>) -> Result<Value, RuntimeError> {
    ctx.echo("[example1] A: called public function get_value()\n");
    ctx.get_field("value")
}

/// Build the module declaring `LibClasses\A`.
pub fn module() -> Module {
    let mut module = Module::new(&[NAMESPACE]);
    let a = module
        .class("A")
        .with_property(PropertyEntry::static_("field", STATIC_FIELD_DEFAULT))
        .with_method(MethodEntry::static_("static_fun", 0, static_fun_body))
        .with_property(PropertyEntry::instance("value", VALUE_DEFAULT))
        .with_method(MethodEntry::instance("set_value", 1, set_value_body))
        .with_method(MethodEntry::instance("get_value", 0, get_value_body));
    module.add(a);
    module
}

/// `LibClasses\A` as a qualified name.
pub fn class_name() -> QualifiedName {
    QualifiedName::from(CLASS)
}

/// `A::$field`
pub fn read_static_field(runtime: &Runtime) -> Result<Value, RuntimeError> {
    runtime.read_static(&class_name(), "field")
}

/// `A::static_fun()`
pub fn call_static_method(runtime: &mut Runtime) -> Result<Value, RuntimeError> {
    runtime.call_static(&class_name(), "static_fun", &[])
}

/// `new A()`
///
/// The instance stays on the runtime's heap until it is passed to
/// [`discard`].
pub fn construct(runtime: &mut Runtime) -> Result<ObjectHandle, RuntimeError> {
    runtime.construct(&class_name(), &[])
}

/// Drop an instance created by [`construct`].
///
/// Returns false if it was already discarded.
pub fn discard(runtime: &mut Runtime, a: ObjectHandle) -> bool {
    runtime.release(a)
}

/// `$a->set_value($v)`
pub fn set_value(runtime: &mut Runtime, a: ObjectHandle, v: Value) -> Result<(), RuntimeError> {
    runtime.call_method(a, "set_value", &[v]).map(|_| ())
}

/// `$a->get_value()`
pub fn get_value(runtime: &mut Runtime, a: ObjectHandle) -> Result<Value, RuntimeError> {
    runtime.call_method(a, "get_value", &[])
}
