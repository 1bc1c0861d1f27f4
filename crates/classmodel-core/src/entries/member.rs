//! Member entries stored inside a `ClassEntry`.

use bitflags::bitflags;

use crate::runtime::{CallContext, NativeFn};
use crate::{RuntimeError, TypeHash, Value};

bitflags! {
    /// Modifiers attached to a property or method.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemberFlags: u8 {
        /// Bound to the class rather than to an instance.
        const STATIC = 1 << 0;
        /// Read-only after registration (class constants).
        const CONST = 1 << 1;
    }
}

/// A declared property: static slot, class constant, or instance field.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    /// Property name (without `$`).
    pub name: String,
    /// Initial value. For instance properties this is copied into every
    /// new instance; for static properties it seeds the class's slot.
    pub default: Value,
    /// Modifiers.
    pub flags: MemberFlags,
}

impl PropertyEntry {
    /// Create an instance property with a default value.
    pub fn instance(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
            flags: MemberFlags::empty(),
        }
    }

    /// Create a static property with an initial value.
    pub fn static_(name: impl Into<String>, initial: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: initial.into(),
            flags: MemberFlags::STATIC,
        }
    }

    /// Create a class constant.
    pub fn constant(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: value.into(),
            flags: MemberFlags::STATIC | MemberFlags::CONST,
        }
    }

    /// Check if this property belongs to the class.
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    /// Check if this property rejects writes.
    pub fn is_const(&self) -> bool {
        self.flags.contains(MemberFlags::CONST)
    }
}

/// A declared method with its native body.
#[derive(Debug, Clone)]
pub struct MethodEntry {
    /// Method name as declared.
    pub name: String,
    /// Number of required positional arguments.
    pub required_args: usize,
    /// Modifiers (`STATIC` or none).
    pub flags: MemberFlags,
    /// The method body.
    pub body: NativeFn,
}

impl MethodEntry {
    /// Create an instance method.
    pub fn instance<F>(name: impl Into<String>, required_args: usize, body: F) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            required_args,
            flags: MemberFlags::empty(),
            body: NativeFn::new(TypeHash::EMPTY, body),
        }
    }

    /// Create a static method.
    pub fn static_<F>(name: impl Into<String>, required_args: usize, body: F) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    {
        Self {
            flags: MemberFlags::STATIC,
            ..Self::instance(name, required_args, body)
        }
    }

    /// Check if this method is bound to the class.
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    /// Check if `name` refers to this method (case-insensitive).
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
