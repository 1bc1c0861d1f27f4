//! Error types for the class model.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ClassModelError (top-level wrapper)
//! ├── RegistrationError - Class/member registration errors
//! └── RuntimeError      - Member resolution and dispatch errors
//! ```
//!
//! Each phase-specific error can be matched directly, or converted to
//! `ClassModelError` with `?` for unified handling.

use thiserror::Error;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while registering class definitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A class with the same (case-insensitive) qualified name exists.
    #[error("cannot declare class {0}, because the name is already in use")]
    DuplicateClass(String),

    /// A class declares the same member twice.
    #[error("cannot redeclare {class}::{member}")]
    DuplicateMember {
        /// The owning class.
        class: String,
        /// The duplicated member name.
        member: String,
    },

    /// The class name is empty or otherwise unusable.
    #[error("invalid class name: '{0}'")]
    InvalidName(String),
}

// ============================================================================
// Runtime Errors
// ============================================================================

/// Errors raised while resolving or invoking members.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// A class or static member reference could not be found in the registry.
    #[error("unresolved reference: {reference}")]
    UnresolvedReference {
        /// The reference as written after resolution (e.g. `LibClasses\SUB\V::static_fun`).
        reference: String,
    },

    /// An instance property was read that neither the class nor the
    /// instance declares.
    #[error("undefined property: {class}::${property}")]
    UnknownProperty {
        /// The instance's class.
        class: String,
        /// The property name.
        property: String,
    },

    /// An instance method was called without an instance.
    #[error("non-static method {class}::{method}() cannot be called statically")]
    NotStatic {
        /// The owning class.
        class: String,
        /// The method name.
        method: String,
    },

    /// A write targeted a class constant.
    #[error("cannot modify readonly member {class}::{member}")]
    ReadOnlyMember {
        /// The owning class.
        class: String,
        /// The member name.
        member: String,
    },

    /// A method body asked for `this` but was invoked statically.
    #[error("using $this when not in object context in {class}::{method}()")]
    MissingThis {
        /// The owning class.
        class: String,
        /// The method name.
        method: String,
    },

    /// A required argument was not supplied.
    #[error("too few arguments to {method}(): {required} required, {passed} passed")]
    MissingArgument {
        /// The qualified method name.
        method: String,
        /// Number of required parameters.
        required: usize,
        /// Number of arguments passed.
        passed: usize,
    },

    /// A handle to a released instance was used.
    #[error("stale handle: object at index {index} has been released")]
    StaleHandle {
        /// The index of the released object.
        index: u32,
    },

    /// Nested calls exceeded the configured depth limit.
    #[error("maximum call depth of {limit} exceeded")]
    CallDepthExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl RuntimeError {
    /// Build an unresolved reference error for `class::member`.
    pub fn unresolved(class: impl std::fmt::Display, member: &str) -> Self {
        RuntimeError::UnresolvedReference {
            reference: format!("{}::{}", class, member),
        }
    }

    /// Check if this is an unresolved reference.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, RuntimeError::UnresolvedReference { .. })
    }
}

// ============================================================================
// Unified Error
// ============================================================================

/// Top-level error wrapping every phase.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassModelError {
    /// A registration error.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// A runtime error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_display() {
        let err = RuntimeError::unresolved("LibClasses\\SUB\\V", "static_fun");
        assert_eq!(
            format!("{err}"),
            "unresolved reference: LibClasses\\SUB\\V::static_fun"
        );
        assert!(err.is_unresolved());
    }

    #[test]
    fn duplicate_class_display() {
        let err = RegistrationError::DuplicateClass("LibClasses\\A".into());
        assert_eq!(
            format!("{err}"),
            "cannot declare class LibClasses\\A, because the name is already in use"
        );
    }

    #[test]
    fn missing_argument_display() {
        let err = RuntimeError::MissingArgument {
            method: "LibClasses\\A::set_value".into(),
            required: 1,
            passed: 0,
        };
        assert_eq!(
            format!("{err}"),
            "too few arguments to LibClasses\\A::set_value(): 1 required, 0 passed"
        );
    }

    #[test]
    fn unknown_property_display() {
        let err = RuntimeError::UnknownProperty {
            class: "LibClasses\\A".into(),
            property: "missing".into(),
        };
        assert_eq!(
            format!("{err}"),
            "undefined property: LibClasses\\A::$missing"
        );
    }

    #[test]
    fn wrapper_is_transparent() {
        let inner = RuntimeError::StaleHandle { index: 4 };
        let err: ClassModelError = inner.clone().into();
        assert_eq!(format!("{err}"), format!("{inner}"));
        assert!(matches!(err, ClassModelError::Runtime(_)));
    }
}
