//! ClassRegistry - qualified-name keyed class storage.
//!
//! This module provides [`ClassRegistry`], the central table of class
//! definitions. Every cross-class reference a method body makes is resolved
//! here by direct lookup at call time; a missing class or member is an
//! explicit [`RuntimeError::UnresolvedReference`], never a silent default.
//!
//! # Storage Model
//!
//! - **Classes**: `ClassEntry` values keyed by case-folded qualified name.
//! - **Hash index**: `TypeHash` -> key, so instances can find their class.
//! - **Namespace index**: namespace -> class names declared directly in it.
//! - **Static slots**: one [`StaticSlots`] per class, created at registration.
//!   Constants have no slot and are read from the class entry.
//!
//! # Thread Safety
//!
//! `ClassRegistry` is not synchronised. Static slots are mutated through
//! `&mut self`, so a caller sharing the registry across threads wraps it
//! (or the runtime that owns it) in a lock.
//!
//! # Example
//!
//! ```
//! use classmodel_registry::ClassRegistry;
//! use classmodel_core::{ClassEntry, PropertyEntry, QualifiedName, Value};
//!
//! let mut registry = ClassRegistry::new();
//! registry
//!     .register(ClassEntry::new("LibClasses\\A")
//!         .with_property(PropertyEntry::static_("field", "static public field\n")))
//!     .unwrap();
//!
//! let a = QualifiedName::from("LibClasses\\A");
//! assert_eq!(
//!     registry.read_static(&a, "field").unwrap(),
//!     Value::from("static public field\n")
//! );
//! ```

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use classmodel_core::{
    ClassEntry, MethodEntry, PropertyEntry, QualifiedName, RegistrationError, RuntimeError,
    TypeHash, Value,
};

use crate::StaticSlots;

/// Class definition registry.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    /// Classes stored by case-folded qualified name (PRIMARY storage).
    classes: FxHashMap<String, ClassEntry>,

    /// Reverse index: hash -> key.
    hash_to_key: FxHashMap<TypeHash, String>,

    /// Classes indexed by case-folded namespace.
    by_namespace: FxHashMap<String, Vec<QualifiedName>>,

    /// Static slots by class hash.
    statics: FxHashMap<TypeHash, StaticSlots>,
}

impl ClassRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a class definition and create its static slots.
    ///
    /// # Errors
    ///
    /// Fails if the definition is invalid or a class with the same
    /// (case-insensitive) name is already registered.
    pub fn register(&mut self, entry: ClassEntry) -> Result<TypeHash, RegistrationError> {
        entry.validate()?;

        let key = entry.name.lookup_key();
        if self.classes.contains_key(&key) {
            return Err(RegistrationError::DuplicateClass(entry.name.to_string()));
        }

        let hash = entry.type_hash;
        let slots = StaticSlots::for_class(&entry);
        debug!(
            class = %entry.name,
            statics = slots.len(),
            methods = entry.methods.len(),
            "registered class"
        );

        self.by_namespace
            .entry(entry.name.namespace_string().to_ascii_lowercase())
            .or_default()
            .push(entry.name.clone());
        self.statics.insert(hash, slots);
        self.hash_to_key.insert(hash, key.clone());
        self.classes.insert(key, entry);
        Ok(hash)
    }

    // ==========================================================================
    // Class Lookup
    // ==========================================================================

    /// Get a class by qualified name.
    pub fn get(&self, name: &QualifiedName) -> Option<&ClassEntry> {
        self.classes.get(&name.lookup_key())
    }

    /// Get a class by its hash.
    pub fn get_by_hash(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.hash_to_key
            .get(&hash)
            .and_then(|key| self.classes.get(key))
    }

    /// Check if a class exists.
    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.classes.contains_key(&name.lookup_key())
    }

    /// Get a class, failing with an unresolved reference if absent.
    pub fn resolve(&self, name: &QualifiedName) -> Result<&ClassEntry, RuntimeError> {
        self.get(name).ok_or_else(|| RuntimeError::UnresolvedReference {
            reference: name.to_string(),
        })
    }

    /// Classes declared directly in `namespace` (e.g. `LibClasses\SUB`).
    pub fn classes_in_namespace(&self, namespace: &str) -> &[QualifiedName] {
        let key = namespace
            .trim_start_matches(classmodel_core::NAMESPACE_SEPARATOR)
            .to_ascii_lowercase();
        self.by_namespace
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate over all registered classes.
    pub fn iter(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values()
    }

    // ==========================================================================
    // Member Resolution
    // ==========================================================================

    /// Resolve `class::method`.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::UnresolvedReference`] if the class is not registered
    /// or does not declare the method.
    pub fn resolve_method(
        &self,
        class: &QualifiedName,
        method: &str,
    ) -> Result<(&ClassEntry, &MethodEntry), RuntimeError> {
        let entry = self
            .get(class)
            .ok_or_else(|| RuntimeError::unresolved(class, method))?;
        let found = entry
            .find_method(method)
            .ok_or_else(|| RuntimeError::unresolved(&entry.name, method))?;
        trace!(class = %entry.name, method = %found.name, "resolved method");
        Ok((entry, found))
    }

    /// Resolve a static property declaration.
    fn resolve_static_property(
        &self,
        class: &QualifiedName,
        name: &str,
    ) -> Result<(&ClassEntry, &PropertyEntry), RuntimeError> {
        let unresolved = || RuntimeError::unresolved(class, &format!("${}", name));
        let entry = self.get(class).ok_or_else(unresolved)?;
        let property = entry.find_static(name).ok_or_else(unresolved)?;
        Ok((entry, property))
    }

    // ==========================================================================
    // Static Slots
    // ==========================================================================

    /// Read the current value of a static property (`A::$name`).
    pub fn read_static(&self, class: &QualifiedName, name: &str) -> Result<Value, RuntimeError> {
        let (entry, _) = self.resolve_static_property(class, name)?;
        let slots = self.statics.get(&entry.type_hash);
        match slots.and_then(|slots| slots.get(name)) {
            Some(value) => Ok(value.clone()),
            None => Err(RuntimeError::unresolved(&entry.name, &format!("${}", name))),
        }
    }

    /// Read a class constant (`A::NAME`).
    ///
    /// Constants are separate from static properties, so a class may
    /// declare both `NAME` and `$NAME`.
    pub fn read_constant(&self, class: &QualifiedName, name: &str) -> Result<Value, RuntimeError> {
        let unresolved = || RuntimeError::unresolved(class, name);
        let entry = self.get(class).ok_or_else(unresolved)?;
        let constant = entry.find_constant(name).ok_or_else(unresolved)?;
        Ok(constant.default.clone())
    }

    /// Overwrite a static property.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::ReadOnlyMember`] if the class only declares a
    /// constant with this name, [`RuntimeError::UnresolvedReference`] for
    /// unknown classes or properties.
    pub fn write_static(
        &mut self,
        class: &QualifiedName,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError> {
        if let Some(entry) = self.get(class)
            && entry.find_static(name).is_none()
            && entry.find_constant(name).is_some()
        {
            return Err(RuntimeError::ReadOnlyMember {
                class: entry.name.to_string(),
                member: name.to_string(),
            });
        }
        let (entry, _) = self.resolve_static_property(class, name)?;
        let hash = entry.type_hash;
        let class_name = entry.name.to_string();
        trace!(
            class = %class_name,
            property = name,
            value = value.type_name(),
            "write static"
        );

        let written = self
            .statics
            .get_mut(&hash)
            .is_some_and(|slots| slots.set(name, value));
        if written {
            Ok(())
        } else {
            Err(RuntimeError::unresolved(class_name, &format!("${}", name)))
        }
    }

    /// Get the static slots of a class.
    pub fn static_slots(&self, class: &QualifiedName) -> Option<&StaticSlots> {
        let entry = self.get(class)?;
        self.statics.get(&entry.type_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classmodel_core::{CallContext, PropertyEntry};

    fn noop(_: &mut CallContext<'_>) -> Result<Value, RuntimeError> {
        Ok(Value::Null)
    }

    fn class_a() -> ClassEntry {
        ClassEntry::new("LibClasses\\A")
            .with_property(PropertyEntry::static_("field", "static public field\n"))
            .with_property(PropertyEntry::constant("NAME", "A"))
            .with_method(MethodEntry::static_("static_fun", 0, noop))
            .with_property(PropertyEntry::instance("value", "str"))
            .with_method(MethodEntry::instance("get_value", 0, noop))
    }

    fn class_v() -> ClassEntry {
        ClassEntry::new("LibClasses\\SUB\\V")
            .with_method(MethodEntry::static_("static_fun", 0, noop))
    }

    fn a() -> QualifiedName {
        QualifiedName::from("LibClasses\\A")
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ClassRegistry::new();
        let hash = registry.register(class_a()).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&a()));
        assert_eq!(registry.get_by_hash(hash).unwrap().name, a());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut registry = ClassRegistry::new();
        registry.register(class_a()).unwrap();
        let folded = QualifiedName::from("\\libclasses\\a");
        assert_eq!(registry.get(&folded).unwrap().name, a());
    }

    #[test]
    fn duplicate_class_rejected() {
        let mut registry = ClassRegistry::new();
        registry.register(class_a()).unwrap();
        let err = registry
            .register(ClassEntry::new("LIBCLASSES\\A"))
            .unwrap_err();
        let expected = RegistrationError::DuplicateClass("LIBCLASSES\\A".into());
        assert_eq!(err, expected);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn invalid_definition_not_registered() {
        let mut registry = ClassRegistry::new();
        let bad = class_a().with_method(MethodEntry::static_("STATIC_FUN", 0, noop));
        assert!(registry.register(bad).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn namespace_index() {
        let mut registry = ClassRegistry::new();
        registry.register(class_a()).unwrap();
        registry.register(class_v()).unwrap();

        assert_eq!(registry.classes_in_namespace("LibClasses"), &[a()]);
        assert_eq!(
            registry.classes_in_namespace("\\libclasses\\sub"),
            &[QualifiedName::from("LibClasses\\SUB\\V")]
        );
        assert!(registry.classes_in_namespace("Other").is_empty());
    }

    #[test]
    fn resolve_method_across_namespaces() {
        let mut registry = ClassRegistry::new();
        registry.register(class_a()).unwrap();
        registry.register(class_v()).unwrap();

        let v = QualifiedName::from("LibClasses\\SUB\\V");
        let (entry, method) = registry.resolve_method(&v, "static_fun").unwrap();
        assert_eq!(entry.name, v);
        assert!(method.is_static());
    }

    #[test]
    fn resolve_missing_class() {
        let registry = ClassRegistry::new();
        let v = QualifiedName::from("LibClasses\\SUB\\V");
        let err = registry.resolve_method(&v, "static_fun").unwrap_err();
        let expected = RuntimeError::unresolved("LibClasses\\SUB\\V", "static_fun");
        assert_eq!(err, expected);
        assert!(registry.resolve(&v).unwrap_err().is_unresolved());
    }

    #[test]
    fn resolve_missing_method() {
        let mut registry = ClassRegistry::new();
        let v = QualifiedName::from("LibClasses\\SUB\\V");
        registry.register(ClassEntry::new(v.clone())).unwrap();
        let err = registry.resolve_method(&v, "static_fun").unwrap_err();
        assert!(err.is_unresolved());
    }

    #[test]
    fn static_slot_initial_value() {
        let mut registry = ClassRegistry::new();
        registry.register(class_a()).unwrap();
        assert_eq!(
            registry.read_static(&a(), "field").unwrap(),
            Value::from("static public field\n")
        );
        assert_eq!(registry.static_slots(&a()).unwrap().len(), 1);
    }

    #[test]
    fn static_slot_write_is_shared() {
        let mut registry = ClassRegistry::new();
        registry.register(class_a()).unwrap();
        registry
            .write_static(&a(), "field", Value::from("changed"))
            .unwrap();

        let folded = QualifiedName::from("libclasses\\A");
        let value = registry.read_static(&folded, "field").unwrap();
        assert_eq!(value, Value::from("changed"));
    }

    #[test]
    fn constants_are_read_only() {
        let mut registry = ClassRegistry::new();
        registry.register(class_a()).unwrap();
        let value = registry.read_constant(&a(), "NAME").unwrap();
        assert_eq!(value, Value::from("A"));
        let err = registry
            .write_static(&a(), "NAME", Value::from("B"))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::ReadOnlyMember { .. }));
    }

    #[test]
    fn constants_are_not_static_properties() {
        let mut registry = ClassRegistry::new();
        registry.register(class_a()).unwrap();

        let err = registry.read_static(&a(), "NAME").unwrap_err();
        assert_eq!(err, RuntimeError::unresolved("LibClasses\\A", "$NAME"));
        let err = registry.read_constant(&a(), "field").unwrap_err();
        assert_eq!(err, RuntimeError::unresolved("LibClasses\\A", "field"));
    }

    #[test]
    fn constant_and_static_property_with_one_name() {
        let mut registry = ClassRegistry::new();
        let entry = ClassEntry::new("P\\C")
            .with_property(PropertyEntry::constant("field", 1i64))
            .with_property(PropertyEntry::static_("field", 2i64));
        registry.register(entry).unwrap();
        let c = QualifiedName::from("P\\C");

        registry.write_static(&c, "field", Value::Int(3)).unwrap();
        assert_eq!(registry.read_static(&c, "field").unwrap(), Value::Int(3));
        assert_eq!(registry.read_constant(&c, "field").unwrap(), Value::Int(1));
    }

    #[test]
    fn instance_property_is_not_static() {
        let mut registry = ClassRegistry::new();
        registry.register(class_a()).unwrap();
        let err = registry.read_static(&a(), "value").unwrap_err();
        assert_eq!(err, RuntimeError::unresolved("LibClasses\\A", "$value"));
    }
}
