//! Class definition entry.

use rustc_hash::FxHashSet;

use crate::{QualifiedName, RegistrationError, TypeHash};

use super::{MethodEntry, PropertyEntry};

/// Registry entry for a class definition.
///
/// Holds the declarations only. Static slot values live in the registry
/// and instance values live in the heap, so the entry itself never changes
/// after registration.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    /// Fully qualified name.
    pub name: QualifiedName,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Declared properties, static and instance.
    pub properties: Vec<PropertyEntry>,
    /// Declared methods, static and instance.
    pub methods: Vec<MethodEntry>,
}

impl ClassEntry {
    /// Create a new, empty class entry.
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        let name = name.into();
        let type_hash = name.to_type_hash();
        Self {
            name,
            type_hash,
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    // === Builder Methods ===

    /// Add a property.
    pub fn with_property(mut self, property: PropertyEntry) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a method.
    pub fn with_method(mut self, mut method: MethodEntry) -> Self {
        method.body = method
            .body
            .with_id(TypeHash::from_method(self.type_hash, &method.name));
        self.methods.push(method);
        self
    }

    // === Query Methods ===

    /// Find a method by name (case-insensitive).
    pub fn find_method(&self, name: &str) -> Option<&MethodEntry> {
        self.methods.iter().find(|m| m.matches(name))
    }

    /// Find a declared property by name (case-sensitive).
    ///
    /// Constants are not properties; see [`ClassEntry::find_constant`].
    pub fn find_property(&self, name: &str) -> Option<&PropertyEntry> {
        self.properties
            .iter()
            .find(|p| !p.is_const() && p.name == name)
    }

    /// Find a static property (`A::$name`).
    pub fn find_static(&self, name: &str) -> Option<&PropertyEntry> {
        self.find_property(name).filter(|p| p.is_static())
    }

    /// Find a class constant (`A::NAME`).
    pub fn find_constant(&self, name: &str) -> Option<&PropertyEntry> {
        self.constants().find(|p| p.name == name)
    }

    /// Static properties, each backed by one slot in the registry.
    pub fn static_properties(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.properties
            .iter()
            .filter(|p| p.is_static() && !p.is_const())
    }

    /// Class constants.
    pub fn constants(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.properties.iter().filter(|p| p.is_const())
    }

    /// Properties copied into each instance.
    pub fn instance_properties(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.properties.iter().filter(|p| !p.is_static())
    }

    /// Check the definition for an empty name and duplicate members.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.name.name.is_empty() {
            return Err(RegistrationError::InvalidName(self.name.to_string()));
        }

        // `A::$x` and `A::X` live in separate namespaces.
        let mut properties = FxHashSet::default();
        let mut constants = FxHashSet::default();
        for property in &self.properties {
            let (seen, member) = if property.is_const() {
                (&mut constants, property.name.clone())
            } else {
                (&mut properties, format!("${}", property.name))
            };
            if !seen.insert(property.name.as_str()) {
                return Err(RegistrationError::DuplicateMember {
                    class: self.name.to_string(),
                    member,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for method in &self.methods {
            if !seen.insert(method.name.to_ascii_lowercase()) {
                return Err(RegistrationError::DuplicateMember {
                    class: self.name.to_string(),
                    member: format!("{}()", method.name),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::CallContext;
    use crate::{RuntimeError, Value};

    fn noop(_: &mut CallContext<'_>) -> Result<Value, RuntimeError> {
        Ok(Value::Null)
    }

    fn class_a() -> ClassEntry {
        ClassEntry::new("LibClasses\\A")
            .with_property(PropertyEntry::static_("field", "static public field\n"))
            .with_property(PropertyEntry::constant("NAME", "A"))
            .with_method(MethodEntry::static_("static_fun", 0, noop))
            .with_property(PropertyEntry::instance("value", "str"))
            .with_method(MethodEntry::instance("set_value", 1, noop))
            .with_method(MethodEntry::instance("get_value", 0, noop))
    }

    fn names<'a>(props: impl Iterator<Item = &'a PropertyEntry>) -> Vec<&'a str> {
        props.map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn class_entry_identity() {
        let entry = class_a();
        let folded = QualifiedName::from("libclasses\\a");
        assert_eq!(entry.name.to_string(), "LibClasses\\A");
        assert_eq!(entry.type_hash, folded.to_type_hash());
    }

    #[test]
    fn member_partitions() {
        let entry = class_a();
        assert_eq!(names(entry.static_properties()), vec!["field"]);
        assert_eq!(names(entry.constants()), vec!["NAME"]);
        assert_eq!(names(entry.instance_properties()), vec!["value"]);
    }

    #[test]
    fn constants_are_not_properties() {
        let entry = class_a();
        assert!(entry.find_property("NAME").is_none());
        assert!(entry.find_static("NAME").is_none());
        assert!(entry.find_constant("NAME").is_some());
        assert!(entry.find_constant("field").is_none());
        assert!(entry.find_static("value").is_none());
    }

    #[test]
    fn method_ids_are_assigned() {
        let entry = class_a();
        let m = entry.find_method("Get_Value").unwrap();
        let expected = TypeHash::from_method(entry.type_hash, "get_value");
        assert_eq!(m.body.id, expected);
        assert!(entry.find_method("missing").is_none());
    }

    #[test]
    fn valid_definition() {
        assert!(class_a().validate().is_ok());
    }

    #[test]
    fn duplicate_method_rejected() {
        let entry = class_a().with_method(MethodEntry::instance("GET_VALUE", 0, noop));
        assert_eq!(
            entry.validate(),
            Err(RegistrationError::DuplicateMember {
                class: "LibClasses\\A".into(),
                member: "GET_VALUE()".into(),
            })
        );
    }

    #[test]
    fn duplicate_property_rejected() {
        let entry = class_a().with_property(PropertyEntry::instance("field", 1i64));
        assert!(matches!(
            entry.validate(),
            Err(RegistrationError::DuplicateMember { .. })
        ));
    }

    #[test]
    fn constant_and_static_property_may_share_a_name() {
        let entry = ClassEntry::new("P\\C")
            .with_property(PropertyEntry::constant("field", 1i64))
            .with_property(PropertyEntry::static_("field", 2i64));
        assert!(entry.validate().is_ok());
        assert_eq!(entry.find_constant("field").unwrap().default, Value::Int(1));
        assert_eq!(entry.find_static("field").unwrap().default, Value::Int(2));
    }

    #[test]
    fn duplicate_constant_rejected_without_sigil() {
        let entry = class_a().with_property(PropertyEntry::constant("NAME", "B"));
        assert_eq!(
            entry.validate(),
            Err(RegistrationError::DuplicateMember {
                class: "LibClasses\\A".into(),
                member: "NAME".into(),
            })
        );
    }

    #[test]
    fn empty_name_rejected() {
        let entry = ClassEntry::new("");
        assert!(matches!(
            entry.validate(),
            Err(RegistrationError::InvalidName(_))
        ));
    }
}
