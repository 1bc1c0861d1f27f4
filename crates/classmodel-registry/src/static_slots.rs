//! Per-class storage for static properties.

use rustc_hash::FxHashMap;

use classmodel_core::{ClassEntry, TypeHash, Value};

/// The static slots of one class.
///
/// Created once when the class is registered, seeded from the declared
/// initial values, and shared by every access to the class whether or not
/// an instance is involved. Slots are keyed by property hash, so lookups
/// are case-sensitive like property names. Constants have no slot.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSlots {
    owner: TypeHash,
    values: FxHashMap<TypeHash, Value>,
}

impl StaticSlots {
    /// Seed slots from a class's static property declarations.
    pub fn for_class(entry: &ClassEntry) -> Self {
        let owner = entry.type_hash;
        let values = entry
            .static_properties()
            .map(|p| {
                let key = TypeHash::from_property(owner, &p.name);
                (key, p.default.clone())
            })
            .collect();
        Self { owner, values }
    }

    /// Hash of the owning class.
    pub fn owner(&self) -> TypeHash {
        self.owner
    }

    /// Read a slot.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(&self.key(name))
    }

    /// Overwrite an existing slot.
    ///
    /// Returns false if no slot with that name was declared.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        let key = self.key(name);
        match self.values.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the class declares no static properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn key(&self, name: &str) -> TypeHash {
        TypeHash::from_property(self.owner, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classmodel_core::PropertyEntry;

    fn class_a() -> ClassEntry {
        ClassEntry::new("LibClasses\\A")
            .with_property(PropertyEntry::static_("field", "static public field\n"))
            .with_property(PropertyEntry::constant("field", "constant"))
            .with_property(PropertyEntry::instance("value", "str"))
    }

    #[test]
    fn seeded_from_static_declarations_only() {
        let entry = class_a();
        let slots = StaticSlots::for_class(&entry);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots.owner(), entry.type_hash);
        assert_eq!(
            slots.get("field"),
            Some(&Value::from("static public field\n"))
        );
        assert!(slots.get("value").is_none());
    }

    #[test]
    fn names_are_case_sensitive() {
        let slots = StaticSlots::for_class(&class_a());
        assert!(slots.get("Field").is_none());
    }

    #[test]
    fn set_requires_declared_slot() {
        let count = PropertyEntry::static_("count", 0i64);
        let entry = ClassEntry::new("A").with_property(count);
        let mut slots = StaticSlots::for_class(&entry);
        assert!(slots.set("count", Value::Int(3)));
        assert_eq!(slots.get("count"), Some(&Value::Int(3)));
        assert!(!slots.set("other", Value::Int(1)));
    }
}
