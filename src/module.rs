//! Namespaced groups of class definitions.
//!
//! A [`Module`] collects the classes one namespace contributes, so a fixture
//! can be defined in one place and installed into any [`crate::Runtime`].
//!
//! # Example
//!
//! ```
//! use classmodel::Module;
//! use classmodel_core::PropertyEntry;
//!
//! let mut module = Module::new(&["LibClasses"]);
//! let a = module.class("A").with_property(PropertyEntry::instance("value", "str"));
//! module.add(a);
//!
//! assert_eq!(module.classes()[0].name.to_string(), "LibClasses\\A");
//! ```

use classmodel_core::{ClassEntry, QualifiedName};

/// A namespace and the classes declared in it.
#[derive(Debug, Clone, Default)]
pub struct Module {
    namespace: Vec<String>,
    classes: Vec<ClassEntry>,
}

impl Module {
    /// Create a module for a namespace path. Empty means the global namespace.
    pub fn new(namespace: &[&str]) -> Self {
        Self {
            namespace: namespace.iter().map(|s| (*s).to_string()).collect(),
            classes: Vec::new(),
        }
    }

    /// The module's namespace path.
    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// Qualify a simple class name with this module's namespace.
    pub fn qualify(&self, name: &str) -> QualifiedName {
        QualifiedName::new(name, self.namespace.clone())
    }

    /// Start a class definition in this namespace.
    pub fn class(&self, name: &str) -> ClassEntry {
        ClassEntry::new(self.qualify(name))
    }

    /// Add a finished class definition.
    pub fn add(&mut self, class: ClassEntry) -> &mut Self {
        self.classes.push(class);
        self
    }

    /// Classes declared so far.
    pub fn classes(&self) -> &[ClassEntry] {
        &self.classes
    }

    /// Consume the module, yielding its classes.
    pub fn into_classes(self) -> Vec<ClassEntry> {
        self.classes
    }

    /// Number of classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
