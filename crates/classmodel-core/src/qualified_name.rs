use std::fmt;

/// Namespace separator used in qualified names (`LibClasses\SUB\V`).
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Namespace-qualified class name.
///
/// Used as the primary key for class lookup. Comparison through
/// [`QualifiedName::lookup_key`] is case-insensitive, matching how class
/// names resolve at runtime; the original spelling is kept for display.
///
/// # Examples
///
/// ```
/// use classmodel_core::QualifiedName;
///
/// // Global namespace
/// let point = QualifiedName::global("Point");
/// assert_eq!(point.to_string(), "Point");
///
/// // With namespace
/// let a = QualifiedName::new("A", vec!["LibClasses".into()]);
/// assert_eq!(a.to_string(), "LibClasses\\A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g., "A", "V")
    pub name: String,
    /// Namespace path (e.g., ["LibClasses", "SUB"])
    /// Empty for global namespace
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the global namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a qualified string (e.g., "LibClasses\A").
    ///
    /// Splits on `\` - the last segment is the name, rest is namespace.
    /// A leading `\` (fully qualified) is dropped: `\LibClasses\A` == `LibClasses\A`.
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split(NAMESPACE_SEPARATOR)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                name,
                namespace: parts,
            },
            // Empty string or just "\"
            None => Self::global(""),
        }
    }

    /// Resolve a class reference written inside `namespace`.
    ///
    /// A reference starting with `\` is fully qualified and used as-is.
    /// Anything else is relative to `namespace`, so `SUB\V` written in
    /// `LibClasses` names `LibClasses\SUB\V`.
    pub fn resolve_in(reference: &str, namespace: &[String]) -> Self {
        let relative = Self::from_qualified_string(reference);
        if reference.starts_with(NAMESPACE_SEPARATOR) {
            return relative;
        }
        let mut full = namespace.to_vec();
        full.extend(relative.namespace);
        Self {
            name: relative.name,
            namespace: full,
        }
    }

    /// Check if this is in the global namespace.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Get the namespace as a joined string.
    pub fn namespace_string(&self) -> String {
        self.namespace.join("\\")
    }

    /// Case-folded key used for registry lookups.
    pub fn lookup_key(&self) -> String {
        self.to_string().to_ascii_lowercase()
    }

    /// Compute TypeHash from this qualified name.
    ///
    /// Case-insensitive: `LibClasses\A` and `libclasses\a` hash identically.
    pub fn to_type_hash(&self) -> crate::TypeHash {
        crate::TypeHash::from_name(&self.lookup_key())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}\\{}", self.namespace.join("\\"), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}
