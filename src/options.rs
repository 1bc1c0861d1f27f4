//! Runtime configuration.

/// Tunable runtime settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeProperty {
    /// Non-zero: also write echoed text to the process's stdout.
    EchoStdout,
    /// Maximum nesting of method calls before the call fails.
    MaxCallDepth,
}

impl RuntimeProperty {
    /// Value the property takes when not set explicitly.
    pub fn default_value(&self) -> usize {
        match self {
            RuntimeProperty::EchoStdout => 0,
            RuntimeProperty::MaxCallDepth => 256,
        }
    }
}

/// Options a [`crate::Runtime`] is created with.
///
/// ```
/// use classmodel::{RuntimeOptions, RuntimeProperty};
///
/// let options = RuntimeOptions::new().with_max_call_depth(16);
/// assert_eq!(options.get(RuntimeProperty::MaxCallDepth), 16);
/// assert!(!options.echo_stdout());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    echo_stdout: usize,
    max_call_depth: usize,
}

impl RuntimeOptions {
    /// Options with every property at its default.
    pub fn new() -> Self {
        Self {
            echo_stdout: RuntimeProperty::EchoStdout.default_value(),
            max_call_depth: RuntimeProperty::MaxCallDepth.default_value(),
        }
    }

    /// Read a property.
    pub fn get(&self, property: RuntimeProperty) -> usize {
        match property {
            RuntimeProperty::EchoStdout => self.echo_stdout,
            RuntimeProperty::MaxCallDepth => self.max_call_depth,
        }
    }

    /// Set a property.
    pub fn set(&mut self, property: RuntimeProperty, value: usize) {
        match property {
            RuntimeProperty::EchoStdout => self.echo_stdout = value,
            RuntimeProperty::MaxCallDepth => self.max_call_depth = value,
        }
    }

    /// Echo output to stdout as well as buffering it.
    pub fn with_echo_stdout(mut self, enabled: bool) -> Self {
        self.set(RuntimeProperty::EchoStdout, usize::from(enabled));
        self
    }

    /// Limit call nesting.
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.set(RuntimeProperty::MaxCallDepth, depth);
        self
    }

    /// Whether echoed text is also written to stdout.
    pub fn echo_stdout(&self) -> bool {
        self.echo_stdout != 0
    }

    /// Maximum nesting of method calls.
    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RuntimeOptions::default();
        assert!(!options.echo_stdout());
        assert_eq!(options.max_call_depth(), 256);
    }

    #[test]
    fn set_and_get() {
        let mut options = RuntimeOptions::new();
        options.set(RuntimeProperty::EchoStdout, 1);
        assert!(options.echo_stdout());
        assert_eq!(options.get(RuntimeProperty::EchoStdout), 1);
    }
}
