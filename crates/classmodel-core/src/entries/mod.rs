//! Registry entry types.
//!
//! - [`ClassEntry`] - A class definition
//! - [`PropertyEntry`] - Static slot, class constant or instance field
//! - [`MethodEntry`] - Static or instance method with its body

mod class;
mod member;

pub use class::ClassEntry;
pub use member::{MemberFlags, MethodEntry, PropertyEntry};
