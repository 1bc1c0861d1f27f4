//! Class registry for the classmodel runtime.
//!
//! Stores class definitions by qualified name and owns each class's static
//! slots.

mod registry;
mod static_slots;

pub use registry::ClassRegistry;
pub use static_slots::StaticSlots;
