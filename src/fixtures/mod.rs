//! Class definitions shipped with the runtime.
//!
//! Each submodule builds a [`crate::Module`] and exposes typed entry points
//! for driving it from a harness.

pub mod example1;
