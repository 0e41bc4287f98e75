//! Lights

#[macro_use]
extern crate log;

mod diffuse;

// Re-export
pub use diffuse::*;
