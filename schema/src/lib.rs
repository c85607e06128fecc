// Battle Engine Schema - Shared type definitions
// This crate contains the static enums and lookup tables shared between the
// battle engine and the roster files it loads.

// Re-export the main types
pub use move_types::*;
pub use natures::*;
pub use pokemon_types::*;

pub mod move_types;
pub mod natures;
pub mod pokemon_types;
