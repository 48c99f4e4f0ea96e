//! Storage adapters implementing `KeyValueMedium`.

pub mod configured;
pub mod memory;

pub use configured::ConfiguredMedium;
pub use memory::InMemoryMedium;
