//! Adapters implementing the domain ports.

pub mod completion;
pub mod sqlite;
pub mod storage;
