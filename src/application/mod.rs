//! Application layer: service wiring and presentation state.

pub mod bootstrap;
pub mod processor;

pub use bootstrap::{assemble_service, build_document_service, open_medium};
pub use processor::{DocumentProcessor, ProcessorState};
