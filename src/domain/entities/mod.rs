//! Domain entities

mod document;
mod handle;

pub use document::{Document, Section};
pub use handle::MessageHandle;
