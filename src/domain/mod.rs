//! Domain Layer
//!
//! Pure deployment-message logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Document, Section, MessageHandle
//! - `value_objects/` - Validated values (DeploymentId)
//! - `services/` - Content addressing (render, locate, set_state)
//! - `ports/` - Interfaces implemented by infrastructure (storage, chat)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services borrow documents and return new ones
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
