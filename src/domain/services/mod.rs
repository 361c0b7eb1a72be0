//! Domain services

pub mod addressor;

pub use addressor::{locate, render, set_banner, set_state, DEFAULT_BANNER, DEFAULT_INITIAL_STATE};
