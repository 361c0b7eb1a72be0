//! Common test utilities for deploy-notify CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated state/home directories and a CLI runner
//! - `FakeSlack`: a one-request-per-connection HTTP stub of the Slack Web API

#![allow(dead_code)]

pub mod env;
pub mod fake_slack;

pub use env::*;
pub use fake_slack::*;
