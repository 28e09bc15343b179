//! Shared test utilities for burrow integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Harnesses that talk HTTP also use
//! [`fake_log_api::FakeLogApi`].

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod builders;
pub mod fake_log_api;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
