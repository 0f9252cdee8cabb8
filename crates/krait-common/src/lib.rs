//! KraitDB common types, errors, and utilities.
//!
//! This crate provides shared definitions used across all KraitDB components.

pub mod config;
pub mod error;
pub mod latch;

pub use config::{IndexConfig, VerbosityLevel};
pub use error::{KraitError, NodeKind, Result, ViolationKind};
pub use latch::SharedLatch;
