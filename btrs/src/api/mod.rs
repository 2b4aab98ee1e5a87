//! Public API module.
//!
//! This module contains the high-level user-facing API for the `btrs` crate.

pub mod bluetooth_manager;
pub mod models;
