//! Core internal logic for device management.
//!
//! This module contains the internal implementation details for listing
//! devices, running actions against them and waiting for state to settle.

pub(crate) mod actions;
pub(crate) mod directory;
pub(crate) mod state_wait;
