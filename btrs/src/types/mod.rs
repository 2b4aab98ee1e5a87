//! Type definitions and constants.
//!
//! This module contains BlueZ names and the defaults used when decoding devices.

pub(crate) mod constants;
