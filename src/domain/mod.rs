//! Domain types and pure logic
//!
//! This module contains data structures that are independent of any host
//! windowing system, touch driver or filesystem.

pub mod content;
pub mod core;
pub mod touch;
