//! Platform abstraction layer
//!
//! Turns raw key events into per-tick input.

pub mod input;

pub use input::{Key, KeyLatch};
