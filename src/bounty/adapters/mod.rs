//! Adapter implementations of the bounty ports.

pub mod filesystem;
pub mod memory;
pub mod postgres;
