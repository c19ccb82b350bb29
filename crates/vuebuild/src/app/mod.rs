//! Application layer: classification, assembly, and the build/watch drivers.

pub mod build;
pub mod classify;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod watch;
