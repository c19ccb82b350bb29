//! Infrastructure adapters for filesystem access, configuration, and logging.

pub mod config;
pub mod fs;
pub mod logging;
