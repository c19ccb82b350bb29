//! Core domain types shared by the build pipeline.

pub mod errors;
pub mod model;
