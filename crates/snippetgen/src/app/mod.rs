//! Application layer: the snippet aggregation and generation pipeline.

pub mod aggregate;
pub mod diagnostics;
pub mod extract;
pub mod generate;
pub mod literal;
pub mod paths;
pub mod walk;
