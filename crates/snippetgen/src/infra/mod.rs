//! Infrastructure adapters for config, logging, rendering, and output.

pub mod config;
pub mod logging;
pub mod output;
pub mod render;
