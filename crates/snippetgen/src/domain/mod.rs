//! Core data types shared by the extraction and generation pipeline.

pub mod errors;
pub mod model;
