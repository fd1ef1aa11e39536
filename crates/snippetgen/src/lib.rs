pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

pub use domain::model::Location;

pub fn init() {
    infra::logging::init();
}
