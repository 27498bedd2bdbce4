// Library crate exposing modules for the binary, integration tests and benches

pub mod cli;
pub mod config;
pub mod model;
pub mod provider;
pub mod report;
pub mod scanner;
pub mod util;
