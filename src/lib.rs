pub mod apex;
pub mod build_pipeline;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod project;
pub mod typegen;

pub use error::{Result, TypegenError};
