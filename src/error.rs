use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating a declaration for one input file.
///
/// Every variant names the offending file so the pipeline can report it and
/// move on to the next file.
#[derive(Debug, Error)]
pub enum TypegenError {
    /// Malformed component/application markup
    #[error("{}:{line}:{column}: {message}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The helper script could not be parsed or has no object literal
    #[error("{}: {message}", file.display())]
    Script { file: PathBuf, message: String },

    /// A helper property whose value shape has no declaration mapping
    #[error("Unhandled property in {}:{property} with shape {shape}", file.display())]
    UnhandledShape {
        file: PathBuf,
        property: String,
        shape: String,
    },
}

pub type Result<T> = std::result::Result<T, TypegenError>;
