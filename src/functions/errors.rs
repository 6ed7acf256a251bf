use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Missing argument: {}", .0.to_lowercase())]
    MissingArgument(String),

    #[error("Invalid argument: {}", .0.to_lowercase())]
    InvalidArgument(String),

    #[error("Unknown transform: {0}")]
    UnknownTransform(String),
}
