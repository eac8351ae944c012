use thiserror::Error;

/// Errors raised while wiring external dispatchers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExternalDispatchError {
    /// An observable adapter was assembled without a `next` action creator
    #[error("from_observable requires at least a \"next\" action creator")]
    MissingNextCreator,
}

/// Result type for external dispatch operations
pub type Result<T> = std::result::Result<T, ExternalDispatchError>;
