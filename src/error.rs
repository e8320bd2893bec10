use thiserror::Error;

/// Errors that can occur while loading, storing or exporting a drawing.
///
/// None of these are fatal to a running session: the session turns them
/// into a transient status message and keeps drawing in memory.
#[derive(Debug, Error)]
pub enum PaintError {
    /// Stored stroke data is corrupt or not a stroke sequence at all
    #[error("Malformed stroke data: {0}")]
    MalformedData(String),

    /// The durable key-value storage could not be reached
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The drawing surface could not be encoded or handed off as an image
    #[error("Failed to export image: {0}")]
    Export(String),
}

/// Result type for stroke data, storage and export operations
pub type PaintResult<T> = Result<T, PaintError>;

impl From<serde_json::Error> for PaintError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedData(err.to_string())
    }
}

impl From<std::io::Error> for PaintError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl From<image::ImageError> for PaintError {
    fn from(err: image::ImageError) -> Self {
        Self::Export(err.to_string())
    }
}
