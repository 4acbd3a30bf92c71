use thiserror::Error;

/// Errors from the annotation store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying SQLite operation failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored example could not be (de)serialized.
    #[error("example serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The named collection does not exist.
    #[error("no dataset named {name:?}")]
    UnknownDataset {
        /// The requested collection name.
        name: String,
    },
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_dataset() {
        let err = StoreError::UnknownDataset {
            name: "my_annotations".into(),
        };
        assert!(err.to_string().contains("my_annotations"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
