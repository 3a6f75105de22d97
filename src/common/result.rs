use crate::common::error::BatchError;

/// Result alias used throughout the crate.
///
/// # Examples
///
/// ```
/// use repobatch::common::result::BatchResult;
/// use repobatch::common::error::BatchError;
///
/// fn example_function() -> BatchResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> BatchResult<()> {
///     Err(BatchError::internal_error("Something went wrong"))
/// }
/// ```
pub type BatchResult<T> = Result<T, BatchError>;

/// Conversions from `Option` into `BatchResult`.
pub trait OptionExt<T> {
    /// Treats `None` as a missing collaborator.
    ///
    /// # Examples
    ///
    /// ```
    /// use repobatch::common::result::{BatchResult, OptionExt};
    ///
    /// let lookup: Option<&str> = None;
    /// let result: BatchResult<&str> = lookup.ok_or_unavailable("repository lookup");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_unavailable(self, collaborator: impl Into<String>) -> BatchResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_unavailable(self, collaborator: impl Into<String>) -> BatchResult<T> {
        self.ok_or_else(|| BatchError::collaborator_unavailable(collaborator))
    }
}

/// Conversions from foreign `Result`s into `BatchResult`.
pub trait ResultExt<T, E> {
    /// Wraps the error as a configuration error.
    fn with_config_error(self, message: impl Into<String>) -> BatchResult<T>
    where
        E: std::error::Error + Send + Sync + 'static;

    /// Wraps the error as a file system error on `path`.
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> BatchResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_config_error(self, message: impl Into<String>) -> BatchResult<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.map_err(|e| BatchError::config_error_with_source(message, e))
    }

    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> BatchResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| BatchError::filesystem_error_with_source(message, path, e.into()))
    }
}
