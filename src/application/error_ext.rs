//! Context helpers for fallible calls at the I/O and parsing boundary

use std::error::Error;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Wrap any error into `ApplicationError::OperationFailed` with a context line.
pub trait ResultExt<T> {
    fn with_context(self, context: impl Into<String>) -> ApplicationResult<T>;

    /// Context of the form `"<action>: <path>"`.
    ///
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read workspace", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>
    where
        Self: Sized,
    {
        self.with_context(format!("{}: {}", action, path.display()))
    }
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn with_context(self, context: impl Into<String>) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: context.into(),
            source: Box::new(e),
        })
    }
}
