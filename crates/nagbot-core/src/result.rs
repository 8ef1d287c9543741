//! Convenience result type alias for nagbot.

use crate::error::AppError;

/// A specialized `Result` type for nagbot operations.
pub type AppResult<T> = Result<T, AppError>;
