//! Result type alias for combining operations

use crate::error::CombinerError;

/// Standard Result type for combining operations
pub type Result<T> = std::result::Result<T, CombinerError>;
