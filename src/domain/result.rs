//! Result type alias for Depot

use super::errors::DepotError;

/// Result type alias for Depot operations
///
/// # Examples
///
/// ```
/// use depot::domain::result::Result;
/// use depot::domain::errors::DepotError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DepotError::Input("no dataset files".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DepotError>;
