//! Failures while attaching the canvas to the page.

use thiserror::Error;

/// Errors that can occur while mounting a canvas surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MountError {
	/// No global `window` (not running in a browser)
	#[error("no window available")]
	NoWindow,

	/// `getContext("2d")` returned nothing or threw
	#[error("2d rendering context unavailable: {0}")]
	NoContext(String),
}

/// Result type alias for mount operations
pub type MountResult<T> = Result<T, MountError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_missing_piece() {
		assert_eq!(MountError::NoWindow.to_string(), "no window available");
		assert_eq!(
			MountError::NoContext("getContext returned null".into()).to_string(),
			"2d rendering context unavailable: getContext returned null"
		);
	}
}
