//! Error types shared across the crate.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, NbframeError>;

/// Structural errors surfaced by the lifecycle core.
///
/// Benign races (stale reconnect requests, malformed placeholder payloads)
/// are not errors; they are dropped by the receiving component.
#[derive(Debug, Error)]
pub enum NbframeError {
	/// The configured session base address is not a parseable URL.
	#[error("invalid session base address: {0}")]
	BaseAddress(#[from] url::ParseError),

	/// The base address parses but cannot carry session query parameters.
	#[error("session base address cannot carry a query: {0}")]
	OpaqueBaseAddress(String),
}
