//! Session identity resolution for embedded editor sessions.

use nbframe_protocol::ActiveSession;
use uuid::Uuid;

/// Prefix marking a session name as not yet backed by a file.
///
/// The external session protocol recognizes this prefix as "new/unsaved";
/// it contains only URL-safe characters so the token can be appended to a
/// session URL without encoding.
pub const INIT_TOKEN_PREFIX: &str = "__nbframe_init__";

/// Stable identity for a tracked session.
///
/// Two containers must never share a `File` identity. An `Init` identity
/// exists only until the server assigns the session a real path, at which
/// point the caller re-keys the container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionIdentity {
	/// File-backed session, equal to the on-disk notebook path.
	File(String),
	/// Freshly minted token for a session the server has not yet saved.
	Init(String),
}

impl SessionIdentity {
	/// Resolves the identity for a session: the file path when present, a
	/// freshly minted init token otherwise.
	pub fn resolve(path: Option<&str>) -> Self {
		match path {
			Some(path) => Self::File(path.to_string()),
			None => Self::Init(mint_init_token()),
		}
	}

	/// Maps a server snapshot record onto the identity it belongs to.
	pub fn of_record(record: &ActiveSession) -> Self {
		if record.name.starts_with(INIT_TOKEN_PREFIX) {
			Self::Init(record.name.clone())
		} else {
			Self::File(record.path.clone())
		}
	}

	/// Whether this identity is file-backed and must never be renamed by
	/// lifecycle transitions.
	pub fn is_persistent(&self) -> bool {
		matches!(self, Self::File(_))
	}

	/// The raw path or token backing this identity.
	pub fn as_str(&self) -> &str {
		match self {
			Self::File(path) => path,
			Self::Init(token) => token,
		}
	}
}

fn mint_init_token() -> String {
	format!("{INIT_TOKEN_PREFIX}{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolve_with_path_yields_file_identity() {
		let identity = SessionIdentity::resolve(Some("dir/nb.py"));
		assert_eq!(identity, SessionIdentity::File("dir/nb.py".to_string()));
		assert!(identity.is_persistent());
	}

	#[test]
	fn resolve_without_path_mints_prefixed_token() {
		let identity = SessionIdentity::resolve(None);
		let SessionIdentity::Init(token) = &identity else {
			panic!("expected init identity");
		};
		assert!(token.starts_with(INIT_TOKEN_PREFIX));
		assert!(!identity.is_persistent());
	}

	#[test]
	fn minted_tokens_are_unique() {
		let first = SessionIdentity::resolve(None);
		let second = SessionIdentity::resolve(None);
		assert_ne!(first, second);
	}

	#[test]
	fn record_with_init_name_maps_to_init_identity() {
		let record = ActiveSession {
			name: format!("{INIT_TOKEN_PREFIX}abc"),
			path: String::new(),
			display_name: "New Notebook".to_string(),
		};
		assert_eq!(
			SessionIdentity::of_record(&record),
			SessionIdentity::Init(format!("{INIT_TOKEN_PREFIX}abc"))
		);
	}

	#[test]
	fn record_with_plain_name_maps_to_file_identity() {
		let record = ActiveSession {
			name: "nb.py".to_string(),
			path: "dir/nb.py".to_string(),
			display_name: "nb.py".to_string(),
		};
		assert_eq!(SessionIdentity::of_record(&record), SessionIdentity::File("dir/nb.py".to_string()));
	}
}
