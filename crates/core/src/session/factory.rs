//! Frame construction and session URL resolution.

use tracing::debug;
use url::Url;

use super::frame::EmbedFrame;
use super::identity::SessionIdentity;
use crate::error::{NbframeError, Result};

/// Query parameter addressing the session file on the embedded server.
const FILE_PARAM: &str = "file";

/// Output of [`FrameFactory::build`]: a ready-to-display container plus the
/// address and identity it was built for.
#[derive(Debug)]
pub struct BuiltFrame {
	/// The constructed container. Not yet registered; registration is the
	/// caller's explicit second step.
	pub frame: EmbedFrame,
	/// Resolved session URL the container points at.
	pub url: String,
	/// Identity the URL addresses.
	pub identity: SessionIdentity,
}

/// Builds embedded-content containers addressing the external session
/// endpoint.
///
/// Construction and registration are deliberately separate: some callers
/// build containers through a different factory entry point and must still
/// participate in tracking via [`super::SessionRegistry::register`].
#[derive(Debug, Clone)]
pub struct FrameFactory {
	base: Url,
}

impl FrameFactory {
	/// Creates a factory for a session endpoint base address.
	pub fn new(base_url: &str) -> Result<Self> {
		let base = Url::parse(base_url)?;
		if base.cannot_be_a_base() {
			return Err(NbframeError::OpaqueBaseAddress(base_url.to_string()));
		}
		Ok(Self { base })
	}

	/// Builds the container and session URL for an identity.
	pub fn build(&self, identity: SessionIdentity) -> BuiltFrame {
		let url = self.session_url(&identity);
		debug!(target: "nbframe.factory", %url, "built embedded container");
		let frame = EmbedFrame::new(&url, default_title(&identity));
		BuiltFrame { frame, url, identity }
	}

	/// Computes the session URL for an identity.
	///
	/// File paths are percent-encoded into the `file` query pair; init
	/// tokens are appended raw, their prefix is URL-safe by construction.
	pub fn session_url(&self, identity: &SessionIdentity) -> String {
		let mut url = self.base.clone();
		match identity {
			SessionIdentity::File(path) => {
				url.query_pairs_mut().append_pair(FILE_PARAM, path);
			}
			SessionIdentity::Init(token) => {
				url.set_query(Some(&format!("{FILE_PARAM}={token}")));
			}
		}
		url.to_string()
	}
}

fn default_title(identity: &SessionIdentity) -> String {
	match identity {
		SessionIdentity::File(path) => path.rsplit('/').next().unwrap_or(path).to_string(),
		SessionIdentity::Init(_) => "Untitled".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::identity::INIT_TOKEN_PREFIX;

	#[test]
	fn file_path_is_percent_encoded() {
		let factory = FrameFactory::new("http://localhost:8888/marimo/").expect("base should parse");
		let url = factory.session_url(&SessionIdentity::File("dir with space/nb.py".to_string()));
		assert_eq!(url, "http://localhost:8888/marimo/?file=dir+with+space%2Fnb.py");
	}

	#[test]
	fn init_token_is_appended_raw() {
		let factory = FrameFactory::new("http://localhost:8888/marimo/").expect("base should parse");
		let token = format!("{INIT_TOKEN_PREFIX}abc123");
		let url = factory.session_url(&SessionIdentity::Init(token.clone()));
		assert_eq!(url, format!("http://localhost:8888/marimo/?file={token}"));
	}

	#[test]
	fn build_returns_frame_pointed_at_session_url() {
		let factory = FrameFactory::new("http://localhost:8888/marimo/").expect("base should parse");
		let built = factory.build(SessionIdentity::File("dir/nb.py".to_string()));
		assert_eq!(built.frame.src(), built.url);
		assert_eq!(built.frame.title(), "nb.py");
		assert_eq!(built.identity, SessionIdentity::File("dir/nb.py".to_string()));
	}

	#[test]
	fn init_builds_get_untitled_default() {
		let factory = FrameFactory::new("http://localhost:8888/marimo/").expect("base should parse");
		let built = factory.build(SessionIdentity::resolve(None));
		assert_eq!(built.frame.title(), "Untitled");
	}

	#[test]
	fn invalid_base_address_is_rejected() {
		assert!(FrameFactory::new("not a url").is_err());
		assert!(FrameFactory::new("data:text/html,hello").is_err());
	}
}
