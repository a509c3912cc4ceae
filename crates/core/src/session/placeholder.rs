//! Generated disconnected placeholder document.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that must be escaped when embedding the document in a data URL.
const DATA_URL_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'%').add(b'<').add(b'>');

/// Generates the self-contained placeholder page for a tracked frame.
///
/// The page fetches no external resources; it embeds its own tracking id and
/// a single action that posts a reconnect request to the embedding parent.
pub fn placeholder_document(tracking_id: &str) -> String {
	format!(
		r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Session disconnected</title>
<style>
body {{ font-family: system-ui, sans-serif; display: flex; flex-direction: column; align-items: center; justify-content: center; height: 100vh; margin: 0; color: #444; }}
button {{ font-size: 1rem; padding: 0.5rem 1.5rem; cursor: pointer; }}
</style>
</head>
<body>
<p>The editor session is no longer running.</p>
<button onclick="parent.postMessage({{type: 'reconnect-request', trackingId: '{tracking_id}'}}, '*')">Reconnect</button>
</body>
</html>
"#
	)
}

/// Address of the placeholder page for a tracking id.
///
/// A `data:` URL keeps the page self-contained and uniquely addressed per
/// record without serving anything over HTTP.
pub fn placeholder_url(tracking_id: &str) -> String {
	let document = placeholder_document(tracking_id);
	format!("data:text/html;charset=utf-8,{}", utf8_percent_encode(&document, DATA_URL_SET))
}
