//! Server-reported active-session snapshot records.

use serde::{Deserialize, Serialize};

/// One server-known active session, as reported by the periodic snapshot.
///
/// Entry order within a snapshot carries no meaning; consumers must be
/// correct under any permutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
	/// Server-side session name. Sessions not yet backed by a file carry
	/// their init token here.
	pub name: String,
	/// Notebook path relative to the server root; empty until the server
	/// assigns one.
	#[serde(default)]
	pub path: String,
	/// Human-readable name; authoritative for sessions that are allowed to
	/// be renamed.
	pub display_name: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn snapshot_record_uses_camel_case_fields() {
		let record: ActiveSession = serde_json::from_str(
			r#"{"name": "nb.py", "path": "nb.py", "displayName": "nb.py"}"#,
		)
		.expect("record should deserialize");
		assert_eq!(record.display_name, "nb.py");

		let json = serde_json::to_value(&record).expect("record should serialize");
		assert_eq!(json["displayName"], "nb.py");
	}

	#[test]
	fn missing_path_defaults_to_empty() {
		let record: ActiveSession =
			serde_json::from_str(r#"{"name": "tok", "displayName": "New Notebook"}"#).expect("record should deserialize");
		assert_eq!(record.path, "");
	}
}
