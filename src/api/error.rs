use thiserror::Error;

/// A required query input was left blank. Raised before any network call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
	/// Path query without both ends.
	#[error("Please enter both start and end nodes")]
	MissingPathEnds,
	/// Mindmap query without a root.
	#[error("Please enter a root node")]
	MissingRoot,
	/// QA query without a node.
	#[error("Please enter a node name")]
	MissingNode,
	/// Completion query without a prefix.
	#[error("Please enter a prefix")]
	MissingPrefix,
}

/// The request never produced a usable HTTP exchange.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
	/// The server answered with a non-2xx status.
	#[error("Server error: {0}")]
	Status(u16),
	/// Network failure or a browser API refused the request.
	#[error("{0}")]
	Network(String),
}

/// Everything that can go wrong while dispatching a user action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
	/// Upload clicked with no file chosen.
	#[error("Please select a file first")]
	EmptyFileSelection,
	/// A required field is blank.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// See [`TransportError`].
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Well-formed response with `success: false`.
	#[error("{0}")]
	Backend(String),
	/// A 2xx body that is not the JSON we expected.
	#[error("Unexpected response: {0}")]
	Decode(String),
}

impl DispatchError {
	/// Text shown to the user in the status or results area.
	pub fn user_message(&self) -> String {
		match self {
			DispatchError::EmptyFileSelection | DispatchError::Validation(_) => self.to_string(),
			_ => format!("Error: {self}"),
		}
	}
}

impl From<serde_json::Error> for DispatchError {
	fn from(e: serde_json::Error) -> Self {
		DispatchError::Decode(e.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_messages() {
		let cases = vec![
			(DispatchError::EmptyFileSelection, "Please select a file first"),
			(
				DispatchError::Validation(ValidationError::MissingRoot),
				"Please enter a root node",
			),
			(
				DispatchError::Transport(TransportError::Status(502)),
				"Error: Server error: 502",
			),
			(
				DispatchError::Transport(TransportError::Network("Failed to fetch".into())),
				"Error: Failed to fetch",
			),
			(
				DispatchError::Backend("Node not found".into()),
				"Error: Node not found",
			),
		];
		for (err, expected) in cases {
			assert_eq!(err.user_message(), expected);
		}
	}
}
