//! Wire types and the request dispatcher for the knowledge-graph REST API.

mod dispatcher;
mod error;
mod transport;

pub use dispatcher::Dispatcher;
pub use error::{DispatchError, TransportError, ValidationError};
pub use transport::{HttpTransport, RawResponse, Transport};

use serde::{Deserialize, Serialize};

pub(crate) const UPLOAD_PATH: &str = "/upload";
pub(crate) const QUERY_PATH: &str = "/query";
pub(crate) const NODES_PATH: &str = "/nodes";
pub(crate) const HEALTH_PATH: &str = "/health";

/// The five query kinds understood by `/query`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
	/// Shortest path between two nodes.
	#[default]
	Path,
	/// Most connected topics in the graph.
	Topics,
	/// Outgoing relationships from a root node, rendered as a diagram.
	Mindmap,
	/// Question answering about one node.
	Qa,
	/// Node-name completion for a prefix.
	Complete,
}

impl QueryType {
	/// Every query type, in selector order.
	pub const ALL: [QueryType; 5] = [
		QueryType::Path,
		QueryType::Topics,
		QueryType::Mindmap,
		QueryType::Qa,
		QueryType::Complete,
	];

	/// Wire name, also used as the `<option>` value.
	pub fn as_str(self) -> &'static str {
		match self {
			QueryType::Path => "path",
			QueryType::Topics => "topics",
			QueryType::Mindmap => "mindmap",
			QueryType::Qa => "qa",
			QueryType::Complete => "complete",
		}
	}

	/// Human label for the selector.
	pub fn label(self) -> &'static str {
		match self {
			QueryType::Path => "Find path",
			QueryType::Topics => "Key topics",
			QueryType::Mindmap => "Mind map",
			QueryType::Qa => "Ask about a node",
			QueryType::Complete => "Complete a name",
		}
	}

	/// Inverse of [`QueryType::as_str`].
	pub fn parse(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|t| t.as_str() == value)
	}
}

/// A validated-on-send `/query` payload, tagged by `query_type` on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "query_type", rename_all = "lowercase")]
pub enum QueryRequest {
	/// `{"query_type":"path","start":..,"end":..}`
	Path {
		/// Start node.
		start: String,
		/// End node.
		end: String,
	},
	/// `{"query_type":"topics"}`
	Topics,
	/// `{"query_type":"mindmap","start":..}`
	Mindmap {
		/// Root node.
		start: String,
	},
	/// `{"query_type":"qa","node":..}`
	Qa {
		/// Node to describe.
		node: String,
	},
	/// `{"query_type":"complete","prefix":..}`
	Complete {
		/// Name prefix.
		prefix: String,
	},
}

impl QueryRequest {
	/// The query type this request is tagged with.
	pub fn query_type(&self) -> QueryType {
		match self {
			QueryRequest::Path { .. } => QueryType::Path,
			QueryRequest::Topics => QueryType::Topics,
			QueryRequest::Mindmap { .. } => QueryType::Mindmap,
			QueryRequest::Qa { .. } => QueryType::Qa,
			QueryRequest::Complete { .. } => QueryType::Complete,
		}
	}

	/// Check every required field is non-blank.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let blank = |s: &str| s.trim().is_empty();
		match self {
			QueryRequest::Path { start, end } if blank(start) || blank(end) => {
				Err(ValidationError::MissingPathEnds)
			}
			QueryRequest::Mindmap { start } if blank(start) => Err(ValidationError::MissingRoot),
			QueryRequest::Qa { node } if blank(node) => Err(ValidationError::MissingNode),
			QueryRequest::Complete { prefix } if blank(prefix) => {
				Err(ValidationError::MissingPrefix)
			}
			_ => Ok(()),
		}
	}
}

/// Body of a `/query` response. Error bodies omit `success`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct QueryResponse {
	/// Whether the engine ran the query.
	#[serde(default)]
	pub success: bool,
	/// Engine output; meaning depends on the query type.
	pub result: Option<String>,
	/// Failure description.
	pub error: Option<String>,
}

/// Body of an `/upload` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
	/// Whether ingestion finished.
	#[serde(default)]
	pub success: bool,
	/// Confirmation text.
	pub message: Option<String>,
	/// Failure description.
	pub error: Option<String>,
}

/// Body of a `/nodes` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NodesResponse {
	/// Whether the listing succeeded.
	#[serde(default)]
	pub success: bool,
	/// Known node names, in backend order.
	#[serde(default)]
	pub nodes: Vec<String>,
}

/// Body of a `/health` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
	/// Free-form status, `"healthy"` when the server is up.
	#[serde(default)]
	pub status: String,
	/// Whether the query engine binary is present.
	#[serde(default)]
	pub c_engine_available: bool,
	/// Whether a graph has been ingested.
	#[serde(default)]
	pub graph_data_loaded: bool,
}

impl HealthStatus {
	/// One-line summary for the header.
	pub fn summary(&self) -> String {
		let engine = if self.c_engine_available {
			"engine ready"
		} else {
			"engine missing"
		};
		let graph = if self.graph_data_loaded {
			"graph loaded"
		} else {
			"no graph yet"
		};
		format!("Backend {}: {engine}, {graph}", self.status)
	}
}
