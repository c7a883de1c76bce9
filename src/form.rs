//! Query form state and its translation into a [`QueryRequest`].

use crate::api::{QueryRequest, QueryType, ValidationError};

/// Raw contents of the query inputs. Each query type reads its own fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryForm {
	/// Selected query type.
	pub query_type: QueryType,
	/// Path start.
	pub start: String,
	/// Path end.
	pub end: String,
	/// Mindmap root.
	pub mindmap_root: String,
	/// QA node.
	pub qa_node: String,
	/// Completion prefix.
	pub prefix: String,
}

impl QueryForm {
	/// Trim the fields the active type needs and build the request.
	/// Fields belonging to other types are ignored.
	pub fn to_request(&self) -> Result<QueryRequest, ValidationError> {
		match self.query_type {
			QueryType::Path => {
				let (start, end) = (self.start.trim(), self.end.trim());
				if start.is_empty() || end.is_empty() {
					return Err(ValidationError::MissingPathEnds);
				}
				Ok(QueryRequest::Path {
					start: start.to_string(),
					end: end.to_string(),
				})
			}
			QueryType::Topics => Ok(QueryRequest::Topics),
			QueryType::Mindmap => Ok(QueryRequest::Mindmap {
				start: required(&self.mindmap_root, ValidationError::MissingRoot)?,
			}),
			QueryType::Qa => Ok(QueryRequest::Qa {
				node: required(&self.qa_node, ValidationError::MissingNode)?,
			}),
			QueryType::Complete => Ok(QueryRequest::Complete {
				prefix: required(&self.prefix, ValidationError::MissingPrefix)?,
			}),
		}
	}
}

fn required(value: &str, missing: ValidationError) -> Result<String, ValidationError> {
	match value.trim() {
		"" => Err(missing),
		v => Ok(v.to_string()),
	}
}
