//! What the results panel shows.

use crate::api::{DispatchError, QueryType};
use crate::mindmap::{self, MindmapView};

/// Content of the results panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultView {
	/// Nothing run yet.
	#[default]
	Idle,
	/// A query is in flight.
	Pending,
	/// Literal engine output.
	Text(String),
	/// Failure message, shown verbatim.
	Error(String),
	/// Translated mindmap payload.
	Mindmap(MindmapView),
}

impl ResultView {
	/// Map a finished query to its view. Only a successful mindmap query is
	/// parsed; failures never are.
	pub fn from_outcome(query_type: QueryType, outcome: Result<String, DispatchError>) -> Self {
		match outcome {
			Ok(result) if query_type == QueryType::Mindmap => {
				ResultView::Mindmap(mindmap::translate(&result))
			}
			Ok(result) => ResultView::Text(result),
			Err(e) => ResultView::Error(e.user_message()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mindmap::Placeholder;

	#[test]
	fn mindmap_failure_is_not_parsed() {
		let view = ResultView::from_outcome(
			QueryType::Mindmap,
			Err(DispatchError::Backend("MINDMAP_DATA:\nA|r|B".into())),
		);
		assert_eq!(view, ResultView::Error("Error: MINDMAP_DATA:\nA|r|B".into()));
	}

	#[test]
	fn other_types_render_literally() {
		let text = "MINDMAP_DATA:\nA|r|B";
		assert_eq!(
			ResultView::from_outcome(QueryType::Qa, Ok(text.into())),
			ResultView::Text(text.into())
		);
	}

	#[test]
	fn mindmap_success_is_translated() {
		assert_eq!(
			ResultView::from_outcome(QueryType::Mindmap, Ok("ERROR: Node not found".into())),
			ResultView::Mindmap(MindmapView::Placeholder(Placeholder::InvalidFormat {
				original: "ERROR: Node not found".into()
			}))
		);
	}
}
