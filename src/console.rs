//! Console controller: runs user actions through the [`Dispatcher`] and
//! publishes the outcome through a [`ConsoleView`].

use log::{debug, warn};

use crate::api::{Dispatcher, Transport};
use crate::form::QueryForm;
use crate::results::ResultView;

/// Shown while the backend ingests a document.
pub const PROCESSING_MESSAGE: &str = "Processing document. This may take 30-60 seconds...";

/// The two user actions that can be in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
	/// Document upload.
	Upload,
	/// Query execution.
	Query,
}

/// Tone of a status banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
	/// Work in progress.
	Info,
	/// Finished.
	Success,
	/// Failed.
	Error,
}

impl StatusKind {
	/// CSS modifier class.
	pub fn class(self) -> &'static str {
		match self {
			StatusKind::Info => "status",
			StatusKind::Success => "status success",
			StatusKind::Error => "status error",
		}
	}
}

/// Upload status banner contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
	/// Tone.
	pub kind: StatusKind,
	/// Text.
	pub message: String,
}

impl Status {
	fn new(kind: StatusKind, message: impl Into<String>) -> Self {
		Self {
			kind,
			message: message.into(),
		}
	}
}

/// Everything the controller may change on screen.
pub trait ConsoleView {
	/// Replace the upload status banner.
	fn set_status(&self, status: Status);
	/// Replace the node suggestions.
	fn set_nodes(&self, nodes: Vec<String>);
	/// Replace the results panel.
	fn show_result(&self, view: ResultView);
	/// Ask the user to fix their input.
	fn prompt(&self, message: &str);
	/// Replace the backend health line.
	fn set_health(&self, line: String);
	/// Enable or disable the control that triggers `action`.
	fn set_busy(&self, action: Action, busy: bool);
}

/// Binds a dispatcher to a view.
pub struct Console<T, V> {
	dispatcher: Dispatcher<T>,
	view: V,
}

impl<T: Transport, V: ConsoleView> Console<T, V> {
	/// Controller over `transport` publishing to `view`.
	pub fn new(transport: T, view: V) -> Self {
		Self {
			dispatcher: Dispatcher::new(transport),
			view,
		}
	}

	/// Initial page load.
	pub async fn start(&self) {
		self.check_health().await;
		self.load_nodes().await;
	}

	/// Refresh the node suggestions, keeping the old ones on failure.
	pub async fn load_nodes(&self) {
		if let Some(nodes) = self.dispatcher.refresh_node_list().await {
			debug!("loaded {} nodes", nodes.len());
			self.view.set_nodes(nodes);
		}
	}

	/// Update the health line.
	pub async fn check_health(&self) {
		let line = match self.dispatcher.check_health().await {
			Ok(health) => health.summary(),
			Err(e) => {
				warn!("health check failed: {e}");
				format!("Backend unreachable: {e}")
			}
		};
		self.view.set_health(line);
	}

	/// Upload `file` and, on success, refresh the node suggestions.
	pub async fn upload(&self, file: Option<T::File>) {
		let in_flight = file.is_some();
		if in_flight {
			self.view.set_busy(Action::Upload, true);
			self.view
				.set_status(Status::new(StatusKind::Info, PROCESSING_MESSAGE));
		}
		let outcome = self.dispatcher.submit_upload(file.as_ref()).await;
		if in_flight {
			self.view.set_busy(Action::Upload, false);
		}

		match outcome {
			Ok(message) => {
				self.view
					.set_status(Status::new(StatusKind::Success, format!("✓ {message}")));
				self.load_nodes().await;
			}
			Err(e) => self
				.view
				.set_status(Status::new(StatusKind::Error, e.user_message())),
		}
	}

	/// Run the query described by `form`. Blank inputs only prompt.
	pub async fn execute(&self, form: &QueryForm) {
		let request = match form.to_request() {
			Ok(request) => request,
			Err(e) => {
				self.view.prompt(&e.to_string());
				return;
			}
		};
		debug!("executing {} query", request.query_type().as_str());

		self.view.set_busy(Action::Query, true);
		self.view.show_result(ResultView::Pending);
		let outcome = self.dispatcher.submit_query(&request).await;
		self.view.set_busy(Action::Query, false);
		self.view
			.show_result(ResultView::from_outcome(request.query_type(), outcome));
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::api::QueryType;
	use crate::mindmap::MindmapView;
	use crate::test_support::{FakeTransport, RecordingView, ViewEvent};

	const NODES_OK: &str = r#"{"success":true,"nodes":["A","B"]}"#;

	fn console(transport: FakeTransport) -> Console<FakeTransport, RecordingView> {
		Console::new(transport, RecordingView::default())
	}

	#[test]
	fn blank_query_prompts_without_network() {
		let c = console(FakeTransport::default());
		let form = QueryForm {
			query_type: QueryType::Path,
			start: "A".into(),
			..Default::default()
		};
		block_on(c.execute(&form));
		assert_eq!(c.view.prompts(), vec!["Please enter both start and end nodes"]);
		assert!(c.dispatcher_calls().is_empty());
		assert_eq!(c.view.last_result(), None);
	}

	#[test]
	fn mindmap_query_shows_pending_then_diagram() {
		let transport = FakeTransport::default().respond(
			"/query",
			200,
			r#"{"success":true,"result":"MINDMAP_DATA:\nA|rel|B\nA|rel|B"}"#,
		);
		let c = console(transport);
		let form = QueryForm {
			query_type: QueryType::Mindmap,
			mindmap_root: "A".into(),
			..Default::default()
		};
		block_on(c.execute(&form));

		let events = c.view.events.borrow();
		assert_eq!(events[0], ViewEvent::Busy(Action::Query, true));
		assert_eq!(events[1], ViewEvent::Result(ResultView::Pending));
		assert_eq!(events[2], ViewEvent::Busy(Action::Query, false));
		let ViewEvent::Result(ResultView::Mindmap(MindmapView::Diagram(d))) = &events[3] else {
			panic!("expected diagram, got {:?}", events[3]);
		};
		assert_eq!(d.edges().len(), 1);
	}

	#[test]
	fn failed_query_shows_error_text() {
		let transport = FakeTransport::default().respond(
			"/query",
			200,
			r#"{"success":false,"error":"ERROR: Node not found"}"#,
		);
		let c = console(transport);
		let form = QueryForm {
			query_type: QueryType::Qa,
			qa_node: "Nowhere".into(),
			..Default::default()
		};
		block_on(c.execute(&form));
		assert_eq!(
			c.view.last_result(),
			Some(ResultView::Error("Error: ERROR: Node not found".into()))
		);
	}

	#[test]
	fn successful_upload_refreshes_nodes() {
		let transport = FakeTransport::default()
			.respond("/upload", 200, r#"{"success":true,"message":"Done"}"#)
			.respond("/nodes", 200, NODES_OK);
		let c = console(transport);
		block_on(c.upload(Some("doc.txt".into())));

		let events = c.view.events.borrow();
		assert_eq!(events[0], ViewEvent::Busy(Action::Upload, true));
		assert_eq!(
			events[1],
			ViewEvent::Status(Status::new(StatusKind::Info, PROCESSING_MESSAGE))
		);
		assert!(events.contains(&ViewEvent::Status(Status::new(
			StatusKind::Success,
			"✓ Done"
		))));
		assert_eq!(
			events.last(),
			Some(&ViewEvent::Nodes(vec!["A".into(), "B".into()]))
		);
	}

	#[test]
	fn upload_without_file_reports_and_stays_idle() {
		let c = console(FakeTransport::default());
		block_on(c.upload(None));
		assert_eq!(
			*c.view.events.borrow(),
			vec![ViewEvent::Status(Status::new(
				StatusKind::Error,
				"Please select a file first"
			))]
		);
		assert!(c.dispatcher_calls().is_empty());
	}

	#[test]
	fn failed_upload_does_not_refresh_nodes() {
		let transport = FakeTransport::default()
			.respond("/upload", 200, r#"{"success":false,"error":"bad file"}"#)
			.respond("/nodes", 200, NODES_OK);
		let c = console(transport);
		block_on(c.upload(Some("doc.txt".into())));
		assert_eq!(
			c.view.last_status(),
			Some(Status::new(StatusKind::Error, "Error: bad file"))
		);
		assert_eq!(c.transport().calls_to("/nodes"), 0);
	}

	#[test]
	fn start_reports_unreachable_backend_and_keeps_going() {
		let transport = FakeTransport::default()
			.fail("/health", "Failed to fetch")
			.respond("/nodes", 200, NODES_OK);
		let c = console(transport);
		block_on(c.start());
		let events = c.view.events.borrow();
		assert_eq!(
			events[0],
			ViewEvent::Health("Backend unreachable: Failed to fetch".into())
		);
		assert_eq!(events[1], ViewEvent::Nodes(vec!["A".into(), "B".into()]));
	}

	impl Console<FakeTransport, RecordingView> {
		fn transport(&self) -> &FakeTransport {
			self.dispatcher.transport()
		}

		fn dispatcher_calls(&self) -> Vec<(String, Option<String>)> {
			self.transport().calls.borrow().clone()
		}
	}
}
