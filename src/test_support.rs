//! In-memory stand-ins for the network and the DOM.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::api::{RawResponse, Transport, TransportError};
use crate::console::{Action, ConsoleView, Status};
use crate::results::ResultView;

/// Canned responses per path; every call is recorded as `(path, body)`.
#[derive(Default)]
pub(crate) struct FakeTransport {
	responses: RefCell<HashMap<&'static str, Result<RawResponse, TransportError>>>,
	pub(crate) calls: RefCell<Vec<(String, Option<String>)>>,
}

impl FakeTransport {
	pub(crate) fn respond(self, path: &'static str, status: u16, body: &str) -> Self {
		self.responses.borrow_mut().insert(
			path,
			Ok(RawResponse {
				status,
				body: body.to_string(),
			}),
		);
		self
	}

	pub(crate) fn fail(self, path: &'static str, message: &str) -> Self {
		self.responses
			.borrow_mut()
			.insert(path, Err(TransportError::Network(message.to_string())));
		self
	}

	pub(crate) fn calls_to(&self, path: &str) -> usize {
		self.calls.borrow().iter().filter(|(p, _)| p == path).count()
	}

	fn answer(&self, path: &str, body: Option<String>) -> Result<RawResponse, TransportError> {
		self.calls.borrow_mut().push((path.to_string(), body));
		self.responses
			.borrow()
			.get(path)
			.cloned()
			.unwrap_or_else(|| Err(TransportError::Network(format!("no route for {path}"))))
	}
}

impl Transport for FakeTransport {
	/// File name stands in for the browser `File`.
	type File = String;

	async fn get(&self, path: &str) -> Result<RawResponse, TransportError> {
		self.answer(path, None)
	}

	async fn post_json(&self, path: &str, body: String) -> Result<RawResponse, TransportError> {
		self.answer(path, Some(body))
	}

	async fn post_file(
		&self,
		path: &str,
		field: &str,
		file: &String,
	) -> Result<RawResponse, TransportError> {
		self.answer(path, Some(format!("{field}={file}")))
	}
}

/// Every view update, in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ViewEvent {
	Status(Status),
	Nodes(Vec<String>),
	Result(ResultView),
	Prompt(String),
	Health(String),
	Busy(Action, bool),
}

#[derive(Default)]
pub(crate) struct RecordingView {
	pub(crate) events: RefCell<Vec<ViewEvent>>,
}

impl RecordingView {
	pub(crate) fn last_result(&self) -> Option<ResultView> {
		self.events.borrow().iter().rev().find_map(|e| match e {
			ViewEvent::Result(r) => Some(r.clone()),
			_ => None,
		})
	}

	pub(crate) fn last_status(&self) -> Option<Status> {
		self.events.borrow().iter().rev().find_map(|e| match e {
			ViewEvent::Status(s) => Some(s.clone()),
			_ => None,
		})
	}

	pub(crate) fn prompts(&self) -> Vec<String> {
		self.events
			.borrow()
			.iter()
			.filter_map(|e| match e {
				ViewEvent::Prompt(p) => Some(p.clone()),
				_ => None,
			})
			.collect()
	}

	fn push(&self, event: ViewEvent) {
		self.events.borrow_mut().push(event);
	}
}

impl ConsoleView for RecordingView {
	fn set_status(&self, status: Status) {
		self.push(ViewEvent::Status(status));
	}

	fn set_nodes(&self, nodes: Vec<String>) {
		self.push(ViewEvent::Nodes(nodes));
	}

	fn show_result(&self, view: ResultView) {
		self.push(ViewEvent::Result(view));
	}

	fn prompt(&self, message: &str) {
		self.push(ViewEvent::Prompt(message.to_string()));
	}

	fn set_health(&self, line: String) {
		self.push(ViewEvent::Health(line));
	}

	fn set_busy(&self, action: Action, busy: bool) {
		self.push(ViewEvent::Busy(action, busy));
	}
}
