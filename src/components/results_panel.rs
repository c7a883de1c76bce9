use leptos::prelude::*;

use super::diagram::{DiagramCanvas, GraphData, RenderError};
use crate::mindmap::{Diagram, MindmapView};
use crate::results::ResultView;

#[component]
pub fn ResultsPanel(#[prop(into)] result: Signal<ResultView>) -> impl IntoView {
	view! {
		<div id="results" class="results">
			{move || match result.get() {
				ResultView::Idle => {
					view! { <p class="placeholder">"Results will appear here"</p> }.into_any()
				}
				ResultView::Pending => {
					view! { <p class="placeholder">"Executing query..."</p> }.into_any()
				}
				ResultView::Text(text) => view! { <pre>{text}</pre> }.into_any(),
				ResultView::Error(message) => view! { <p class="error">{message}</p> }.into_any(),
				ResultView::Mindmap(MindmapView::Placeholder(placeholder)) => {
					view! { <pre>{placeholder.message()}</pre> }.into_any()
				}
				ResultView::Mindmap(MindmapView::Diagram(diagram)) => {
					view! { <MindmapResult diagram=diagram /> }.into_any()
				}
			}}
		</div>
	}
}

/// What replaces a diagram that could not be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RenderFailure {
	message: String,
	description: String,
}

impl RenderFailure {
	fn new(error: &RenderError, description: &str) -> Self {
		Self {
			message: format!("Error rendering diagram: {error}"),
			description: description.to_string(),
		}
	}
}

/// Canvas plus the description it was drawn from. Render failures replace
/// the canvas with the error and the offending description.
#[component]
fn MindmapResult(diagram: Diagram) -> impl IntoView {
	let text = diagram.text().to_string();
	let edge_count = diagram.edges().len();
	let render_error = RwSignal::new(None::<RenderError>);

	let canvas = match GraphData::from_description(&text) {
		Ok(data) => {
			let on_error = Callback::new(move |e: RenderError| render_error.set(Some(e)));
			view! { <DiagramCanvas data=data on_error=on_error /> }.into_any()
		}
		Err(e) => {
			log::error!("diagram rejected: {e}");
			render_error.set(Some(e));
			().into_any()
		}
	};

	let failed_text = text.clone();
	view! {
		<div class="mindmap">
			{move || {
				render_error
					.get()
					.map(|e| {
						let failure = RenderFailure::new(&e, &failed_text);
						view! {
							<div class="render-error">
								<p class="error">{failure.message}</p>
								<pre>{failure.description}</pre>
							</div>
						}
					})
			}}
			<div
				class="mindmap-canvas"
				style:display=move || if render_error.get().is_some() { "none" } else { "block" }
			>
				{canvas}
			</div>
			<details class="diagram-source">
				<summary>{format!("Diagram description ({edge_count} edges)")}</summary>
				<pre>{text}</pre>
			</details>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mindmap::{MindmapView, translate};

	#[test]
	fn failure_carries_message_and_description() {
		let MindmapView::Diagram(diagram) = translate("MINDMAP_DATA:\nA|r|B") else {
			panic!("expected a diagram");
		};
		let error = RenderError::Canvas("2d context unavailable".into());
		let failure = RenderFailure::new(&error, diagram.text());
		assert_eq!(
			failure.message,
			"Error rendering diagram: canvas unavailable: 2d context unavailable"
		);
		assert_eq!(failure.description, diagram.text());
	}

	#[test]
	fn rejected_description_is_shown_verbatim() {
		let text = "graph TD;\nA[\"A\"]\n<script>";
		let error = GraphData::from_description(text).unwrap_err();
		let failure = RenderFailure::new(&error, text);
		assert_eq!(
			failure.message,
			"Error rendering diagram: syntax error on line 3: <script>"
		);
		assert_eq!(failure.description, text);
	}
}
