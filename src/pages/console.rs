use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::MouseEvent;

use crate::api::{HttpTransport, QueryType};
use crate::components::{ResultsPanel, StatusBanner};
use crate::config::ClientConfig;
use crate::console::{Action, Console, ConsoleView, Status};
use crate::form::QueryForm;
use crate::results::ResultView;

/// [`ConsoleView`] backed by the page's signals.
#[derive(Clone, Copy)]
struct SignalView {
	status: RwSignal<Option<Status>>,
	nodes: RwSignal<Vec<String>>,
	result: RwSignal<ResultView>,
	health: RwSignal<Option<String>>,
	uploading: RwSignal<bool>,
	querying: RwSignal<bool>,
}

impl ConsoleView for SignalView {
	fn set_status(&self, status: Status) {
		self.status.set(Some(status));
	}

	fn set_nodes(&self, nodes: Vec<String>) {
		self.nodes.set(nodes);
	}

	fn show_result(&self, view: ResultView) {
		self.result.set(view);
	}

	fn prompt(&self, message: &str) {
		if let Some(window) = web_sys::window() {
			let _ = window.alert_with_message(message);
		}
	}

	fn set_health(&self, line: String) {
		self.health.set(Some(line));
	}

	fn set_busy(&self, action: Action, busy: bool) {
		match action {
			Action::Upload => self.uploading.set(busy),
			Action::Query => self.querying.set(busy),
		}
	}
}

fn text_input(placeholder: &'static str, value: RwSignal<String>, suggest: bool) -> impl IntoView {
	view! {
		<input
			type="text"
			placeholder=placeholder
			list=suggest.then_some("nodeList")
			prop:value=move || value.get()
			on:input=move |ev| value.set(event_target_value(&ev))
		/>
	}
}

/// Upload, query and results in one page.
#[component]
pub fn ConsolePage() -> impl IntoView {
	let view_state = SignalView {
		status: RwSignal::new(None),
		nodes: RwSignal::new(Vec::new()),
		result: RwSignal::new(ResultView::Idle),
		health: RwSignal::new(None),
		uploading: RwSignal::new(false),
		querying: RwSignal::new(false),
	};
	let SignalView {
		status,
		nodes,
		result,
		health,
		uploading,
		querying,
	} = view_state;

	let config = use_context::<ClientConfig>().unwrap_or_default();
	let console = Rc::new(Console::new(HttpTransport::new(config), view_state));

	let start_console = console.clone();
	spawn_local(async move { start_console.start().await });

	let query_type = RwSignal::new(QueryType::default());
	let (start, end) = (RwSignal::new(String::new()), RwSignal::new(String::new()));
	let mindmap_root = RwSignal::new(String::new());
	let qa_node = RwSignal::new(String::new());
	let prefix = RwSignal::new(String::new());

	let file_input = NodeRef::<leptos::html::Input>::new();
	let upload_console = console.clone();
	let on_upload = move |_: MouseEvent| {
		let file = file_input
			.get()
			.and_then(|input| input.files())
			.and_then(|files| files.get(0));
		let console = upload_console.clone();
		spawn_local(async move { console.upload(file).await });
	};

	let query_console = console.clone();
	let on_execute = move |_: MouseEvent| {
		let form = QueryForm {
			query_type: query_type.get_untracked(),
			start: start.get_untracked(),
			end: end.get_untracked(),
			mindmap_root: mindmap_root.get_untracked(),
			qa_node: qa_node.get_untracked(),
			prefix: prefix.get_untracked(),
		};
		let console = query_console.clone();
		spawn_local(async move { console.execute(&form).await });
	};

	let shown = move |t: QueryType| move || if query_type.get() == t { "block" } else { "none" };

	view! {
		<main class="console">
			<header>
				<h1>"Knowledge Graph Console"</h1>
				{move || health.get().map(|line| view! { <p class="health">{line}</p> })}
			</header>

			<section class="upload">
				<h2>"1. Upload a document"</h2>
				<input type="file" id="fileInput" accept=".txt" node_ref=file_input />
				<button id="uploadBtn" on:click=on_upload prop:disabled=move || uploading.get()>
					{move || if uploading.get() { "Processing..." } else { "Upload & Process" }}
				</button>
				<StatusBanner status=status />
			</section>

			<section class="query">
				<h2>"2. Query the graph"</h2>
				<select
					id="queryType"
					on:change=move |ev| {
						if let Some(t) = QueryType::parse(&event_target_value(&ev)) {
							query_type.set(t);
						}
					}
				>
					{QueryType::ALL
						.into_iter()
						.map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
						.collect_view()}
				</select>

				<div class="query-inputs" style:display=shown(QueryType::Path)>
					{text_input("Start node", start, true)}
					{text_input("End node", end, true)}
				</div>
				<div class="query-inputs" style:display=shown(QueryType::Topics)>
					<p>"Lists the most connected topics in the graph."</p>
				</div>
				<div class="query-inputs" style:display=shown(QueryType::Mindmap)>
					{text_input("Root node", mindmap_root, true)}
				</div>
				<div class="query-inputs" style:display=shown(QueryType::Qa)>
					{text_input("Node name", qa_node, true)}
				</div>
				<div class="query-inputs" style:display=shown(QueryType::Complete)>
					{text_input("Prefix", prefix, false)}
				</div>

				<datalist id="nodeList">
					<For
						each=move || nodes.get()
						key=|node| node.clone()
						children=move |node: String| view! { <option value=node /> }
					/>
				</datalist>

				<button id="executeBtn" on:click=on_execute prop:disabled=move || querying.get()>
					"Execute Query"
				</button>
			</section>

			<section class="output">
				<h2>"Results"</h2>
				<ResultsPanel result=result />
			</section>
		</main>
	}
}
