use leptos::prelude::*;

/// 404
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Page not found"</h1>
		<a href="/">"Back to the console"</a>
	}
}
