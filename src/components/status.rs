use leptos::prelude::*;

use crate::console::Status;

/// Upload status line. Hidden until the first status arrives.
#[component]
pub fn StatusBanner(#[prop(into)] status: Signal<Option<Status>>) -> impl IntoView {
	move || {
		status.get().map(|s| {
			view! {
				<div id="uploadStatus" class=s.kind.class()>
					{s.message}
				</div>
			}
		})
	}
}
