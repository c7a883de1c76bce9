//! Browser console for a knowledge-graph backend: upload documents for
//! ingestion, run graph queries, and draw mindmap results.
//!
//! The request logic ([`api`], [`form`], [`console`]) and the mindmap
//! translator ([`mindmap`]) are plain Rust and run without a browser; the
//! Leptos app wires them to the page.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod config;
pub mod console;
pub mod form;
pub mod mindmap;
pub mod results;

mod components;
mod pages;

#[cfg(test)]
mod test_support;

use crate::config::ClientConfig;
use crate::pages::console::ConsolePage;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Root component: provides the client config and routes to the console.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();
	let config = ClientConfig::from_build_env();
	info!("API base {}", config.base_url());
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Knowledge Graph Console" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=ConsolePage />
			</Routes>
		</Router>
	}
}
