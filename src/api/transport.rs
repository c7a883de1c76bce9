use gloo_net::http::{Request, Response};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use super::error::TransportError;
use crate::config::ClientConfig;

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body as text.
	pub body: String,
}

impl RawResponse {
	/// `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// One outbound HTTP call per method. Paths are relative to the API base.
#[allow(async_fn_in_trait)]
pub trait Transport {
	/// What the upload form hands over.
	type File;

	/// `GET path`.
	async fn get(&self, path: &str) -> Result<RawResponse, TransportError>;

	/// `POST path` with a JSON body.
	async fn post_json(&self, path: &str, body: String) -> Result<RawResponse, TransportError>;

	/// `POST path` as multipart with `file` under `field`.
	async fn post_file(
		&self,
		path: &str,
		field: &str,
		file: &Self::File,
	) -> Result<RawResponse, TransportError>;
}

/// Browser `fetch` transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
	config: ClientConfig,
}

impl HttpTransport {
	/// Transport against `config`'s base URL.
	pub fn new(config: ClientConfig) -> Self {
		Self { config }
	}
}

impl Transport for HttpTransport {
	type File = File;

	async fn get(&self, path: &str) -> Result<RawResponse, TransportError> {
		let response = Request::get(&self.config.endpoint(path))
			.send()
			.await
			.map_err(network)?;
		read(response).await
	}

	async fn post_json(&self, path: &str, body: String) -> Result<RawResponse, TransportError> {
		let response = Request::post(&self.config.endpoint(path))
			.header("Content-Type", "application/json")
			.body(body)
			.map_err(network)?
			.send()
			.await
			.map_err(network)?;
		read(response).await
	}

	async fn post_file(
		&self,
		path: &str,
		field: &str,
		file: &File,
	) -> Result<RawResponse, TransportError> {
		let form = FormData::new().map_err(js)?;
		form.append_with_blob(field, file).map_err(js)?;
		let response = Request::post(&self.config.endpoint(path))
			.body(form)
			.map_err(network)?
			.send()
			.await
			.map_err(network)?;
		read(response).await
	}
}

async fn read(response: Response) -> Result<RawResponse, TransportError> {
	let status = response.status();
	let body = response.text().await.map_err(network)?;
	Ok(RawResponse { status, body })
}

fn network(e: gloo_net::Error) -> TransportError {
	TransportError::Network(e.to_string())
}

fn js(e: JsValue) -> TransportError {
	TransportError::Network(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}
