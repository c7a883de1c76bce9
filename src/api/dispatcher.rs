use log::{debug, error, warn};
use serde::de::DeserializeOwned;

use super::error::{DispatchError, TransportError};
use super::transport::{RawResponse, Transport};
use super::{
	HEALTH_PATH, HealthStatus, NODES_PATH, NodesResponse, QUERY_PATH, QueryRequest,
	QueryResponse, UPLOAD_PATH, UploadResponse,
};

/// Turns user actions into backend calls. Each method makes at most one
/// HTTP call and never touches the view.
pub struct Dispatcher<T> {
	transport: T,
}

impl<T: Transport> Dispatcher<T> {
	/// Dispatcher over `transport`.
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	#[cfg(test)]
	pub(crate) fn transport(&self) -> &T {
		&self.transport
	}

	/// Send `file` for ingestion and return the backend's confirmation.
	pub async fn submit_upload(&self, file: Option<&T::File>) -> Result<String, DispatchError> {
		let file = file.ok_or(DispatchError::EmptyFileSelection)?;
		debug!("POST {UPLOAD_PATH}");
		let raw = self.transport.post_file(UPLOAD_PATH, "file", file).await?;
		if !raw.is_success() {
			warn!("upload rejected with status {}", raw.status);
			return Err(TransportError::Status(raw.status).into());
		}
		let response: UploadResponse = decode(&raw)?;
		if response.success {
			Ok(response.message.unwrap_or_default())
		} else {
			Err(DispatchError::Backend(
				response.error.unwrap_or_else(|| "upload failed".to_string()),
			))
		}
	}

	/// Run `request` and return the raw `result` string.
	///
	/// Blank required fields fail with [`DispatchError::Validation`] without
	/// touching the network. Error bodies sent with a non-2xx status still
	/// surface their `error` text as [`DispatchError::Backend`].
	pub async fn submit_query(&self, request: &QueryRequest) -> Result<String, DispatchError> {
		request.validate()?;
		let body = serde_json::to_string(request)?;
		debug!("POST {QUERY_PATH} {body}");
		let raw = self.transport.post_json(QUERY_PATH, body).await?;

		match serde_json::from_str::<QueryResponse>(&raw.body) {
			Ok(QueryResponse {
				success: true,
				result,
				..
			}) if raw.is_success() => Ok(result.unwrap_or_default()),
			Ok(QueryResponse {
				error: Some(error), ..
			}) => {
				warn!("query failed: {error}");
				Err(DispatchError::Backend(error))
			}
			_ if !raw.is_success() => {
				warn!("query rejected with status {}", raw.status);
				Err(TransportError::Status(raw.status).into())
			}
			Ok(_) => Err(DispatchError::Backend("query failed".to_string())),
			Err(e) => Err(e.into()),
		}
	}

	/// Known node names for input assistance. `None` on any failure; the
	/// failure is logged and the caller keeps whatever it had.
	pub async fn refresh_node_list(&self) -> Option<Vec<String>> {
		debug!("GET {NODES_PATH}");
		let fetched = match self.transport.get(NODES_PATH).await {
			Ok(raw) if raw.is_success() => decode::<NodesResponse>(&raw),
			Ok(raw) => Err(TransportError::Status(raw.status).into()),
			Err(e) => Err(e.into()),
		};
		match fetched {
			Ok(response) if response.success => Some(response.nodes),
			Ok(_) => {
				error!("Failed to load nodes: backend reported failure");
				None
			}
			Err(e) => {
				error!("Failed to load nodes: {e}");
				None
			}
		}
	}

	/// Backend health flags.
	pub async fn check_health(&self) -> Result<HealthStatus, DispatchError> {
		debug!("GET {HEALTH_PATH}");
		let raw = self.transport.get(HEALTH_PATH).await?;
		if !raw.is_success() {
			return Err(TransportError::Status(raw.status).into());
		}
		decode(&raw)
	}
}

fn decode<R: DeserializeOwned>(raw: &RawResponse) -> Result<R, DispatchError> {
	Ok(serde_json::from_str(&raw.body)?)
}
