//! Client configuration.

/// Base URL used when none is baked in at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Connection settings for the knowledge-graph backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	base_url: String,
}

impl ClientConfig {
	/// Build a config for `base_url`. Trailing slashes are dropped.
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url: String = base_url.into();
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	/// Config from the `KG_CONSOLE_API_BASE` value captured at compile time.
	pub fn from_build_env() -> Self {
		Self::new(option_env!("KG_CONSOLE_API_BASE").unwrap_or(DEFAULT_API_BASE))
	}

	/// The normalised base URL.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Absolute URL for an API path such as `"/query"`.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self::new(DEFAULT_API_BASE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_joins_without_double_slash() {
		let config = ClientConfig::new("http://example.test/api/");
		assert_eq!(config.base_url(), "http://example.test/api");
		assert_eq!(config.endpoint("/query"), "http://example.test/api/query");
		assert_eq!(config.endpoint("nodes"), "http://example.test/api/nodes");
	}

	#[test]
	fn default_points_at_local_backend() {
		assert_eq!(
			ClientConfig::default().endpoint("/upload"),
			"http://localhost:5000/api/upload"
		);
	}
}
