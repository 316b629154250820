//! Gateway environment configuration.

// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable that overrides the gateway base URL.
pub const BASE_URL_ENV: &str = "TOLLBIT_SDK_DEVELOPER_API_BASE_URL";
/// Production gateway base URL.
pub const DEFAULT_BASE_URL: &str = "https://gateway.tollbit.com";

/// Where the gateway lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
	/// Base URL every endpoint path is appended to.
	pub developer_api_base_url: Url,
}
impl Environment {
	/// Parses and validates a base URL.
	pub fn new(base_url: &str) -> Result<Self, ConfigError> {
		let developer_api_base_url = Url::parse(base_url)
			.map_err(|source| ConfigError::InvalidBaseUrl { value: base_url.into(), source })?;

		if developer_api_base_url.cannot_be_a_base() {
			return Err(ConfigError::OpaqueBaseUrl { value: base_url.into() });
		}

		Ok(Self { developer_api_base_url })
	}

	/// Reads [`BASE_URL_ENV`] from the process environment, falling back to
	/// [`DEFAULT_BASE_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Same as [`Environment::from_env`] but reads variables through `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: FnOnce(&str) -> Option<String>,
	{
		match lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
			Some(value) => Self::new(value.trim()),
			None => Self::new(DEFAULT_BASE_URL),
		}
	}

	/// Joins an endpoint path (`/dev/v1/...`) onto the base URL.
	pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
		let base = self.developer_api_base_url.as_str().trim_end_matches('/');

		Url::parse(&format!("{base}{path}")).map_err(|e| {
			Error::bad_request(format!("endpoint `{path}` cannot be joined to `{base}`: {e}"))
		})
	}
}
