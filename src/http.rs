//! Transport primitives for gateway calls.
//!
//! [`GatewayHttpClient`] is the crate's only dependency on an HTTP stack. An implementation
//! receives a fully-built [`GatewayRequest`] and either returns the status and body of the
//! response or fails with its own transport error; the response classifier turns both
//! outcomes into the client's error taxonomy. Timeouts, pooling, and TLS settings belong to
//! the implementation.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Header carrying the organization API key on token-issuance requests.
pub const API_KEY_HEADER: &str = "TollbitKey";
/// Header carrying the access token on content fetches.
pub const ACCESS_TOKEN_HEADER: &str = "TollbitToken";
/// Standard user-agent header.
pub const USER_AGENT_HEADER: &str = "User-Agent";
/// Standard content-type header.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

const REDACTED_HEADERS: [&str; 2] = [API_KEY_HEADER, ACCESS_TOKEN_HEADER];

/// Boxed future returned by [`GatewayHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = std::result::Result<GatewayResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute gateway requests.
///
/// Implementations must be `Send + Sync + 'static` so the APIs can share them behind `Arc`.
/// Any status code, including 4xx/5xx, is a successful transport outcome; only failures to
/// obtain a response (refused connection, DNS, TLS, timeout) belong in `TransportError`.
pub trait GatewayHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends the request and resolves to the raw response.
	fn execute(&self, request: GatewayRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// HTTP methods used by the gateway endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
}
impl Method {
	/// Returns the method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully-resolved outbound request.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute endpoint URL.
	pub url: Url,
	/// Header name/value pairs in insertion order.
	pub headers: Vec<(&'static str, String)>,
	/// Serialized body, if any.
	pub body: Option<Vec<u8>>,
}
impl GatewayRequest {
	/// Creates a `GET` request.
	pub fn get(url: Url) -> Self {
		Self { method: Method::Get, url, headers: Vec::new(), body: None }
	}

	/// Creates a `POST` request.
	pub fn post(url: Url) -> Self {
		Self { method: Method::Post, url, headers: Vec::new(), body: None }
	}

	/// Appends a header.
	pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
		self.headers.push((name, value.into()));

		self
	}

	/// Serializes `body` as JSON and sets the content type.
	pub fn with_json<T>(mut self, body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let bytes = serde_json::to_vec(body).map_err(|e| Error::Parse {
			message: "request body could not be serialized".into(),
			source: Some(Box::new(e)),
		})?;

		self.body = Some(bytes);

		Ok(self.with_header(CONTENT_TYPE_HEADER, "application/json"))
	}

	/// Returns the first value of `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}
impl Debug for GatewayRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let headers = self
			.headers
			.iter()
			.map(|(name, value)| {
				if REDACTED_HEADERS.iter().any(|secret| secret.eq_ignore_ascii_case(name)) {
					(*name, "<redacted>")
				} else {
					(*name, value.as_str())
				}
			})
			.collect::<Vec<_>>();

		f.debug_struct("GatewayRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &headers)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.finish()
	}
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl GatewayResponse {
	/// Creates a response from its parts.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Lossy UTF-8 view of the body, used for logging.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`], keeping its timeout and TLS settings.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the transport from a configured reqwest builder (timeouts, proxies, TLS roots).
	pub fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self, ConfigError> {
		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl GatewayHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: GatewayRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let GatewayRequest { method, url, headers, body } = request;
			let mut builder = match method {
				Method::Get => client.get(url),
				Method::Post => client.post(url),
			};

			for (name, value) in headers {
				builder = builder.header(name, value);
			}
			if let Some(body) = body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(GatewayResponse { status, body })
		})
	}
}
