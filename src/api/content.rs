//! Rate lookups and token-authenticated content fetches.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	env::Environment,
	error::BoxError,
	http::{ACCESS_TOKEN_HEADER, GatewayHttpClient, GatewayRequest, USER_AGENT_HEADER},
	model::{AccessToken, ContentBundle, RateQuote},
	obs::{self, OperationKind, Telemetry},
	response,
	target::ContentPath,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Endpoint prefix for rate lookups; the content path is appended.
pub const RATE_PATH: &str = "/dev/v1/rate/";
/// Endpoint prefix for content fetches; the content path is appended.
pub const CONTENT_PATH: &str = "/dev/v1/content/";

#[cfg(feature = "reqwest")]
/// Content API specialized for the crate's default reqwest transport.
pub type ReqwestContentApi = ContentApi<ReqwestHttpClient>;

/// Client for the rate and content endpoints.
pub struct ContentApi<C>
where
	C: ?Sized + GatewayHttpClient,
{
	http_client: Arc<C>,
	user_agent: String,
	env: Environment,
	telemetry: Telemetry,
}
impl<C> ContentApi<C>
where
	C: ?Sized + GatewayHttpClient,
{
	/// Creates an API that reuses the caller-provided transport.
	pub fn with_http_client(
		user_agent: impl Into<String>,
		env: Environment,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			user_agent: user_agent.into(),
			env,
			telemetry: Telemetry::new("content_api"),
		}
	}

	/// Replaces the logging handle.
	pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
		self.telemetry = telemetry;

		self
	}

	/// User agent sent with every request.
	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}

	/// Lists the rate quotes for `content`, in server order.
	///
	/// An empty list means the gateway has no pricing for the path and is not an error.
	pub async fn get_rate(&self, content: &ContentPath) -> Result<Vec<RateQuote>> {
		const KIND: OperationKind = OperationKind::RateLookup;

		obs::observe(&self.telemetry, KIND, "get_rate", async move {
			let url = self.env.endpoint(&format!("{RATE_PATH}{content}"))?;
			let request =
				GatewayRequest::get(url).with_header(USER_AGENT_HEADER, self.user_agent.as_str());
			let outcome = super::send(self.http_client.as_ref(), request).await;

			response::classify_response(KIND, outcome)
		})
		.await
	}

	/// Fetches the licensed content for `content`, consuming `token`.
	///
	/// Besides the status-code mapping, a `200` body is rejected when it is not a non-empty
	/// list of objects, and an `error` member on its first element, whatever its value, is
	/// classified by [`response::classify_body_error`].
	pub async fn get_content(
		&self,
		token: AccessToken,
		content: &ContentPath,
	) -> Result<Vec<ContentBundle>> {
		const KIND: OperationKind = OperationKind::ContentFetch;

		obs::observe(&self.telemetry, KIND, "get_content", async move {
			let url = self.env.endpoint(&format!("{CONTENT_PATH}{content}"))?;
			let request = GatewayRequest::get(url)
				.with_header(USER_AGENT_HEADER, self.user_agent.as_str())
				.with_header(ACCESS_TOKEN_HEADER, token.expose());
			let outcome = super::send(self.http_client.as_ref(), request).await;
			let body = response::classify_status(KIND, outcome)?;

			parse_content_body(&body)
		})
		.await
	}
}
#[cfg(feature = "reqwest")]
impl ContentApi<ReqwestHttpClient> {
	/// Creates an API backed by a fresh reqwest transport.
	pub fn new(user_agent: impl Into<String>, env: Environment) -> Self {
		Self::with_http_client(user_agent, env, ReqwestHttpClient::default())
	}
}
impl<C> Clone for ContentApi<C>
where
	C: ?Sized + GatewayHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			user_agent: self.user_agent.clone(),
			env: self.env.clone(),
			telemetry: self.telemetry.clone(),
		}
	}
}
impl<C> Debug for ContentApi<C>
where
	C: ?Sized + GatewayHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ContentApi")
			.field("user_agent", &self.user_agent)
			.field("base_url", &self.env.developer_api_base_url.as_str())
			.finish()
	}
}

fn parse_content_body(body: &[u8]) -> Result<Vec<ContentBundle>> {
	const KIND: OperationKind = OperationKind::ContentFetch;

	let items = match response::decode::<Value>(KIND, body)? {
		Value::Array(items) if items.iter().all(Value::is_object) => items,
		_ => {
			obs::body_rejected(KIND, "not a list of objects");

			return Err(Error::parse("response data is not a list of objects"));
		},
	};
	let Some(first) = items.first() else {
		obs::body_rejected(KIND, "empty list");

		return Err(Error::parse("response is an empty list"));
	};

	if let Some(message) = embedded_error(first) {
		obs::body_rejected(KIND, &message);

		return Err(response::classify_body_error(&message));
	}

	serde_path_to_error::deserialize(Value::Array(items)).map_err(|e| {
		let message = format!("content item does not match the expected shape at `{}`", e.path());

		obs::body_rejected(KIND, &message);

		Error::Parse { message, source: Some(Box::new(e) as BoxError) }
	})
}

// Presence alone marks the item as failed; an empty or null value is still an error.
fn embedded_error(item: &Value) -> Option<String> {
	match item.get("error")? {
		Value::String(message) => Some(message.clone()),
		other => Some(other.to_string()),
	}
}
