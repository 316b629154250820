//! Token issuance for the content and crawl grants.

// self
use crate::{
	_prelude::*,
	env::Environment,
	http::{API_KEY_HEADER, GatewayHttpClient, GatewayRequest, USER_AGENT_HEADER},
	model::{ApiKey, ContentTokenRequest, CrawlTokenRequest, TokenResponse},
	obs::{self, OperationKind, Telemetry},
	response,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Endpoint issuing content ("subdomain access") tokens.
pub const CONTENT_TOKEN_PATH: &str = "/dev/v2/tokens/content";
/// Endpoint issuing crawl tokens.
pub const CRAWL_TOKEN_PATH: &str = "/dev/v2/tokens/crawl";

#[cfg(feature = "reqwest")]
/// Token API specialized for the crate's default reqwest transport.
pub type ReqwestTokenApi = TokenApi<ReqwestHttpClient>;

/// Client for the token-issuance endpoints.
///
/// Owns the organization key and the user agent; the user agent doubles as the one the
/// issued token is bound to.
pub struct TokenApi<C>
where
	C: ?Sized + GatewayHttpClient,
{
	http_client: Arc<C>,
	api_key: ApiKey,
	user_agent: String,
	env: Environment,
	telemetry: Telemetry,
}
impl<C> TokenApi<C>
where
	C: ?Sized + GatewayHttpClient,
{
	/// Creates an API that reuses the caller-provided transport.
	pub fn with_http_client(
		api_key: ApiKey,
		user_agent: impl Into<String>,
		env: Environment,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			api_key,
			user_agent: user_agent.into(),
			env,
			telemetry: Telemetry::new("token_api"),
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

	/// Requests a token scoped to one URL and price ceiling.
	pub async fn get_content_token(&self, request: &ContentTokenRequest) -> Result<TokenResponse> {
		self.issue(OperationKind::ContentToken, "get_content_token", CONTENT_TOKEN_PATH, request)
			.await
	}

	/// Requests a crawl token for a site.
	pub async fn get_crawl_token(&self, request: &CrawlTokenRequest) -> Result<TokenResponse> {
		self.issue(OperationKind::CrawlToken, "get_crawl_token", CRAWL_TOKEN_PATH, request).await
	}

	async fn issue<B>(
		&self,
		kind: OperationKind,
		stage: &'static str,
		path: &str,
		body: &B,
	) -> Result<TokenResponse>
	where
		B: ?Sized + Serialize + Sync,
	{
		obs::observe(&self.telemetry, kind, stage, async move {
			let request = GatewayRequest::post(self.env.endpoint(path)?)
				.with_header(API_KEY_HEADER, self.api_key.expose())
				.with_header(USER_AGENT_HEADER, self.user_agent.as_str())
				.with_json(body)?;
			let outcome = super::send(self.http_client.as_ref(), request).await;

			response::classify_response(kind, outcome)
		})
		.await
	}
}
#[cfg(feature = "reqwest")]
impl TokenApi<ReqwestHttpClient> {
	/// Creates an API backed by a fresh reqwest transport.
	pub fn new(api_key: ApiKey, user_agent: impl Into<String>, env: Environment) -> Self {
		Self::with_http_client(api_key, user_agent, env, ReqwestHttpClient::default())
	}
}
impl<C> Clone for TokenApi<C>
where
	C: ?Sized + GatewayHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			api_key: self.api_key.clone(),
			user_agent: self.user_agent.clone(),
			env: self.env.clone(),
			telemetry: self.telemetry.clone(),
		}
	}
}
impl<C> Debug for TokenApi<C>
where
	C: ?Sized + GatewayHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenApi")
			.field("api_key", &self.api_key)
			.field("user_agent", &self.user_agent)
			.field("base_url", &self.env.developer_api_base_url.as_str())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// self
	use super::*;
	use crate::{
		error::ErrorKind,
		http::{CONTENT_TYPE_HEADER, GatewayResponse, TransportFuture},
		model::{ContentFormat, Currency, LicenseType},
		target::TargetUrl,
	};

	#[derive(Debug, ThisError)]
	#[error("unreachable")]
	struct Unreachable;

	#[derive(Default)]
	struct Recorder {
		requests: Mutex<Vec<GatewayRequest>>,
		reply: Option<(u16, &'static str)>,
	}
	impl Recorder {
		fn replying(status: u16, body: &'static str) -> Self {
			Self { requests: Mutex::default(), reply: Some((status, body)) }
		}

		fn last(&self) -> GatewayRequest {
			self.requests
				.lock()
				.expect("Recorder lock should not be poisoned.")
				.last()
				.cloned()
				.expect("A request should have been recorded.")
		}
	}
	impl GatewayHttpClient for Recorder {
		type TransportError = Unreachable;

		fn execute(&self, request: GatewayRequest) -> TransportFuture<'_, Self::TransportError> {
			self.requests.lock().expect("Recorder lock should not be poisoned.").push(request);

			let reply = self.reply.map(|(status, body)| GatewayResponse::new(status, body));

			Box::pin(async move { reply.ok_or(Unreachable) })
		}
	}

	fn api(recorder: Arc<Recorder>) -> TokenApi<Recorder> {
		let env = Environment::new("https://gateway.test/").expect("Test environment should build.");

		TokenApi::with_http_client(ApiKey::new("org-secret"), "test-agent", env, recorder)
			.with_telemetry(Telemetry::disabled())
	}

	fn target() -> TargetUrl {
		TargetUrl::parse("example.com/bar").expect("Target should normalize.")
	}

	#[tokio::test]
	async fn content_tokens_post_key_agent_and_json() {
		let recorder = Arc::new(Recorder::replying(200, r#"{"token":"tok","format":"html"}"#));
		let request = ContentTokenRequest::new(
			target(),
			"test-agent",
			5_000,
			Currency::USD,
			LicenseType::ON_DEMAND_LICENSE,
		)
		.with_format(ContentFormat::Html);
		let response = api(recorder.clone())
			.get_content_token(&request)
			.await
			.expect("Token issuance should succeed.");

		assert_eq!(response.format(), Some(ContentFormat::Html));
		assert_eq!(response.into_access_token().expose(), "tok");

		let sent = recorder.last();

		assert_eq!(sent.url.as_str(), "https://gateway.test/dev/v2/tokens/content");
		assert_eq!(sent.header(API_KEY_HEADER), Some("org-secret"));
		assert_eq!(sent.header(USER_AGENT_HEADER), Some("test-agent"));
		assert_eq!(sent.header(CONTENT_TYPE_HEADER), Some("application/json"));

		let body: serde_json::Value =
			serde_json::from_slice(sent.body.as_deref().expect("Body should be present."))
				.expect("Body should be JSON.");

		assert_eq!(body["url"], "https://example.com/bar");
		assert_eq!(body["licenseCuid"], "");
		assert_eq!(body["format"], "html");
	}

	#[tokio::test]
	async fn crawl_tokens_use_their_own_endpoint() {
		let recorder = Arc::new(Recorder::replying(200, r#"{"token":"crawl"}"#));
		let response = api(recorder.clone())
			.get_crawl_token(&CrawlTokenRequest::new(target(), "test-agent"))
			.await
			.expect("Crawl token issuance should succeed.");

		assert_eq!(response.format(), None);
		assert_eq!(recorder.last().url.as_str(), "https://gateway.test/dev/v2/tokens/crawl");
	}

	#[tokio::test]
	async fn status_failures_are_classified() {
		for (status, expected) in [
			(400, ErrorKind::BadRequest),
			(401, ErrorKind::Unauthorized),
			(502, ErrorKind::ServerError),
			(418, ErrorKind::UnknownError),
		] {
			let err = api(Arc::new(Recorder::replying(status, "nope")))
				.get_crawl_token(&CrawlTokenRequest::new(target(), "test-agent"))
				.await
				.expect_err("Non-200 statuses should fail.");

			assert_eq!(err.kind(), expected, "status {status}");
		}
	}

	#[tokio::test]
	async fn transport_failures_are_server_errors() {
		let err = api(Arc::new(Recorder::default()))
			.get_crawl_token(&CrawlTokenRequest::new(target(), "test-agent"))
			.await
			.expect_err("Transport failure should fail.");

		assert_eq!(err.kind(), ErrorKind::ServerError);
		assert_eq!(err.message(), response::CONNECT_FAILURE_MESSAGE);
	}

	#[test]
	fn debug_hides_the_api_key() {
		let rendered = format!("{:?}", api(Arc::new(Recorder::default())));

		assert!(!rendered.contains("org-secret"));
		assert!(rendered.contains("test-agent"));
	}
}
