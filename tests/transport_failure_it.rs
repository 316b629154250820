// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// self
use tollbit_client::{
	ErrorKind, SanctionedContentRequest, UseContentClient,
	api::{ContentApi, TokenApi},
	env::Environment,
	http::{GatewayHttpClient, GatewayRequest, TransportFuture},
	model::{AccessToken, ApiKey, CrawlTokenRequest, Currency, LicenseType},
	response::CONNECT_FAILURE_MESSAGE,
	target::{ContentPath, TargetUrl},
};

#[derive(Debug)]
enum FakeTransportError {
	Refused,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Refused => write!(f, "Connection refused."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Default)]
struct RefusingHttpClient {
	attempts: AtomicUsize,
}
impl GatewayHttpClient for RefusingHttpClient {
	type TransportError = FakeTransportError;

	fn execute(&self, _request: GatewayRequest) -> TransportFuture<'_, Self::TransportError> {
		self.attempts.fetch_add(1, Ordering::SeqCst);

		Box::pin(async { Err(FakeTransportError::Refused) })
	}
}

fn environment() -> Environment {
	Environment::new("https://gateway.invalid").expect("Fixture environment should build.")
}

fn assert_connect_failure(err: tollbit_client::Error) {
	assert_eq!(err.kind(), ErrorKind::ServerError);
	assert_eq!(err.message(), CONNECT_FAILURE_MESSAGE);
	assert_eq!(err.status(), None);

	let source = err.source().expect("Transport failure should keep its cause.");

	assert_eq!(source.to_string(), "Connection refused.");
}

#[tokio::test]
async fn every_operation_maps_transport_failures_to_server_errors() {
	let http_client = Arc::new(RefusingHttpClient::default());
	let content_api: ContentApi<RefusingHttpClient> =
		ContentApi::with_http_client("transport-it", environment(), Arc::clone(&http_client));
	let token_api: TokenApi<RefusingHttpClient> = TokenApi::with_http_client(
		ApiKey::new("org-secret"),
		"transport-it",
		environment(),
		Arc::clone(&http_client),
	);
	let path = ContentPath::parse("example.com/bar").expect("Content path should parse.");
	let target = TargetUrl::parse("example.com/bar").expect("Target should normalize.");

	assert_connect_failure(content_api.get_rate(&path).await.expect_err("Rate lookup should fail."));
	assert_connect_failure(
		content_api
			.get_content(AccessToken::new("tok"), &path)
			.await
			.expect_err("Content fetch should fail."),
	);
	assert_connect_failure(
		token_api
			.get_crawl_token(&CrawlTokenRequest::new(target, "transport-it"))
			.await
			.expect_err("Crawl token issuance should fail."),
	);

	let client = UseContentClient::with_apis(content_api, token_api);

	assert_connect_failure(
		client
			.get_sanctioned_content(SanctionedContentRequest::new(
				"example.com/bar",
				1_000,
				Currency::USD,
				LicenseType::ON_DEMAND_LICENSE,
			))
			.await
			.expect_err("Sanctioned content should fail."),
	);
	// Token issuance fails first, so the facade sends exactly one request.
	assert_eq!(http_client.attempts.load(Ordering::SeqCst), 4);
}
