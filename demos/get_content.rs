//! Demonstrates the full purchase path: `get_sanctioned_content` trades the organization key
//! for a scoped token and fetches the licensed page with it.
//!
//! With `TOLLBIT_SECRET_KEY` set the demo talks to the gateway selected by
//! `TOLLBIT_SDK_DEVELOPER_API_BASE_URL` (production by default); otherwise it runs against a
//! local mock.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use tracing_subscriber::EnvFilter;
// self
use tollbit_client::{
	SanctionedContentRequest, UseContentClient,
	env::Environment,
	http::ReqwestHttpClient,
	model::{ContentFormat, Currency, LicenseType},
	reqwest::Client,
};

const USER_AGENT: &str = "demo-agent/1.0";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_env("TOLLBIT_CLIENT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.init();

	let request = SanctionedContentRequest::new(
		"example.com/articles/daydream",
		10_000,
		Currency::USD,
		LicenseType::ON_DEMAND_LICENSE,
	)
	.with_format(ContentFormat::Markdown);

	if let Ok(secret_key) = std::env::var("TOLLBIT_SECRET_KEY") {
		let http_client =
			ReqwestHttpClient::from_builder(Client::builder().timeout(Duration::from_secs(30)))?;
		let client = UseContentClient::with_http_client(
			secret_key,
			USER_AGENT,
			Environment::from_env()?,
			http_client,
		);
		let bundle = client.get_sanctioned_content(request).await?;

		println!("{}", bundle.content().main());

		return Ok(());
	}

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/dev/v2/tokens/content").header("tollbitkey", "demo-secret");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"token":"demo-token","format":"markdown"}"#);
		})
		.await;
	let content_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/dev/v1/content/example.com/articles/daydream")
				.header("tollbittoken", "demo-token");
			then.status(200).header("content-type", "application/json").body(
				r##"[{
					"content": { "header": "", "main": "# Daydream\n\nLicensed body.", "footer": "" },
					"metadata": { "title": "Daydream", "author": "A. Writer" },
					"rate": {
						"price": { "priceMicros": 7000, "currency": "USD" },
						"license": {
							"cuid": "r6y1oozkapcoyzfm6dgc7813",
							"licenseType": "ON_DEMAND_LICENSE",
							"licensePath": "https://example.com/license/on-demand",
							"permissions": [{ "name": "PARTIAL_USE" }],
							"validUntil": "2030-01-01T00:00:00Z"
						}
					}
				}]"##,
			);
		})
		.await;
	let client = UseContentClient::with_environment(
		"demo-secret",
		USER_AGENT,
		Environment::new(&server.base_url())?,
	);
	let bundle = client.get_sanctioned_content(request).await?;

	println!(
		"{} by {} ({} micro-{}):\n{}",
		bundle.metadata().title().unwrap_or("untitled"),
		bundle.metadata().author().unwrap_or("unknown"),
		bundle.rate().price_micros(),
		bundle.rate().price().currency(),
		bundle.content().main(),
	);

	token_mock.assert_async().await;
	content_mock.assert_async().await;

	Ok(())
}
