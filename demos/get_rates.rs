//! Demonstrates quoting a URL through the facade against a mock gateway, with client logs
//! routed through `tracing-subscriber` (`TOLLBIT_CLIENT_LOG=debug` shows every request).

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use tracing_subscriber::EnvFilter;
// self
use tollbit_client::{UseContentClient, env::Environment};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_env("TOLLBIT_CLIENT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.init();

	let server = MockServer::start_async().await;
	let rate_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/dev/v1/rate/example.com/articles/daydream");
			then.status(200).header("content-type", "application/json").body(
				r#"[{
					"price": { "priceMicros": 7000, "currency": "USD" },
					"license": {
						"cuid": "r6y1oozkapcoyzfm6dgc7813",
						"licenseType": "ON_DEMAND_LICENSE",
						"licensePath": "https://example.com/license/on-demand",
						"permissions": [{ "name": "PARTIAL_USE" }],
						"validUntil": "2030-01-01T00:00:00Z"
					},
					"error": ""
				}]"#,
			);
		})
		.await;
	let client = UseContentClient::with_environment(
		"demo-secret",
		"demo-agent/1.0",
		Environment::new(&server.base_url())?,
	);
	let quotes = client.get_rate("https://example.com/articles/daydream?ref=home").await?;

	for quote in &quotes {
		println!(
			"{} micro-{} for {} ({} permissions), valid until {}.",
			quote.price_micros(),
			quote.price().currency(),
			quote.license().license_type(),
			quote.license().permissions().len(),
			quote.license().valid_until(),
		);
	}

	rate_mock.assert_async().await;

	Ok(())
}
