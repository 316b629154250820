//! Demonstrates plugging a non-reqwest transport into the client.
//!
//! 1. Implement [`GatewayHttpClient`] and answer each [`GatewayRequest`] with a
//!    [`GatewayResponse`] or a transport error of your own.
//! 2. Wrap it in `Arc` and pass it to [`UseContentClient::with_http_client`].
//! 3. Inspect the typed failures: transport errors surface as server errors that keep the
//!    transport error as their source.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
// self
use tollbit_client::{
	ErrorKind, SanctionedContentRequest, UseContentClient,
	env::Environment,
	http::{
		ACCESS_TOKEN_HEADER, GatewayHttpClient, GatewayRequest, GatewayResponse, Method,
		TransportFuture,
	},
	model::{Currency, LicenseType},
	obs::Telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_env("TOLLBIT_CLIENT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.init();

	let env = Environment::new("https://gateway.example.com")?;
	let request = SanctionedContentRequest::new(
		"example.com/bar",
		10_000,
		Currency::USD,
		LicenseType::ON_DEMAND_LICENSE,
	);
	let client: UseContentClient<CannedHttpClient> = UseContentClient::with_http_client(
		"demo-secret",
		"demo-agent/1.0",
		env.clone(),
		Arc::new(CannedHttpClient::Online),
	)
	.with_telemetry(Telemetry::new("custom_transport_demo"));
	let bundle = client.get_sanctioned_content(request.clone()).await?;

	println!("Content served by the canned transport: {}.", bundle.content().main());

	let offline: UseContentClient<CannedHttpClient> = UseContentClient::with_http_client(
		"demo-secret",
		"demo-agent/1.0",
		env,
		Arc::new(CannedHttpClient::Offline),
	);

	match offline.get_sanctioned_content(request).await {
		Err(e) if e.kind() == ErrorKind::ServerError => {
			let cause = e.source().map(ToString::to_string).unwrap_or_default();

			println!("Offline transport mapped to {}: {e} (caused by: {cause})", e.kind());
		},
		other => println!("Unexpected outcome: {other:?}."),
	}

	Ok(())
}

#[derive(Debug)]
struct OfflineError;
impl Display for OfflineError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Network is unreachable.")
	}
}
impl StdError for OfflineError {}

enum CannedHttpClient {
	Online,
	Offline,
}
impl CannedHttpClient {
	fn respond(request: &GatewayRequest) -> GatewayResponse {
		let path = request.url.path();

		match request.method {
			Method::Post if path == "/dev/v2/tokens/content" =>
				GatewayResponse::new(200, r#"{"token":"canned-token","format":"markdown"}"#),
			Method::Get
				if path.starts_with("/dev/v1/content/")
					&& request.header(ACCESS_TOKEN_HEADER) == Some("canned-token") =>
				GatewayResponse::new(
					200,
					r##"[{
						"content": { "header": "", "main": "# Canned", "footer": "" },
						"metadata": {},
						"rate": {
							"price": { "priceMicros": 1000, "currency": "USD" },
							"license": {
								"licenseType": "ON_DEMAND_LICENSE",
								"licensePath": "https://example.com/license",
								"permissions": [],
								"validUntil": "2030-01-01T00:00:00Z"
							}
						}
					}]"##,
				),
			_ => GatewayResponse::new(404, "not found"),
		}
	}
}
impl GatewayHttpClient for CannedHttpClient {
	type TransportError = OfflineError;

	fn execute(&self, request: GatewayRequest) -> TransportFuture<'_, Self::TransportError> {
		let outcome = match self {
			Self::Online => Ok(Self::respond(&request)),
			Self::Offline => Err(OfflineError),
		};

		Box::pin(async move { outcome })
	}
}
