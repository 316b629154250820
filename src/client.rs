//! High-level facade composing token issuance and content fetch.

// self
use crate::{
	_prelude::*,
	api::{ContentApi, TokenApi},
	env::Environment,
	http::GatewayHttpClient,
	model::{
		ApiKey, ContentBundle, ContentFormat, ContentTokenRequest, Currency, LicenseType, RateQuote,
	},
	obs::{self, OperationKind, Telemetry},
	target::{ContentPath, TargetUrl},
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

/// Parameters of one licensed-content purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanctionedContentRequest {
	/// Caller URL; the scheme defaults to `https`.
	pub url: String,
	/// Highest acceptable price in micro-units.
	pub max_price_micros: i64,
	/// Currency of the price ceiling.
	pub currency: Currency,
	/// Requested license type.
	pub license_type: LicenseType,
	/// Specific license to buy; `None` uses the gateway default.
	pub license_id: Option<String>,
	/// Requested content format.
	pub format: ContentFormat,
}
impl SanctionedContentRequest {
	/// Creates a request for the default license of `license_type`, in markdown.
	pub fn new(
		url: impl Into<String>,
		max_price_micros: i64,
		currency: Currency,
		license_type: LicenseType,
	) -> Self {
		Self {
			url: url.into(),
			max_price_micros,
			currency,
			license_type,
			license_id: None,
			format: ContentFormat::default(),
		}
	}

	/// Selects a specific license.
	pub fn with_license_id(mut self, license_id: impl Into<String>) -> Self {
		self.license_id = Some(license_id.into());

		self
	}

	/// Overrides the requested format.
	pub fn with_format(mut self, format: ContentFormat) -> Self {
		self.format = format;

		self
	}
}

/// Entry point for callers that want rates and licensed content without handling tokens.
pub struct UseContentClient<C>
where
	C: ?Sized + GatewayHttpClient,
{
	content_api: ContentApi<C>,
	token_api: TokenApi<C>,
	telemetry: Telemetry,
}
impl<C> UseContentClient<C>
where
	C: ?Sized + GatewayHttpClient,
{
	/// Assembles a client from already-configured APIs.
	pub fn with_apis(content_api: ContentApi<C>, token_api: TokenApi<C>) -> Self {
		Self { content_api, token_api, telemetry: Telemetry::new("use_content_client") }
	}

	/// Builds both APIs over one shared transport.
	pub fn with_http_client(
		secret_key: impl Into<String>,
		user_agent: impl Into<String>,
		env: Environment,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		let http_client = http_client.into();
		let user_agent = user_agent.into();

		Self::with_apis(
			ContentApi::with_http_client(user_agent.clone(), env.clone(), Arc::clone(&http_client)),
			TokenApi::with_http_client(ApiKey::new(secret_key), user_agent, env, http_client),
		)
	}

	/// Replaces the logging handle of the facade and both APIs.
	pub fn with_telemetry(self, telemetry: Telemetry) -> Self {
		Self {
			content_api: self.content_api.with_telemetry(telemetry.clone()),
			token_api: self.token_api.with_telemetry(telemetry.clone()),
			telemetry,
		}
	}

	/// Rate/content API in use.
	pub fn content_api(&self) -> &ContentApi<C> {
		&self.content_api
	}

	/// Token API in use.
	pub fn token_api(&self) -> &TokenApi<C> {
		&self.token_api
	}

	/// Quotes `url`; scheme, query, and fragment are ignored.
	pub async fn get_rate(&self, url: &str) -> Result<Vec<RateQuote>> {
		let content = ContentPath::parse(url)?;

		self.content_api.get_rate(&content).await
	}

	/// Buys a token for `request` and fetches the content with it.
	///
	/// Token issuance and content fetch run strictly in sequence; the first failure is returned
	/// unchanged and a failed issuance sends no content request.
	pub async fn get_sanctioned_content(
		&self,
		request: SanctionedContentRequest,
	) -> Result<ContentBundle> {
		const KIND: OperationKind = OperationKind::SanctionedContent;

		obs::observe(&self.telemetry, KIND, "get_sanctioned_content", async move {
			let SanctionedContentRequest {
				url,
				max_price_micros,
				currency,
				license_type,
				license_id,
				format,
			} = request;
			let target = TargetUrl::parse(&url)?;
			let content = target.content_path();
			let token_request = ContentTokenRequest::new(
				target,
				self.token_api.user_agent(),
				max_price_micros,
				currency,
				license_type,
			)
			.with_license_id(license_id)
			.with_format(format);
			let token = self.token_api.get_content_token(&token_request).await?.into_access_token();

			self.content_api
				.get_content(token, &content)
				.await?
				.into_iter()
				.next()
				.ok_or_else(|| Error::parse("response is an empty list"))
		})
		.await
	}
}
#[cfg(feature = "reqwest")]
impl UseContentClient<ReqwestHttpClient> {
	/// Builds a client against the environment named by the process variables.
	pub fn new(
		secret_key: impl Into<String>,
		user_agent: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Ok(Self::with_environment(secret_key, user_agent, Environment::from_env()?))
	}

	/// Builds a client against an explicit environment.
	pub fn with_environment(
		secret_key: impl Into<String>,
		user_agent: impl Into<String>,
		env: Environment,
	) -> Self {
		Self::with_http_client(secret_key, user_agent, env, ReqwestHttpClient::default())
	}
}
impl<C> Clone for UseContentClient<C>
where
	C: ?Sized + GatewayHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			content_api: self.content_api.clone(),
			token_api: self.token_api.clone(),
			telemetry: self.telemetry.clone(),
		}
	}
}
impl<C> Debug for UseContentClient<C>
where
	C: ?Sized + GatewayHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UseContentClient")
			.field("content_api", &self.content_api)
			.field("token_api", &self.token_api)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_defaults_to_markdown_and_gateway_license() {
		let request = SanctionedContentRequest::new(
			"example.com/bar",
			1_000,
			Currency::USD,
			LicenseType::ON_DEMAND_LICENSE,
		);

		assert_eq!(request.format, ContentFormat::Markdown);
		assert_eq!(request.license_id, None);

		let request = request.with_license_id("lic_1").with_format(ContentFormat::Html);

		assert_eq!(request.license_id.as_deref(), Some("lic_1"));
		assert_eq!(request.format, ContentFormat::Html);
	}
}
