//! Secrets, token-issuance requests, and token-issuance responses.

// self
use crate::{
	_prelude::*,
	model::{ContentFormat, Currency, LicenseType},
	target::TargetUrl,
};

/// Redacted bearer token scoped to one content path and its price constraints.
///
/// Only token issuance produces one, and a content fetch consumes it by value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a token string issued by the gateway.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Organization secret key sent with token-issuance requests.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);
impl ApiKey {
	/// Wraps a secret key.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner key. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApiKey").field(&"<redacted>").finish()
	}
}
impl Display for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Body of a content ("subdomain access") token request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTokenRequest {
	/// Target URL with an explicit `http`/`https` scheme and no query or fragment.
	pub url: TargetUrl,
	/// User agent the content will be fetched with.
	pub user_agent: String,
	/// Highest acceptable price in micro-units.
	pub max_price_micros: i64,
	/// Currency of the price ceiling.
	pub currency: Currency,
	/// Requested license type.
	pub license_type: LicenseType,
	/// License identifier; the empty string selects the gateway default.
	#[serde(rename = "licenseCuid")]
	pub license_id: String,
	/// Requested content format.
	pub format: ContentFormat,
}
impl ContentTokenRequest {
	/// Creates a request for the default license of `license_type`, in markdown.
	pub fn new(
		url: TargetUrl,
		user_agent: impl Into<String>,
		max_price_micros: i64,
		currency: Currency,
		license_type: LicenseType,
	) -> Self {
		Self {
			url,
			user_agent: user_agent.into(),
			max_price_micros,
			currency,
			license_type,
			license_id: String::new(),
			format: ContentFormat::default(),
		}
	}

	/// Selects a specific license; `None` keeps the gateway default.
	pub fn with_license_id(mut self, license_id: Option<String>) -> Self {
		self.license_id = license_id.unwrap_or_default();

		self
	}

	/// Overrides the requested format (defaults to markdown).
	pub fn with_format(mut self, format: ContentFormat) -> Self {
		self.format = format;

		self
	}
}

/// Body of a crawl token request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlTokenRequest {
	/// Site URL the crawl grant covers.
	pub url: TargetUrl,
	/// User agent the crawler identifies with.
	pub user_agent: String,
	/// Requested content format.
	pub format: ContentFormat,
}
impl CrawlTokenRequest {
	/// Creates a crawl request in markdown.
	pub fn new(url: TargetUrl, user_agent: impl Into<String>) -> Self {
		Self { url, user_agent: user_agent.into(), format: ContentFormat::default() }
	}

	/// Overrides the requested format (defaults to markdown).
	pub fn with_format(mut self, format: ContentFormat) -> Self {
		self.format = format;

		self
	}
}

/// Token-issuance response shared by the content and crawl grants.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
	token: String,
	#[serde(default)]
	format: Option<ContentFormat>,
}
impl TokenResponse {
	/// Format the token was issued for, when the gateway echoes it.
	pub fn format(&self) -> Option<ContentFormat> {
		self.format
	}

	/// Converts the response into the bearer token it carries.
	pub fn into_access_token(self) -> AccessToken {
		AccessToken::new(self.token)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let token = AccessToken::new("tok_123");
		let key = ApiKey::new("super-secret");

		assert_eq!(format!("{token:?}"), "AccessToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert_eq!(format!("{key:?}"), "ApiKey(\"<redacted>\")");
		assert_eq!(format!("{key}"), "<redacted>");
		assert_eq!(token.expose(), "tok_123");
	}

	#[test]
	fn content_request_uses_wire_names() {
		let url = TargetUrl::parse("example.com/bar").expect("Target should normalize.");
		let request = ContentTokenRequest::new(
			url,
			"test-agent",
			1_000_000,
			Currency::USD,
			LicenseType::ON_DEMAND_LICENSE,
		);

		assert_eq!(
			serde_json::to_value(&request).expect("Request should serialize."),
			serde_json::json!({
				"url": "https://example.com/bar",
				"userAgent": "test-agent",
				"maxPriceMicros": 1_000_000,
				"currency": "USD",
				"licenseType": "ON_DEMAND_LICENSE",
				"licenseCuid": "",
				"format": "markdown",
			})
		);
	}

	#[test]
	fn content_request_carries_license_id_and_format() {
		let url = TargetUrl::parse("https://example.com/bar").expect("Target should normalize.");
		let request = ContentTokenRequest::new(
			url,
			"test-agent",
			5,
			Currency::USD,
			LicenseType::CUSTOM_LICENSE,
		)
		.with_license_id(Some("lic-42".into()))
		.with_format(ContentFormat::Html);
		let body = serde_json::to_value(&request).expect("Request should serialize.");

		assert_eq!(body["licenseCuid"], "lic-42");
		assert_eq!(body["format"], "html");

		let body = serde_json::to_value(request.with_license_id(None))
			.expect("Request should serialize.");

		assert_eq!(body["licenseCuid"], "");
	}

	#[test]
	fn crawl_request_only_carries_url_agent_and_format() {
		let url = TargetUrl::parse("https://example.com").expect("Target should normalize.");
		let body = serde_json::to_value(CrawlTokenRequest::new(url, "crawler"))
			.expect("Request should serialize.");

		assert_eq!(
			body,
			serde_json::json!({
				"url": "https://example.com",
				"userAgent": "crawler",
				"format": "markdown",
			})
		);
	}

	#[test]
	fn token_response_tolerates_missing_format() {
		let response: TokenResponse = serde_json::from_str("{\"token\":\"TOKEN-ABC123\"}")
			.expect("Token response should decode.");

		assert_eq!(response.format(), None);
		assert_eq!(response.into_access_token().expose(), "TOKEN-ABC123");
	}
}
