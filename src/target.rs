//! Normalization of caller-supplied URLs into gateway targets.
//!
//! Callers may pass `https://example.com/bar?x=1`, `example.com/bar`, or anything in
//! between. [`TargetUrl`] pins the scheme to `http`/`https` (defaulting to `https`) and drops
//! credentials, query, and fragment; [`ContentPath`] is the scheme-less `host[:port]/path`
//! key both gateway content endpoints are addressed by.

// self
use crate::_prelude::*;

const DEFAULT_SCHEME: &str = "https";

/// Absolute target URL with an explicit `http`/`https` scheme and no query or fragment.
///
/// The path is kept as the caller wrote it: `https://example.com` stays without a trailing
/// slash and `https://example.com/` keeps it, both here and in [`TargetUrl::content_path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetUrl {
	url: String,
	content_path: ContentPath,
}
impl TargetUrl {
	/// Normalizes a caller URL.
	///
	/// Missing or non-HTTP schemes become `https`. Input without a usable host is rejected as
	/// [`Error::BadRequest`].
	pub fn parse(raw: &str) -> Result<Self> {
		let raw = raw.trim();

		if raw.is_empty() {
			return Err(Error::bad_request("target URL is empty"));
		}

		let (candidate, parsed) = match Url::parse(raw) {
			Ok(url) if url.has_host() => (Cow::Borrowed(raw), url),
			// `example.com/bar` and `localhost:8080/bar` carry no scheme separator.
			Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) if !raw.contains("://") => {
				let candidate = format!("{DEFAULT_SCHEME}://{raw}");
				let url = Url::parse(&candidate).map_err(|e| {
					Error::bad_request(format!("target URL `{raw}` cannot be parsed: {e}"))
				})?;

				(Cow::Owned(candidate), url)
			},
			Ok(_) => return Err(Error::bad_request(format!("target URL `{raw}` has no host"))),
			Err(e) =>
				return Err(Error::bad_request(format!("target URL `{raw}` cannot be parsed: {e}"))),
		};
		let host = parsed
			.host_str()
			.filter(|host| !host.is_empty())
			.ok_or_else(|| Error::bad_request(format!("target URL `{raw}` has no host")))?;
		let scheme = match parsed.scheme() {
			scheme @ ("http" | "https") => scheme,
			_ => DEFAULT_SCHEME,
		};
		let port = parsed.port().map(|port| format!(":{port}")).unwrap_or_default();
		let content_path = format!("{host}{port}{}", caller_path(&candidate));

		Ok(Self { url: format!("{scheme}://{content_path}"), content_path: ContentPath(content_path) })
	}

	/// Returns the scheme-less content path for this target.
	pub fn content_path(&self) -> ContentPath {
		self.content_path.clone()
	}

	/// Returns the normalized URL as a string.
	pub fn as_str(&self) -> &str {
		&self.url
	}
}
impl Display for TargetUrl {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl Serialize for TargetUrl {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

/// Scheme-less `host[:port]/path` key used by the rate and content endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentPath(String);
impl ContentPath {
	/// Normalizes a caller URL and keeps only its host and path.
	pub fn parse(raw: &str) -> Result<Self> {
		TargetUrl::parse(raw).map(|target| target.content_path())
	}

	/// Returns the path string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ContentPath {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl Display for ContentPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

// Path segment of `url` as written, without query or fragment.
fn caller_path(url: &str) -> &str {
	let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
	let path = rest.find(['/', '?', '#']).map_or("", |i| &rest[i..]);

	path.find(['?', '#']).map_or(path, |i| &path[..i])
}
