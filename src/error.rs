//! Client-level error types shared across the gateway APIs and the facade.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical failure returned by every gateway operation.
///
/// The set is closed: transport outcomes, HTTP statuses, and body-level signals all land in
/// exactly one of these variants.
#[derive(Debug, ThisError)]
pub enum Error {
	/// API key or access token was rejected.
	#[error("Unauthorized: {message}.")]
	Unauthorized {
		/// Human-readable explanation.
		message: String,
	},
	/// Target path, host, or domain is malformed or not provisioned on the gateway.
	#[error("Bad request: {message}.")]
	BadRequest {
		/// Human-readable explanation.
		message: String,
	},
	/// Gateway fault, transport failure, or an unrecognized error string in a 200 body.
	#[error("Server error: {message}.")]
	Server {
		/// Human-readable explanation.
		message: String,
		/// HTTP status code, when the gateway answered.
		status: Option<u16>,
		/// Transport failure that caused this error, if any.
		#[source]
		source: Option<BoxError>,
	},
	/// A 200 response whose body does not match the expected shape.
	#[error("Failed to parse the gateway response: {message}.")]
	Parse {
		/// Human-readable explanation.
		message: String,
		/// Structured decoding failure, if any.
		#[source]
		source: Option<BoxError>,
	},
	/// Any HTTP status the taxonomy does not cover.
	#[error("Unknown error: {message}.")]
	Unknown {
		/// Human-readable explanation.
		message: String,
		/// HTTP status code returned by the gateway.
		status: u16,
	},
}
impl Error {
	/// Builds an [`Error::Unauthorized`].
	pub fn unauthorized(message: impl Into<String>) -> Self {
		Self::Unauthorized { message: message.into() }
	}

	/// Builds an [`Error::BadRequest`].
	pub fn bad_request(message: impl Into<String>) -> Self {
		Self::BadRequest { message: message.into() }
	}

	/// Builds an [`Error::Server`] without a status or transport source.
	pub fn server(message: impl Into<String>) -> Self {
		Self::Server { message: message.into(), status: None, source: None }
	}

	/// Builds an [`Error::Server`] caused by a transport failure.
	pub fn transport(message: impl Into<String>, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Server { message: message.into(), status: None, source: Some(Box::new(src)) }
	}

	/// Builds an [`Error::Parse`] without a structured source.
	pub fn parse(message: impl Into<String>) -> Self {
		Self::Parse { message: message.into(), source: None }
	}

	/// Returns the taxonomy kind of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Unauthorized { .. } => ErrorKind::Unauthorized,
			Self::BadRequest { .. } => ErrorKind::BadRequest,
			Self::Server { .. } => ErrorKind::ServerError,
			Self::Parse { .. } => ErrorKind::ParseError,
			Self::Unknown { .. } => ErrorKind::UnknownError,
		}
	}

	/// Returns the human-readable message without the kind prefix.
	pub fn message(&self) -> &str {
		match self {
			Self::Unauthorized { message }
			| Self::BadRequest { message }
			| Self::Server { message, .. }
			| Self::Parse { message, .. }
			| Self::Unknown { message, .. } => message,
		}
	}

	/// Returns the HTTP status code carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Server { status, .. } => *status,
			Self::Unknown { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Failure kinds ordered by precedence; lower variants win when several signals are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
	/// Credential or token rejected.
	Unauthorized,
	/// Malformed or unrecognized target.
	BadRequest,
	/// Remote or transport fault.
	ServerError,
	/// Body does not match the expected shape.
	ParseError,
	/// Status code outside the known set.
	UnknownError,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::Unauthorized => "unauthorized",
			ErrorKind::BadRequest => "bad_request",
			ErrorKind::ServerError => "server_error",
			ErrorKind::ParseError => "parse_error",
			ErrorKind::UnknownError => "unknown_error",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Configuration failures raised while building environments or clients.
///
/// Operations never return this type; it only appears at construction time.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Gateway base URL cannot be parsed.
	#[error("Gateway base URL `{value}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value that failed to parse.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Gateway base URL cannot carry a path.
	#[error("Gateway base URL `{value}` cannot be used as a base.")]
	OpaqueBaseUrl {
		/// Raw value that was rejected.
		value: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
