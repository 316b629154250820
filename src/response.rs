//! Response classification shared by every gateway operation.
//!
//! A transport outcome is either a response (status + body) or a transport error. The
//! classifier walks [`STATUS_RULES`] top-down; the first rule whose predicate accepts the
//! status decides the outcome, and statuses no rule accepts are [`Error::Unknown`]. Only a
//! `200` proceeds to body decoding.

// self
use crate::{
	_prelude::*,
	error::BoxError,
	http::GatewayResponse,
	obs::{self, OperationKind},
};

/// Message attached to every transport failure.
pub const CONNECT_FAILURE_MESSAGE: &str = "unable to connect to the server";

const INVALID_CONTENT_TOKEN_MARKER: &str = "error parsing content token";

/// Outcome class of an HTTP status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
	/// `200`; the body is decoded.
	Success,
	/// `401`.
	Unauthorized,
	/// `400`.
	BadRequest,
	/// `500..=599`.
	ServerError,
	/// Anything else.
	Unknown,
}

/// Ordered `(predicate, class)` decision table; first match wins.
pub const STATUS_RULES: [(fn(u16) -> bool, StatusClass); 4] = [
	(is_ok, StatusClass::Success),
	(is_unauthorized, StatusClass::Unauthorized),
	(is_bad_request, StatusClass::BadRequest),
	(is_server_error, StatusClass::ServerError),
];

fn is_ok(status: u16) -> bool {
	status == 200
}

fn is_unauthorized(status: u16) -> bool {
	status == 401
}

fn is_bad_request(status: u16) -> bool {
	status == 400
}

fn is_server_error(status: u16) -> bool {
	(500..=599).contains(&status)
}

/// Looks `status` up in [`STATUS_RULES`].
pub fn status_class(status: u16) -> StatusClass {
	STATUS_RULES
		.iter()
		.find(|(matches, _)| matches(status))
		.map(|(_, class)| *class)
		.unwrap_or(StatusClass::Unknown)
}

/// Resolves a transport outcome to the body of a `200` response or a typed failure.
pub fn classify_status<E>(
	kind: OperationKind,
	outcome: std::result::Result<GatewayResponse, E>,
) -> Result<Vec<u8>>
where
	E: 'static + Send + Sync + StdError,
{
	let response = match outcome {
		Ok(response) => response,
		Err(e) => {
			obs::transport_failed(kind, &e);

			return Err(Error::transport(CONNECT_FAILURE_MESSAGE, e));
		},
	};
	let status = response.status;
	let class = status_class(status);

	if class != StatusClass::Success {
		obs::http_error(kind, &response);
	}

	match class {
		StatusClass::Success => Ok(response.body),
		StatusClass::Unauthorized => Err(Error::unauthorized(match kind {
			OperationKind::ContentFetch => "invalid or expired access token",
			_ => "invalid API key",
		})),
		StatusClass::BadRequest => Err(Error::bad_request(match kind {
			OperationKind::ContentToken | OperationKind::CrawlToken =>
				"check your request details; most likely an invalid domain",
			_ => "check your request; most likely the content path is invalid or unknown",
		})),
		StatusClass::ServerError => Err(Error::Server {
			message: format!("an error occurred on the gateway servers: {status}"),
			status: Some(status),
			source: None,
		}),
		StatusClass::Unknown =>
			Err(Error::Unknown { message: format!("an unknown error occurred: {status}"), status }),
	}
}

/// Classifies a transport outcome and decodes a `200` body as `T`.
pub fn classify_response<T, E>(
	kind: OperationKind,
	outcome: std::result::Result<GatewayResponse, E>,
) -> Result<T>
where
	T: DeserializeOwned,
	E: 'static + Send + Sync + StdError,
{
	let body = classify_status(kind, outcome)?;

	decode(kind, &body)
}

/// Decodes a JSON body; mismatches become [`Error::Parse`] naming the failing path.
pub fn decode<T>(kind: OperationKind, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let deserializer = &mut serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(deserializer).map_err(|e| {
		let message = format!("response does not match the expected shape at `{}`", e.path());

		obs::body_rejected(kind, &message);

		Error::Parse { message, source: Some(Box::new(e) as BoxError) }
	})
}

/// Maps an error string found in a `200` content body to a typed failure.
///
/// Token signature, expiry, and format problems surface as prose containing
/// `error parsing content token`; those are [`Error::Unauthorized`], everything else is
/// [`Error::Server`].
pub fn classify_body_error(message: &str) -> Error {
	let lowered = message.to_lowercase();

	if lowered.contains(INVALID_CONTENT_TOKEN_MARKER) {
		Error::unauthorized(format!("invalid access token: {lowered}"))
	} else {
		Error::server(format!("an error occurred on the gateway servers: {message}"))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ErrorKind;

	#[derive(Debug, ThisError)]
	#[error("connection refused")]
	struct Refused;

	fn respond(status: u16, body: &str) -> std::result::Result<GatewayResponse, Refused> {
		Ok(GatewayResponse::new(status, body))
	}

	fn kind_for(status: u16) -> ErrorKind {
		classify_response::<serde_json::Value, _>(OperationKind::RateLookup, respond(status, "oops"))
			.expect_err("Non-200 statuses should fail.")
			.kind()
	}

	#[test]
	fn known_statuses_map_to_their_kinds() {
		for (status, expected) in [
			(401, ErrorKind::Unauthorized),
			(400, ErrorKind::BadRequest),
			(500, ErrorKind::ServerError),
			(503, ErrorKind::ServerError),
			(599, ErrorKind::ServerError),
		] {
			assert_eq!(kind_for(status), expected, "status {status}");
		}
	}

	#[test]
	fn other_statuses_are_unknown() {
		for status in [100, 201, 204, 301, 403, 404, 418, 429, 499, 600] {
			assert_eq!(kind_for(status), ErrorKind::UnknownError, "status {status}");
		}
	}

	#[test]
	fn status_messages_carry_the_code() {
		let err =
			classify_status(OperationKind::ContentFetch, respond(503, "down")).expect_err("503");

		assert_eq!(err.status(), Some(503));
		assert!(err.message().contains("503"));

		let err =
			classify_status(OperationKind::ContentFetch, respond(418, "teapot")).expect_err("418");

		assert_eq!(err.status(), Some(418));
		assert!(err.message().contains("418"));
	}

	#[test]
	fn transport_failure_is_server_error() {
		let err = classify_status(OperationKind::ContentToken, Err::<GatewayResponse, _>(Refused))
			.expect_err("Transport failures should fail.");

		assert_eq!(err.kind(), ErrorKind::ServerError);
		assert_eq!(err.message(), CONNECT_FAILURE_MESSAGE);
		assert_eq!(err.status(), None);
	}

	#[test]
	fn ok_bodies_decode_or_fail_to_parse() {
		let value: Vec<u32> = classify_response(OperationKind::RateLookup, respond(200, "[1,2,3]"))
			.expect("Valid body should decode.");

		assert_eq!(value, [1, 2, 3]);

		let empty: Vec<u32> = classify_response(OperationKind::RateLookup, respond(200, "[]"))
			.expect("Empty list should decode.");

		assert!(empty.is_empty());

		let err = classify_response::<Vec<u32>, _>(
			OperationKind::RateLookup,
			respond(200, "{\"not\":\"a list\"}"),
		)
		.expect_err("Wrong container should fail.");

		assert_eq!(err.kind(), ErrorKind::ParseError);

		let err = classify_response::<Vec<u32>, _>(OperationKind::RateLookup, respond(200, ""))
			.expect_err("Empty body should fail.");

		assert_eq!(err.kind(), ErrorKind::ParseError);
	}

	#[test]
	fn status_table_has_no_overlap() {
		for status in 0..=999 {
			let hits = STATUS_RULES.iter().filter(|(matches, _)| matches(status)).count();

			assert!(hits <= 1, "status {status} matched {hits} rules");
		}
	}

	#[test]
	fn body_error_sniffing_is_case_insensitive() {
		let err = classify_body_error(
			"Error Parsing Content Token: could not parse jwt: token signature is invalid",
		);

		assert_eq!(err.kind(), ErrorKind::Unauthorized);

		let err = classify_body_error("upstream publisher timed out");

		assert_eq!(err.kind(), ErrorKind::ServerError);
		assert!(err.message().contains("upstream publisher timed out"));
	}
}
