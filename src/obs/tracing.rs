// self
use crate::{
	_prelude::*,
	http::{GatewayRequest, GatewayResponse},
	obs::OperationKind,
};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Logging handle injected into every API component.
///
/// Each handle owns a parent span; operation spans and events emitted by the component nest
/// under it, so callers decide where client logs land without any process-wide logger.
#[derive(Clone, Debug)]
pub struct Telemetry {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl Telemetry {
	/// Creates a handle whose parent span is tagged with `component`.
	pub fn new(component: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			Self { span: tracing::info_span!("tollbit_client", component) }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = component;

			Self {}
		}
	}

	/// Uses a caller-owned span as the parent of every operation span.
	#[cfg(feature = "tracing")]
	pub fn from_span(span: tracing::Span) -> Self {
		Self { span }
	}

	/// Creates a handle that records nothing.
	pub fn disabled() -> Self {
		#[cfg(feature = "tracing")]
		{
			Self { span: tracing::Span::none() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			Self {}
		}
	}

	/// Opens a child span for one operation.
	pub fn operation(&self, kind: OperationKind, stage: &'static str) -> OperationSpan {
		OperationSpan::new(self, kind, stage)
	}
}
impl Default for Telemetry {
	fn default() -> Self {
		Self::new("client")
	}
}

/// A span tagged with the operation kind and stage.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span under `parent`.
	pub fn new(parent: &Telemetry, kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				parent: &parent.span,
				"tollbit_client.operation",
				operation = kind.as_str(),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (parent, kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs an outbound request; secret headers are redacted by [`GatewayRequest`]'s `Debug`.
pub(crate) fn request_dispatched(request: &GatewayRequest) {
	#[cfg(feature = "tracing")]
	tracing::debug!(method = %request.method, url = %request.url, ?request, "Sending gateway request.");
	#[cfg(not(feature = "tracing"))]
	let _ = request;
}

/// Logs a non-200 response with a bounded body preview.
pub(crate) fn http_error(kind: OperationKind, response: &GatewayResponse) {
	#[cfg(feature = "tracing")]
	tracing::error!(
		operation = kind.as_str(),
		status = response.status,
		body = %preview(&response.text()),
		"Gateway returned an HTTP error."
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (kind, response);
}

/// Logs a transport failure before it is folded into a server error.
pub(crate) fn transport_failed(kind: OperationKind, error: &dyn StdError) {
	#[cfg(feature = "tracing")]
	tracing::error!(operation = kind.as_str(), error = %error, "Unable to reach the gateway.");
	#[cfg(not(feature = "tracing"))]
	let _ = (kind, error);
}

/// Logs a 200 body that carried an error string or an unexpected shape.
pub(crate) fn body_rejected(kind: OperationKind, reason: &str) {
	#[cfg(feature = "tracing")]
	tracing::error!(operation = kind.as_str(), reason = %preview(reason), "Gateway body rejected.");
	#[cfg(not(feature = "tracing"))]
	let _ = (kind, reason);
}

/// Logs the error an operation is about to return.
pub(crate) fn operation_failed(kind: OperationKind, error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::debug!(
		operation = kind.as_str(),
		error_kind = error.kind().as_str(),
		error = %error,
		"Gateway operation failed."
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (kind, error);
}

pub(crate) fn preview(body: &str) -> Cow<'_, str> {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return Cow::Borrowed(body);
	}

	let mut buf = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	Cow::Owned(buf)
}
