//! Observability helpers for gateway operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to emit spans named `tollbit_client.operation` with the
//!   `operation` and `stage` fields, nested under the [`Telemetry`] span injected into each API,
//!   plus debug/error events for requests and failures.
//! - Enable `metrics` to increment the `tollbit_client_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation`, `outcome`, and `error_kind`, and to record
//!   finished-operation latency in `tollbit_client_operation_duration_seconds`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// std
use std::time::Instant;
// self
use crate::{_prelude::*, error::ErrorKind};

/// Gateway operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Rate lookup for a content path.
	RateLookup,
	/// Content ("subdomain access") token issuance.
	ContentToken,
	/// Crawl token issuance.
	CrawlToken,
	/// Content fetch with an access token.
	ContentFetch,
	/// Facade call composing token issuance and content fetch.
	SanctionedContent,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::RateLookup => "rate_lookup",
			OperationKind::ContentToken => "content_token",
			OperationKind::CrawlToken => "crawl_token",
			OperationKind::ContentFetch => "content_fetch",
			OperationKind::SanctionedContent => "sanctioned_content",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller, tagged with its taxonomy kind.
	Failure(ErrorKind),
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure(_) => "failure",
		}
	}

	/// Error kind label; `none` unless the operation failed.
	pub const fn error_kind(self) -> &'static str {
		match self {
			OperationOutcome::Failure(kind) => kind.as_str(),
			_ => "none",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside an operation span and records attempt/success/failure and latency around it.
pub(crate) async fn observe<T, Fut>(
	telemetry: &Telemetry,
	kind: OperationKind,
	stage: &'static str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = telemetry.operation(kind, stage);
	let started = Instant::now();

	record_operation_outcome(kind, OperationOutcome::Attempt);

	let result = span.instrument(fut).await;
	let outcome = match &result {
		Ok(_) => OperationOutcome::Success,
		Err(e) => {
			operation_failed(kind, e);

			OperationOutcome::Failure(e.kind())
		},
	};

	record_operation_outcome(kind, outcome);
	record_operation_duration(kind, outcome, started.elapsed());

	result
}
