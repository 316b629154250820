// std
use std::time::Duration;
// self
use crate::obs::{OperationKind, OperationOutcome};

/// Counts an operation outcome via the global metrics recorder (when enabled).
///
/// Failures are additionally labeled with their error kind, so rejected keys and gateway
/// outages stay distinguishable on one counter.
pub fn record_operation_outcome(kind: OperationKind, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"tollbit_client_operation_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str(),
			"error_kind" => outcome.error_kind()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records how long a finished operation took, in seconds.
pub fn record_operation_duration(kind: OperationKind, outcome: OperationOutcome, elapsed: Duration) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!(
			"tollbit_client_operation_duration_seconds",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.record(elapsed.as_secs_f64());
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome, elapsed);
	}
}
