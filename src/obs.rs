//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `appstore_server_api.call` with the `call`
//!   (endpoint) and `stage` (call site) fields, plus warnings for swallowed envelope decode
//!   failures.
//! - Enable `metrics` to increment the `appstore_server_api_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Endpoint operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Get All Subscription Statuses.
	SubscriptionStatuses,
	/// Look Up Order ID.
	OrderLookup,
	/// Get Transaction History.
	TransactionHistory,
	/// Get Refund History.
	RefundHistory,
	/// Extend a Subscription Renewal Date.
	ExtendRenewalDate,
	/// Send Consumption Information.
	Consumption,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::SubscriptionStatuses => "subscription_statuses",
			CallKind::OrderLookup => "order_lookup",
			CallKind::TransactionHistory => "transaction_history",
			CallKind::RefundHistory => "refund_history",
			CallKind::ExtendRenewalDate => "extend_renewal_date",
			CallKind::Consumption => "consumption",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to an endpoint operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Logs a swallowed envelope decode failure (when tracing is enabled).
///
/// Batch response projections call this instead of propagating the error; the
/// corresponding field stays at its zero value.
pub(crate) fn log_decode_failure(context: &'static str, err: &crate::error::DecodeError) {
	#[cfg(feature = "tracing")]
	::tracing::warn!(context, error = %err, "Swallowing signed envelope decode failure.");

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (context, err);
	}
}
