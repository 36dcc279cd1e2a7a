//! Endpoint operations powered by the request executor.

pub mod consumption;
pub mod extend_renewal_date;
pub mod order_lookup;
pub mod refund_history;
pub mod subscription_statuses;
pub mod transaction_history;

mod metrics;
mod request;

pub use consumption::*;
pub use extend_renewal_date::*;
pub use metrics::RequestMetrics;
pub use order_lookup::*;
pub use refund_history::*;
pub use subscription_statuses::*;
pub use transaction_history::*;

// self
use crate::{
	_prelude::*,
	claims::TransactionPayload,
	config::Credentials,
	error::ConfigError,
	http::ApiTransport,
	retry::{ImmediateRetry, RetryPolicy},
	token::TokenCache,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

pub(crate) const SUBSCRIPTION_STATUSES_PATH: &str = "/inApps/v1/subscriptions/";
pub(crate) const ORDER_LOOKUP_PATH: &str = "/inApps/v1/lookup/";
pub(crate) const TRANSACTION_HISTORY_PATH: &str = "/inApps/v1/history/";
pub(crate) const REFUND_HISTORY_PATH: &str = "/inApps/v1/refund/lookup/";
pub(crate) const EXTEND_RENEWAL_DATE_PATH: &str = "/inApps/v1/subscriptions/extend/";
pub(crate) const CONSUMPTION_PATH: &str = "/inApps/v1/transactions/consumption/";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = Client<ReqwestTransport>;

/// Authenticated client for the App Store Server API.
///
/// The client owns the credentials, the token cache, and the transport reference so
/// individual endpoint operations can focus on URL + payload construction and the
/// projection of generic responses into typed shapes. One client instance caches
/// exactly one bearer token and may be shared across tasks behind `Arc`.
pub struct Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Transport used for every outbound request attempt.
	pub transport: Arc<T>,
	/// Signing credentials plus request policy knobs.
	pub credentials: Credentials,
	/// Delay policy consulted between retry attempts.
	pub retry_policy: Arc<dyn RetryPolicy>,
	/// Shared counters for executor attempts and outcomes.
	pub request_metrics: Arc<RequestMetrics>,
	pub(crate) token_cache: TokenCache,
	pub(crate) base_url: Url,
}
impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	///
	/// Fails with [`ConfigError::MissingField`] when any required credential field is
	/// empty.
	pub fn with_transport(credentials: Credentials, transport: impl Into<Arc<T>>) -> Result<Self> {
		credentials.validate()?;

		let base_url = Url::parse(credentials.environment.base_url())
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(Self {
			transport: transport.into(),
			credentials,
			retry_policy: Arc::new(ImmediateRetry),
			request_metrics: Default::default(),
			token_cache: TokenCache::default(),
			base_url,
		})
	}

	/// Overrides the base URL; intended for tests and forwarding proxies.
	pub fn with_base_url(mut self, base_url: Url) -> Self {
		self.base_url = base_url;

		self
	}

	/// Replaces the delay policy consulted between retry attempts.
	pub fn with_retry_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
		self.retry_policy = policy;

		self
	}

	pub(crate) fn endpoint_url(&self, path: &str, id: &str) -> Result<Url> {
		Ok(self
			.base_url
			.join(&format!("{path}{id}"))
			.map_err(|source| ConfigError::InvalidEndpoint { source })?)
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a new client with the crate's default reqwest-backed transport.
	pub fn new(credentials: Credentials) -> Result<Self> {
		Self::with_transport(credentials, ReqwestTransport::default())
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("credentials", &self.credentials)
			.field("base_url", &self.base_url.as_str())
			.finish()
	}
}

/// Stable-sorts decoded transactions by `web_order_line_item_id` in non-increasing
/// lexicographic order; items with equal identifiers keep their original order.
pub(crate) fn sort_by_line_item_descending(transactions: &mut [TransactionPayload]) {
	transactions.sort_by(|a, b| b.web_order_line_item_id.cmp(&a.web_order_line_item_id));
}
