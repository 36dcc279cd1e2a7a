//! Request execution with bounded retry and error classification.
//!
//! One call to [`Client::execute`] maps to at most `try_count` HTTP attempts against
//! a single URL. The bearer token is fetched once up front (suspending on the token
//! cache's mutex if a refresh is in flight), so the network round trips themselves
//! never hold the token lock. Classification per attempt:
//!
//! - transport failure: record, consult the retry policy, try again;
//! - non-2xx with a parseable [`ApiError`]: retry when the code is in the
//!   documented transient set, otherwise surface immediately without consuming
//!   further budget;
//! - non-2xx without a recognizable error body: record the HTTP status and retry;
//! - 2xx: parse the body as generic JSON and return it.
//!
//! Exhausting the budget surfaces the last recorded error.

// crates.io
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	api::Client,
	error::DecodeError,
	http::{ApiRequest, ApiTransport, Method},
	obs::{self, CallKind, CallOutcome, CallSpan},
	remote::ApiError,
};

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Executes one endpoint call and returns the parsed generic response body.
	pub(crate) async fn execute(
		&self,
		kind: CallKind,
		method: Method,
		url: Url,
		body: Option<Vec<u8>>,
	) -> Result<Value> {
		let span = CallSpan::new(kind, "execute");

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span.instrument(self.execute_inner(method, url, body)).await;

		match &result {
			Ok(_) => {
				self.request_metrics.record_success();
				obs::record_call_outcome(kind, CallOutcome::Success);
			},
			Err(_) => {
				self.request_metrics.record_failure();
				obs::record_call_outcome(kind, CallOutcome::Failure);
			},
		}

		result
	}

	async fn execute_inner(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<Value> {
		let bearer = self.token_cache.bearer(&self.credentials).await?;
		let budget = self.credentials.effective_try_count();
		let mut last_error = None;

		for attempt in 0..budget {
			if attempt > 0 {
				self.retry_policy.pause(attempt).await;
				self.request_metrics.record_retry();
			}

			self.request_metrics.record_attempt();

			let request = ApiRequest {
				method,
				url: url.clone(),
				bearer: bearer.clone(),
				body: body.clone(),
			};
			let response = match self.transport.send(request).await {
				Ok(response) => response,
				Err(err) => {
					last_error = Some(Error::Transport(err));

					continue;
				},
			};

			if !response.is_success() {
				if let Some(api_error) = ApiError::from_body(&response.body) {
					if api_error.is_retryable() {
						last_error = Some(Error::Api(api_error));

						continue;
					}

					// Terminal remote error; no further budget is consumed.
					return Err(Error::Api(api_error));
				}

				last_error = Some(Error::UnexpectedStatus { status: response.status });

				continue;
			}

			return parse_body(&response.body);
		}

		Err(last_error.unwrap_or(Error::RequestFailed))
	}
}

/// Parses a successful response body as generic structured JSON.
///
/// Empty bodies (some mutating endpoints acknowledge with no payload) parse as
/// `null` rather than failing.
fn parse_body(body: &[u8]) -> Result<Value> {
	if body.is_empty() {
		return Ok(Value::Null);
	}

	Ok(serde_json::from_slice(body).map_err(|source| DecodeError::ResponseJson { source })?)
}

/// Projects the generic response tree into a typed wire shape.
///
/// This is the second phase of the two-phase decode: the executor parses the body
/// into a generic tree exactly once, and every endpoint projects from that tree so
/// optional/evolving fields degrade to their zero values instead of failing.
pub(crate) fn project<P>(value: &Value) -> Result<P, DecodeError>
where
	P: DeserializeOwned,
{
	serde_path_to_error::deserialize(value.clone())
		.map_err(|source| DecodeError::ResponseShape { source })
}
