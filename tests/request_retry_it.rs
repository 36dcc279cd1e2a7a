//! Retry loop behavior exercised through a scripted transport.

mod support;

// std
use std::{
	collections::VecDeque,
	io::ErrorKind,
	sync::{
		Arc, Mutex,
		atomic::{AtomicU32, Ordering},
	},
};
// self
use appstore_server_api::{
	api::Client,
	error::{Error, TransportError},
	http::{ApiRequest, ApiResponse, ApiTransport, TransportFuture},
	remote::{ApiError, code},
	retry::RetryPolicy,
	time::Duration,
};

enum Step {
	Respond(u16, &'static str),
	ConnectionError,
}

/// Transport that replays a fixed script of attempt outcomes.
struct ScriptedTransport {
	calls: AtomicU32,
	script: Mutex<VecDeque<Step>>,
}
impl ScriptedTransport {
	fn new(script: impl IntoIterator<Item = Step>) -> Arc<Self> {
		Arc::new(Self {
			calls: AtomicU32::new(0),
			script: Mutex::new(script.into_iter().collect()),
		})
	}

	fn calls(&self) -> u32 {
		self.calls.load(Ordering::SeqCst)
	}
}
impl ApiTransport for ScriptedTransport {
	fn send(&self, _: ApiRequest) -> TransportFuture<'_> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let step = self
			.script
			.lock()
			.expect("Script lock should not be poisoned.")
			.pop_front()
			.expect("Transport called more often than the script allows.");

		Box::pin(async move {
			match step {
				Step::Respond(status, body) =>
					Ok(ApiResponse { status, body: body.as_bytes().to_vec() }),
				Step::ConnectionError => Err(TransportError::Io(std::io::Error::new(
					ErrorKind::ConnectionRefused,
					"connection refused",
				))),
			}
		})
	}
}

const RETRYABLE_BODY: &str =
	r#"{"errorCode":4040002,"errorMessage":"Account not found. Please try again"}"#;
const TERMINAL_BODY: &str = r#"{"errorCode":4000000,"errorMessage":"Bad request"}"#;
const LOOKUP_OK_BODY: &str = r#"{"status":0,"signedTransactions":[]}"#;

fn scripted_client(transport: Arc<ScriptedTransport>, try_count: u32) -> Client<ScriptedTransport> {
	Client::with_transport(support::credentials().with_try_count(try_count), transport)
		.expect("Scripted client should construct.")
}

#[tokio::test]
async fn transient_errors_are_retried_until_success() {
	let transport = ScriptedTransport::new([
		Step::Respond(404, RETRYABLE_BODY),
		Step::Respond(404, RETRYABLE_BODY),
		Step::Respond(200, LOOKUP_OK_BODY),
	]);
	let client = scripted_client(transport.clone(), 10);
	let response = client
		.look_up_order_id("MT000000")
		.await
		.expect("Two transient failures within budget should still succeed.");

	assert_eq!(response.status, 0);
	assert_eq!(transport.calls(), 3);
	assert_eq!(client.request_metrics.attempts(), 3);
	assert_eq!(client.request_metrics.retries(), 2);
	assert_eq!(client.request_metrics.successes(), 1);
}

#[tokio::test]
async fn exhausted_budget_surfaces_the_last_recorded_error() {
	let transport =
		ScriptedTransport::new([Step::Respond(404, RETRYABLE_BODY), Step::Respond(404, RETRYABLE_BODY)]);
	let client = scripted_client(transport.clone(), 2);
	let err = client
		.look_up_order_id("MT000000")
		.await
		.expect_err("A budget smaller than the failure streak should surface the error.");

	match err {
		Error::Api(api_err) => {
			assert_eq!(api_err, ApiError::new(code::ACCOUNT_NOT_FOUND_RETRYABLE, "Account not found. Please try again"));
			assert!(api_err.is_retryable());
		},
		other => panic!("Expected the recorded ApiError, got {other:?}."),
	}

	assert_eq!(transport.calls(), 2);
	assert_eq!(client.request_metrics.failures(), 1);
}

#[tokio::test]
async fn terminal_errors_short_circuit_without_consuming_budget() {
	let transport = ScriptedTransport::new([
		Step::Respond(400, TERMINAL_BODY),
		// Never reached; the terminal error must return immediately.
		Step::Respond(200, LOOKUP_OK_BODY),
	]);
	let client = scripted_client(transport.clone(), 10);
	let err = client
		.look_up_order_id("MT000000")
		.await
		.expect_err("A terminal error should surface immediately.");

	assert!(matches!(err, Error::Api(api_err) if api_err.code == code::GENERAL_BAD_REQUEST));
	assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn connection_errors_are_retried() {
	let transport =
		ScriptedTransport::new([Step::ConnectionError, Step::Respond(200, LOOKUP_OK_BODY)]);
	let client = scripted_client(transport.clone(), 10);

	client
		.look_up_order_id("MT000000")
		.await
		.expect("A connection error followed by success should succeed.");

	assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn unrecognized_error_bodies_record_the_http_status() {
	let transport = ScriptedTransport::new([
		Step::Respond(502, "<html>Bad Gateway</html>"),
		Step::Respond(502, "<html>Bad Gateway</html>"),
	]);
	let client = scripted_client(transport.clone(), 2);
	let err = client
		.look_up_order_id("MT000000")
		.await
		.expect_err("Unrecognized error bodies should exhaust the budget.");

	assert!(matches!(err, Error::UnexpectedStatus { status: 502 }));
	assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn retry_policy_schedule_applies_between_attempts() {
	/// Policy that only implements the schedule; pacing falls back to the default.
	struct SmallBackoff;
	impl RetryPolicy for SmallBackoff {
		fn next_delay(&self, _: u32) -> Option<Duration> {
			Some(Duration::milliseconds(40))
		}
	}

	let transport =
		ScriptedTransport::new([Step::Respond(404, RETRYABLE_BODY), Step::Respond(200, LOOKUP_OK_BODY)]);
	let client = scripted_client(transport.clone(), 10).with_retry_policy(Arc::new(SmallBackoff));
	let started = std::time::Instant::now();

	client
		.look_up_order_id("MT000000")
		.await
		.expect("One transient failure should retry after the scheduled delay.");

	assert!(started.elapsed() >= std::time::Duration::from_millis(40));
	assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn minimum_budget_is_one_attempt() {
	let transport = ScriptedTransport::new([Step::Respond(200, LOOKUP_OK_BODY)]);
	// A zero try count is clamped, so exactly one attempt happens.
	let client = scripted_client(transport.clone(), 0);

	client.look_up_order_id("MT000000").await.expect("Single attempt should succeed.");

	assert_eq!(transport.calls(), 1);
}
