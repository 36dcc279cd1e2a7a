//! Endpoint operations exercised against a mock HTTP service.

mod support;

// crates.io
use httpmock::prelude::*;
use serde_json::json;

const BEARER_PATTERN: &str = r"^Bearer [A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$";

#[tokio::test]
async fn subscription_statuses_decode_nested_envelopes_best_effort() {
	let server = MockServer::start_async().await;
	let transaction_info = support::make_envelope(
		r#"{"transactionId":"10002","productId":"com.example.monthly","quantity":1}"#,
	);
	let renewal_info =
		support::make_envelope(r#"{"autoRenewProductId":"com.example.monthly","autoRenewStatus":1}"#);
	let body = json!({
		"environment": "Sandbox",
		"bundleId": "com.example.it",
		"appAppleId": 1234567,
		"data": [{
			"subscriptionGroupIdentifier": "group-1",
			"lastTransactions": [
				{
					"originalTransactionId": "10001",
					"status": 1,
					"signedTransactionInfo": transaction_info,
					"signedRenewalInfo": renewal_info,
				},
				{
					"originalTransactionId": "10003",
					"status": 2,
					"signedTransactionInfo": "not-an-envelope",
					"signedRenewalInfo": "not-an-envelope",
				},
			],
		}],
	});
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/inApps/v1/subscriptions/10002")
				.header_matches("authorization", BEARER_PATTERN);
			then.status(200)
				.header("content-type", "application/json")
				.body(body.to_string());
		})
		.await;
	let response = support::test_client(&server.base_url())
		.get_all_subscription_statuses("10002")
		.await
		.expect("Subscription statuses request should succeed.");

	assert_eq!(response.environment, "Sandbox");
	assert_eq!(response.bundle_id, "com.example.it");
	assert_eq!(response.app_apple_id, 1234567);
	assert_eq!(response.data.len(), 1);

	let group = &response.data[0];

	assert_eq!(group.subscription_group_identifier, "group-1");
	assert_eq!(group.last_transactions.len(), 2);

	let decoded = &group.last_transactions[0];

	assert_eq!(decoded.original_transaction_id, "10001");
	assert_eq!(decoded.status, 1);
	assert_eq!(decoded.signed_transaction_info.transaction_id, "10002");
	assert_eq!(decoded.signed_transaction_info.product_id, "com.example.monthly");
	assert_eq!(decoded.signed_renewal_info.auto_renew_status, 1);

	// The undecodable envelopes leave zero values without failing the batch.
	let swallowed = &group.last_transactions[1];

	assert_eq!(swallowed.original_transaction_id, "10003");
	assert_eq!(swallowed.signed_transaction_info.transaction_id, "");
	assert_eq!(swallowed.signed_renewal_info.auto_renew_product_id, "");

	mock.assert_async().await;
}

#[tokio::test]
async fn transaction_history_sorts_descending_on_request() {
	let server = MockServer::start_async().await;
	let envelopes = ["100", "300", "200"]
		.into_iter()
		.map(|id| {
			support::make_envelope(&format!(
				r#"{{"transactionId":"tx-{id}","webOrderLineItemId":"{id}"}}"#
			))
		})
		.collect::<Vec<_>>();
	let body = json!({
		"revision": "rev-1",
		"bundleId": "com.example.it",
		"appAppleId": 1234567,
		"environment": "Production",
		"hasMore": true,
		"signedTransactions": envelopes,
	});
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/inApps/v1/history/10002");
			then.status(200)
				.header("content-type", "application/json")
				.body(body.to_string());
		})
		.await;
	let client = support::test_client(&server.base_url());
	let ascending = client
		.get_transaction_history("10002", false)
		.await
		.expect("History request should succeed.");
	let descending = client
		.get_transaction_history("10002", true)
		.await
		.expect("History request should succeed.");

	assert_eq!(ascending.revision, "rev-1");
	assert!(ascending.has_more);
	assert_eq!(
		ascending.signed_transactions.iter().map(|t| t.web_order_line_item_id.as_str()).collect::<Vec<_>>(),
		["100", "300", "200"],
	);
	assert_eq!(
		descending.signed_transactions.iter().map(|t| t.web_order_line_item_id.as_str()).collect::<Vec<_>>(),
		["300", "200", "100"],
	);

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn order_lookup_decodes_signed_transactions() {
	let server = MockServer::start_async().await;
	let body = json!({
		"status": 0,
		"signedTransactions": [
			support::make_envelope(r#"{"transactionId":"abc","quantity":3}"#),
		],
	});
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/inApps/v1/lookup/MT00999");
			then.status(200)
				.header("content-type", "application/json")
				.body(body.to_string());
		})
		.await;
	let response = support::test_client(&server.base_url())
		.look_up_order_id("MT00999")
		.await
		.expect("Order lookup should succeed.");

	assert_eq!(response.status, 0);
	assert_eq!(response.signed_transactions.len(), 1);
	assert_eq!(response.signed_transactions[0].transaction_id, "abc");
	assert_eq!(response.signed_transactions[0].quantity, 3);
	// Raw tree stays available next to the typed projection.
	assert_eq!(response.raw()["status"], 0);

	mock.assert_async().await;
}

#[tokio::test]
async fn refund_history_tolerates_missing_fields() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/inApps/v1/refund/lookup/10002");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let response = support::test_client(&server.base_url())
		.get_refund_history("10002", true)
		.await
		.expect("An empty refund history should decode.");

	assert!(response.signed_transactions.is_empty());

	mock.assert_async().await;
}

#[tokio::test]
async fn extend_renewal_date_sends_the_json_body() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/inApps/v1/subscriptions/extend/10001")
				.header("content-type", "application/json")
				.body(r#"{"extendByDays":45,"extendReasonCode":1,"requestIdentifier":"req-7"}"#);
			then.status(200).header("content-type", "application/json").body(
				r#"{"effectiveDate":1698148900000,"originalTransactionId":"10001","success":true,"webOrderLineItemId":"20002"}"#,
			);
		})
		.await;
	let response = support::test_client(&server.base_url())
		.extend_subscription_renewal_date(
			"10001",
			appstore_server_api::api::ExtendRenewalDateRequest {
				extend_by_days: 45,
				extend_reason_code: 1,
				request_identifier: "req-7".into(),
			},
		)
		.await
		.expect("Renewal date extension should succeed.");

	assert_eq!(response.effective_date, 1698148900000);
	assert_eq!(response.original_transaction_id, "10001");
	assert!(response.success);
	assert_eq!(response.web_order_line_item_id, "20002");

	mock.assert_async().await;
}

#[tokio::test]
async fn consumption_information_accepts_an_empty_acknowledgement() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/inApps/v1/transactions/consumption/10001")
				.header("content-type", "application/json");
			then.status(202);
		})
		.await;

	support::test_client(&server.base_url())
		.send_consumption_information(
			"10001",
			appstore_server_api::api::ConsumptionRequest {
				account_tenure: 3,
				app_account_token: "c1a2".into(),
				consumption_status: 1,
				customer_consented: true,
				delivery_status: 0,
				lifetime_dollars_purchased: 4,
				lifetime_dollars_refunded: 1,
				platform: 1,
				play_time: 2,
				sample_content_provided: false,
				user_status: 1,
			},
		)
		.await
		.expect("Consumption report should be acknowledged.");

	mock.assert_async().await;
}

#[tokio::test]
async fn bearer_token_is_attached_and_reused_across_calls() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/inApps/v1/lookup/MT1")
				.header_matches("authorization", BEARER_PATTERN);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"status":0,"signedTransactions":[]}"#);
		})
		.await;
	let client = support::test_client(&server.base_url());

	client.look_up_order_id("MT1").await.expect("First call should succeed.");
	client.look_up_order_id("MT1").await.expect("Second call should succeed.");

	// Both calls matched the bearer pattern; the cached token is signed only once.
	mock.assert_calls_async(2).await;
}
