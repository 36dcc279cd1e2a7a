//! Get All Subscription Statuses.
//!
//! `GET /inApps/v1/subscriptions/{transactionId}` returns one entry per
//! subscription group, each carrying the latest signed transaction and renewal-info
//! envelopes. Both nested envelopes are decoded best-effort: an undecodable
//! envelope leaves the corresponding field zero-valued instead of failing the
//! batch.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	api::{self, Client, request},
	claims::{self, RenewalInfoPayload, TransactionPayload},
	http::{ApiTransport, Method},
	obs::CallKind,
};

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches the status of every subscription the transaction identifier addresses.
	pub async fn get_all_subscription_statuses(
		&self,
		transaction_id: &str,
	) -> Result<StatusResponse> {
		let url = self.endpoint_url(api::SUBSCRIPTION_STATUSES_PATH, transaction_id)?;
		let value = self.execute(CallKind::SubscriptionStatuses, Method::Get, url, None).await?;

		StatusResponse::project(value)
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatusWire {
	environment: String,
	bundle_id: String,
	app_apple_id: i64,
	data: Vec<StatusDataWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatusDataWire {
	subscription_group_identifier: String,
	last_transactions: Vec<LastTransactionWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LastTransactionWire {
	original_transaction_id: String,
	status: i64,
	signed_transaction_info: String,
	signed_renewal_info: String,
}

/// Typed projection of a Get All Subscription Statuses response.
#[derive(Clone, Debug)]
pub struct StatusResponse {
	raw: Value,
	/// Environment the response was produced in.
	pub environment: String,
	/// Bundle identifier the subscriptions belong to.
	pub bundle_id: String,
	/// Numeric app identifier.
	pub app_apple_id: i64,
	/// One entry per subscription group.
	pub data: Vec<StatusData>,
}
impl StatusResponse {
	fn project(raw: Value) -> Result<Self> {
		let wire: StatusWire = request::project(&raw)?;
		let data = wire
			.data
			.into_iter()
			.map(|group| StatusData {
				subscription_group_identifier: group.subscription_group_identifier,
				last_transactions: group
					.last_transactions
					.into_iter()
					.map(|item| LastTransaction {
						original_transaction_id: item.original_transaction_id,
						status: item.status,
						signed_transaction_info: claims::decode_transaction_lossy(
							&item.signed_transaction_info,
						),
						signed_renewal_info: claims::decode_renewal_info_lossy(
							&item.signed_renewal_info,
						),
					})
					.collect(),
			})
			.collect();

		Ok(Self {
			raw,
			environment: wire.environment,
			bundle_id: wire.bundle_id,
			app_apple_id: wire.app_apple_id,
			data,
		})
	}

	/// Returns the generic response tree the typed fields were projected from.
	pub fn raw(&self) -> &Value {
		&self.raw
	}
}

/// Subscription statuses of one subscription group.
#[derive(Clone, Debug)]
pub struct StatusData {
	/// Subscription group the statuses belong to.
	pub subscription_group_identifier: String,
	/// Most recent transaction per subscription in the group.
	pub last_transactions: Vec<LastTransaction>,
}

/// Latest signed state of one subscription.
#[derive(Clone, Debug)]
pub struct LastTransaction {
	/// Identifier of the original transaction in the subscription chain.
	pub original_transaction_id: String,
	/// Subscription status code.
	pub status: i64,
	/// Decoded transaction envelope; zero-valued when undecodable.
	pub signed_transaction_info: TransactionPayload,
	/// Decoded renewal-info envelope; zero-valued when undecodable.
	pub signed_renewal_info: RenewalInfoPayload,
}
