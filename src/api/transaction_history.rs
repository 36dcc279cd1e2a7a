//! Get Transaction History.
//!
//! `GET /inApps/v1/history/{transactionId}` returns a revision cursor plus a batch
//! of signed transaction envelopes; each envelope is decoded best-effort into
//! [`TransactionPayload`].

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	api::{self, Client, request},
	claims::{self, TransactionPayload},
	http::{ApiTransport, Method},
	obs::CallKind,
};

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches the transaction history for a transaction identifier.
	///
	/// When `descending` is set the decoded transactions are stable-sorted by
	/// `web_order_line_item_id` in non-increasing lexicographic order.
	pub async fn get_transaction_history(
		&self,
		transaction_id: &str,
		descending: bool,
	) -> Result<HistoryResponse> {
		let url = self.endpoint_url(api::TRANSACTION_HISTORY_PATH, transaction_id)?;
		let value = self.execute(CallKind::TransactionHistory, Method::Get, url, None).await?;

		HistoryResponse::project(value, descending)
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HistoryWire {
	revision: String,
	bundle_id: String,
	app_apple_id: i64,
	environment: String,
	has_more: bool,
	signed_transactions: Vec<String>,
}

/// Typed projection of a Get Transaction History response.
#[derive(Clone, Debug)]
pub struct HistoryResponse {
	raw: Value,
	/// Revision cursor to request the next batch with.
	pub revision: String,
	/// Bundle identifier the history belongs to.
	pub bundle_id: String,
	/// Numeric app identifier.
	pub app_apple_id: i64,
	/// Environment the response was produced in.
	pub environment: String,
	/// Whether more batches are available under the revision cursor.
	pub has_more: bool,
	/// Decoded transaction envelopes; undecodable items stay zero-valued.
	pub signed_transactions: Vec<TransactionPayload>,
}
impl HistoryResponse {
	fn project(raw: Value, descending: bool) -> Result<Self> {
		let wire: HistoryWire = request::project(&raw)?;
		let mut signed_transactions = wire
			.signed_transactions
			.iter()
			.map(|envelope| claims::decode_transaction_lossy(envelope))
			.collect::<Vec<_>>();

		if descending {
			api::sort_by_line_item_descending(&mut signed_transactions);
		}

		Ok(Self {
			raw,
			revision: wire.revision,
			bundle_id: wire.bundle_id,
			app_apple_id: wire.app_apple_id,
			environment: wire.environment,
			has_more: wire.has_more,
			signed_transactions,
		})
	}

	/// Returns the generic response tree the typed fields were projected from.
	pub fn raw(&self) -> &Value {
		&self.raw
	}
}
