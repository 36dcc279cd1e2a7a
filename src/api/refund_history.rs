//! Get Refund History.
//!
//! `GET /inApps/v1/refund/lookup/{transactionId}` returns the signed transaction
//! envelopes of every refunded purchase addressed by the identifier.

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
	/// Fetches the refund history for a transaction identifier.
	///
	/// When `descending` is set the decoded transactions are stable-sorted by
	/// `web_order_line_item_id` in non-increasing lexicographic order.
	pub async fn get_refund_history(
		&self,
		transaction_id: &str,
		descending: bool,
	) -> Result<RefundLookupResponse> {
		let url = self.endpoint_url(api::REFUND_HISTORY_PATH, transaction_id)?;
		let value = self.execute(CallKind::RefundHistory, Method::Get, url, None).await?;

		RefundLookupResponse::project(value, descending)
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RefundLookupWire {
	signed_transactions: Vec<String>,
}

/// Typed projection of a Get Refund History response.
#[derive(Clone, Debug)]
pub struct RefundLookupResponse {
	raw: Value,
	/// Decoded refunded-transaction envelopes; undecodable items stay zero-valued.
	pub signed_transactions: Vec<TransactionPayload>,
}
impl RefundLookupResponse {
	fn project(raw: Value, descending: bool) -> Result<Self> {
		let wire: RefundLookupWire = request::project(&raw)?;
		let mut signed_transactions = wire
			.signed_transactions
			.iter()
			.map(|envelope| claims::decode_transaction_lossy(envelope))
			.collect::<Vec<_>>();

		if descending {
			api::sort_by_line_item_descending(&mut signed_transactions);
		}

		Ok(Self { raw, signed_transactions })
	}

	/// Returns the generic response tree the typed fields were projected from.
	pub fn raw(&self) -> &Value {
		&self.raw
	}
}
