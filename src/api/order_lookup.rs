//! Look Up Order ID.
//!
//! `GET /inApps/v1/lookup/{orderId}` resolves a customer-facing order identifier
//! into its signed transaction envelopes.

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
	/// Looks up the transactions behind an order identifier.
	pub async fn look_up_order_id(&self, order_id: &str) -> Result<OrderLookupResponse> {
		let url = self.endpoint_url(api::ORDER_LOOKUP_PATH, order_id)?;
		let value = self.execute(CallKind::OrderLookup, Method::Get, url, None).await?;

		OrderLookupResponse::project(value)
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct OrderLookupWire {
	status: i64,
	signed_transactions: Vec<String>,
}

/// Typed projection of a Look Up Order ID response.
#[derive(Clone, Debug)]
pub struct OrderLookupResponse {
	raw: Value,
	/// Whether the order identifier was valid (0) or not (1).
	pub status: i64,
	/// Decoded transaction envelopes; undecodable items stay zero-valued.
	pub signed_transactions: Vec<TransactionPayload>,
}
impl OrderLookupResponse {
	fn project(raw: Value) -> Result<Self> {
		let wire: OrderLookupWire = request::project(&raw)?;
		let signed_transactions = wire
			.signed_transactions
			.iter()
			.map(|envelope| claims::decode_transaction_lossy(envelope))
			.collect();

		Ok(Self { raw, status: wire.status, signed_transactions })
	}

	/// Returns the generic response tree the typed fields were projected from.
	pub fn raw(&self) -> &Value {
		&self.raw
	}
}
