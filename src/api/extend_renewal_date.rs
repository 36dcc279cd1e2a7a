//! Extend a Subscription Renewal Date.
//!
//! `PUT /inApps/v1/subscriptions/extend/{originalTransactionId}` pushes a
//! subscription's next renewal out by up to 90 days.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	api::{self, Client, request},
	error::ConfigError,
	http::{ApiTransport, Method},
	obs::CallKind,
};

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Extends the renewal date of the subscription the transaction identifier
	/// addresses.
	pub async fn extend_subscription_renewal_date(
		&self,
		transaction_id: &str,
		request: ExtendRenewalDateRequest,
	) -> Result<ExtendRenewalDateResponse> {
		let url = self.endpoint_url(api::EXTEND_RENEWAL_DATE_PATH, transaction_id)?;
		let body = serde_json::to_vec(&request)
			.map_err(|source| ConfigError::RequestBody { source })?;
		let value =
			self.execute(CallKind::ExtendRenewalDate, Method::Put, url, Some(body)).await?;

		ExtendRenewalDateResponse::project(value)
	}
}

/// Request body of Extend a Subscription Renewal Date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendRenewalDateRequest {
	/// Days to extend the renewal date by; the service caps this at 90.
	pub extend_by_days: u8,
	/// Reason code for the extension.
	pub extend_reason_code: u8,
	/// Caller-supplied identifier deduplicating this extension request; at most 128
	/// characters.
	pub request_identifier: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ExtendRenewalDateWire {
	effective_date: i64,
	original_transaction_id: String,
	success: bool,
	web_order_line_item_id: String,
}

/// Typed projection of an Extend a Subscription Renewal Date response.
#[derive(Clone, Debug)]
pub struct ExtendRenewalDateResponse {
	raw: Value,
	/// New renewal date, milliseconds since the epoch.
	pub effective_date: i64,
	/// Identifier of the original transaction the extension applied to.
	pub original_transaction_id: String,
	/// Whether the extension succeeded.
	pub success: bool,
	/// Identifier of the affected billing event line item.
	pub web_order_line_item_id: String,
}
impl ExtendRenewalDateResponse {
	fn project(raw: Value) -> Result<Self> {
		let wire: ExtendRenewalDateWire = request::project(&raw)?;

		Ok(Self {
			raw,
			effective_date: wire.effective_date,
			original_transaction_id: wire.original_transaction_id,
			success: wire.success,
			web_order_line_item_id: wire.web_order_line_item_id,
		})
	}

	/// Returns the generic response tree the typed fields were projected from.
	pub fn raw(&self) -> &Value {
		&self.raw
	}
}
