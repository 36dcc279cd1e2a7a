//! Send Consumption Information.
//!
//! `PUT /inApps/v1/transactions/consumption/{originalTransactionId}` reports how a
//! consumable purchase under refund review was used. The service acknowledges
//! without a meaningful payload, so the operation returns no response object.

// self
use crate::{
	_prelude::*,
	api::{self, Client},
	error::ConfigError,
	http::{ApiTransport, Method},
	obs::CallKind,
};

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Sends consumption information for the transaction the identifier addresses.
	pub async fn send_consumption_information(
		&self,
		transaction_id: &str,
		request: ConsumptionRequest,
	) -> Result<()> {
		let url = self.endpoint_url(api::CONSUMPTION_PATH, transaction_id)?;
		let body = serde_json::to_vec(&request)
			.map_err(|source| ConfigError::RequestBody { source })?;

		self.execute(CallKind::Consumption, Method::Put, url, Some(body)).await?;

		Ok(())
	}
}

/// Request body of Send Consumption Information.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRequest {
	/// Age of the customer's account.
	pub account_tenure: u8,
	/// UUID the app associated with the purchasing account.
	pub app_account_token: String,
	/// How much of the purchase was consumed.
	pub consumption_status: u8,
	/// Whether the customer consented to sending this data.
	pub customer_consented: bool,
	/// Whether the app delivered a working purchase.
	pub delivery_status: u8,
	/// Lifetime spend bucket of the customer.
	pub lifetime_dollars_purchased: u8,
	/// Lifetime refund bucket of the customer.
	pub lifetime_dollars_refunded: u8,
	/// Platform the purchase happened on.
	pub platform: u8,
	/// Engagement-time bucket of the customer.
	pub play_time: u8,
	/// Whether the app provided sample content before purchase.
	pub sample_content_provided: bool,
	/// Account status of the customer.
	pub user_status: u8,
}
