//! Decoding of the signed envelopes embedded in API responses.
//!
//! Responses carry nested compact JWS strings whose claim sets describe
//! transactions and renewal state. The channel itself is authenticated, so this
//! module deliberately reads the middle segment without checking the signature or
//! expiry: split, base64url-decode, parse into a generic claim map, then project
//! the map into a typed shape. Every typed field is optional; absence leaves the
//! zero value.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, error::DecodeError};

/// Generic claim set: claim name to arbitrary JSON value.
pub type ClaimMap = Map<String, Value>;

/// Extracts the claim set of a compact JWS envelope without verifying it.
pub fn decode_claims(envelope: &str) -> Result<ClaimMap, DecodeError> {
	let mut segments = envelope.split('.');
	let (Some(_header), Some(claims), Some(_signature), None) =
		(segments.next(), segments.next(), segments.next(), segments.next())
	else {
		return Err(DecodeError::MalformedEnvelope);
	};
	let bytes =
		URL_SAFE_NO_PAD.decode(claims).map_err(|source| DecodeError::MalformedClaims { source })?;

	match serde_json::from_slice(&bytes).map_err(|source| DecodeError::ClaimsJson { source })? {
		Value::Object(map) => Ok(map),
		_ => Err(DecodeError::ClaimsNotObject),
	}
}

/// Decodes an envelope into the typed transaction shape.
pub fn decode_transaction(envelope: &str) -> Result<TransactionPayload, DecodeError> {
	project_claims(decode_claims(envelope)?)
}

/// Decodes an envelope into the typed renewal-info shape.
pub fn decode_renewal_info(envelope: &str) -> Result<RenewalInfoPayload, DecodeError> {
	project_claims(decode_claims(envelope)?)
}

/// Best-effort decode used by batch response projections: failures are logged and
/// yield the zero-valued payload instead of aborting the surrounding response.
pub(crate) fn decode_transaction_lossy(envelope: &str) -> TransactionPayload {
	decode_transaction(envelope).unwrap_or_else(|err| {
		crate::obs::log_decode_failure("transaction", &err);

		TransactionPayload::default()
	})
}

/// Best-effort counterpart of [`decode_renewal_info`].
pub(crate) fn decode_renewal_info_lossy(envelope: &str) -> RenewalInfoPayload {
	decode_renewal_info(envelope).unwrap_or_else(|err| {
		crate::obs::log_decode_failure("renewal_info", &err);

		RenewalInfoPayload::default()
	})
}

fn project_claims<P>(claims: ClaimMap) -> Result<P, DecodeError>
where
	P: DeserializeOwned,
{
	serde_path_to_error::deserialize(Value::Object(claims))
		.map_err(|source| DecodeError::ClaimsShape { source })
}

/// Decoded claim set of a signed transaction envelope.
///
/// Unknown claims are dropped, missing claims stay at their zero value; the schema
/// is evolving on the service side and decoding must never fail on absence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionPayload {
	/// UUID the app optionally associates with the purchasing account.
	pub app_account_token: String,
	/// Bundle identifier of the app the transaction belongs to.
	pub bundle_id: String,
	/// Environment the transaction was produced in.
	pub environment: String,
	/// Subscription expiry, milliseconds since the epoch.
	pub expires_date: i64,
	/// Ownership relation (purchased vs family-shared).
	pub in_app_ownership_type: String,
	/// Whether the purchase was superseded by an upgrade.
	pub is_upgraded: bool,
	/// Identifier of a redeemed promotional offer, if any.
	pub offer_identifier: String,
	/// Promotional offer type.
	pub offer_type: i64,
	/// Purchase date of the original transaction, milliseconds since the epoch.
	pub original_purchase_date: i64,
	/// Identifier of the original transaction in the subscription chain.
	pub original_transaction_id: String,
	/// Product identifier of the purchased item.
	pub product_id: String,
	/// Purchase date, milliseconds since the epoch.
	pub purchase_date: i64,
	/// Number of consumables purchased.
	pub quantity: i64,
	/// Refund/revocation date, milliseconds since the epoch.
	pub revocation_date: i64,
	/// Reason the transaction was revoked.
	pub revocation_reason: i64,
	/// Instant the service signed the envelope, milliseconds since the epoch.
	pub signed_date: i64,
	/// Subscription group the product belongs to.
	pub subscription_group_identifier: String,
	/// Unique transaction identifier.
	pub transaction_id: String,
	/// Product type of the transaction.
	#[serde(rename = "type")]
	pub transaction_type: String,
	/// Identifier of the subscription billing event line item.
	pub web_order_line_item_id: String,
}

/// Decoded claim set of a signed renewal-info envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenewalInfoPayload {
	/// Product the subscription renews to.
	pub auto_renew_product_id: String,
	/// Whether auto-renew is enabled.
	pub auto_renew_status: i64,
	/// Environment the renewal info was produced in.
	pub environment: String,
	/// Reason a subscription expired.
	pub expiration_intent: i64,
	/// Grace period expiry, milliseconds since the epoch.
	pub grace_period_expires_date: i64,
	/// Whether the subscription is in the billing retry period.
	pub is_in_billing_retry_period: bool,
	/// Identifier of a redeemed promotional offer, if any.
	pub offer_identifier: String,
	/// Promotional offer type.
	pub offer_type: i64,
	/// Identifier of the original transaction in the subscription chain.
	pub original_transaction_id: String,
	/// Customer's response to a price increase.
	pub price_increase_status: i64,
	/// Product identifier of the auto-renewable subscription.
	pub product_id: String,
	/// Instant the service signed the envelope, milliseconds since the epoch.
	pub signed_date: i64,
}
