//! Remote error taxonomy documented by the App Store Server API.
//!
//! Every non-2xx response body is expected to carry `errorCode` + `errorMessage`.
//! Four codes are documented as transient and safe to retry; every other code,
//! including codes this crate has never seen, is terminal.

// self
use crate::_prelude::*;

/// Documented numeric error codes.
pub mod code {
	/// Account not found, transient variant.
	pub const ACCOUNT_NOT_FOUND_RETRYABLE: i64 = 4040002;
	/// App not found, transient variant.
	pub const APP_NOT_FOUND_RETRYABLE: i64 = 4040004;
	/// Unknown internal error, transient variant.
	pub const GENERAL_INTERNAL_RETRYABLE: i64 = 5000001;
	/// Original transaction identifier not found, transient variant.
	pub const ORIGINAL_TRANSACTION_ID_NOT_FOUND_RETRYABLE: i64 = 4040006;

	/// Account not found.
	pub const ACCOUNT_NOT_FOUND: i64 = 4040001;
	/// App not found.
	pub const APP_NOT_FOUND: i64 = 4040003;
	/// Unknown internal error.
	pub const GENERAL_INTERNAL: i64 = 5000000;
	/// Malformed request.
	pub const GENERAL_BAD_REQUEST: i64 = 4000000;
	/// App identifier in the request is invalid.
	pub const INVALID_APP_IDENTIFIER: i64 = 4000002;
	/// Extend-by-days value is out of range.
	pub const INVALID_EXTEND_BY_DAYS: i64 = 4000009;
	/// Extension reason code is invalid.
	pub const INVALID_EXTEND_REASON_CODE: i64 = 4000010;
	/// Original transaction identifier is invalid.
	pub const INVALID_ORIGINAL_TRANSACTION_ID: i64 = 4000008;
	/// Request identifier is invalid.
	pub const INVALID_REQUEST_IDENTIFIER: i64 = 4000011;
	/// Request revision is invalid.
	pub const INVALID_REQUEST_REVISION: i64 = 4000005;
	/// Original transaction identifier not found.
	pub const ORIGINAL_TRANSACTION_ID_NOT_FOUND: i64 = 4040005;
	/// Subscription state is ineligible for an extension.
	pub const SUBSCRIPTION_EXTENSION_INELIGIBLE: i64 = 4030004;
	/// Subscription already reached the maximum extension count.
	pub const SUBSCRIPTION_MAX_EXTENSION: i64 = 4030005;
}

const RETRYABLE_CODES: [i64; 4] = [
	code::ACCOUNT_NOT_FOUND_RETRYABLE,
	code::APP_NOT_FOUND_RETRYABLE,
	code::GENERAL_INTERNAL_RETRYABLE,
	code::ORIGINAL_TRANSACTION_ID_NOT_FOUND_RETRYABLE,
];

/// Error reported by the service in a non-2xx response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("Service error {code}: {message}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
	/// Numeric error code from the documented taxonomy.
	#[serde(rename = "errorCode")]
	pub code: i64,
	/// Human-readable message accompanying the code.
	#[serde(rename = "errorMessage", default)]
	pub message: String,
}
impl ApiError {
	/// Creates an error from a code + message pair.
	pub fn new(code: i64, message: impl Into<String>) -> Self {
		Self { code, message: message.into() }
	}

	/// Builds the documented error for a known code, if any.
	pub fn from_code(code: i64) -> Option<Self> {
		known_message(code).map(|message| Self::new(code, message))
	}

	/// Parses an error from a response body; `None` when the body is empty or does
	/// not carry the `errorCode` field.
	pub fn from_body(body: &[u8]) -> Option<Self> {
		if body.is_empty() {
			return None;
		}

		serde_json::from_slice(body).ok()
	}

	/// Whether the caller should re-issue the identical request.
	///
	/// Unknown codes default to terminal.
	pub fn is_retryable(&self) -> bool {
		RETRYABLE_CODES.contains(&self.code)
	}
}

fn known_message(code: i64) -> Option<&'static str> {
	Some(match code {
		code::ACCOUNT_NOT_FOUND_RETRYABLE => "Account not found. Please try again",
		code::APP_NOT_FOUND_RETRYABLE => "App not found. Please try again",
		code::GENERAL_INTERNAL_RETRYABLE => "An unknown error occurred. Please try again",
		code::ORIGINAL_TRANSACTION_ID_NOT_FOUND_RETRYABLE =>
			"Original transaction id not found. Please try again",
		code::ACCOUNT_NOT_FOUND => "Account not found",
		code::APP_NOT_FOUND => "App not found",
		code::GENERAL_INTERNAL => "An unknown error occurred",
		code::GENERAL_BAD_REQUEST => "Bad request",
		code::INVALID_APP_IDENTIFIER => "Invalid request app identifier",
		code::INVALID_EXTEND_BY_DAYS => "Invalid extend by days value",
		code::INVALID_EXTEND_REASON_CODE => "Invalid extend reason code",
		code::INVALID_ORIGINAL_TRANSACTION_ID => "Invalid original transaction id",
		code::INVALID_REQUEST_IDENTIFIER => "Invalid request identifier",
		code::INVALID_REQUEST_REVISION => "Invalid request revision",
		code::ORIGINAL_TRANSACTION_ID_NOT_FOUND => "Original transaction id not found",
		code::SUBSCRIPTION_EXTENSION_INELIGIBLE =>
			"Forbidden - subscription state ineligible for extension",
		code::SUBSCRIPTION_MAX_EXTENSION =>
			"Forbidden - subscription has reached maximum extension count",
		_ => return None,
	})
}
