//! Client-level error types shared across the token, transport, and API layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JwtError = jsonwebtoken::errors::Error;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; never retried.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Bearer token signing failure; fatal to the call that triggered it.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Transport failure (DNS, TCP, TLS); retried up to the configured budget.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Signed envelope or response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Error reported by the service itself, retryable or terminal by code.
	#[error(transparent)]
	Api(#[from] crate::remote::ApiError),

	/// Service responded with a status the client could not turn into an
	/// [`ApiError`](crate::remote::ApiError).
	#[error("Service responded with HTTP {status}.")]
	UnexpectedStatus {
		/// Raw HTTP status code of the rejected attempt.
		status: u16,
	},
	/// Retry budget was exhausted without recording a more specific error.
	#[error("Request failed after exhausting the retry budget.")]
	RequestFailed,
}

/// Configuration and validation failures raised during client construction.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required credential field was left empty.
	#[error("Required credential field `{field}` is empty.")]
	MissingField {
		/// Name of the offending field.
		field: &'static str,
	},
	/// Base URL for the target environment cannot be parsed.
	#[error("Base URL for the target environment is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint URL could not be joined onto the base URL.
	#[error("Endpoint URL could not be constructed.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	RequestBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}

/// Bearer token signing failures.
///
/// The service expects the PEM-encoded PKCS#8 P-256 private key downloaded from the
/// provider console; everything else is rejected before a single byte is signed.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Key material is not a PEM-encoded PKCS#8 document.
	#[error("Private key is not a PEM-encoded PKCS#8 document.")]
	MalformedKey {
		/// Underlying key parsing failure.
		#[source]
		source: JwtError,
	},
	/// Key parsed but is not a P-256 ECDSA key.
	#[error("Private key is not a P-256 ECDSA key.")]
	WrongKeyType {
		/// Underlying key parsing failure.
		#[source]
		source: JwtError,
	},
	/// The crypto provider rejected the signing operation itself.
	#[error("Bearer token signing failed.")]
	Crypto {
		/// Underlying signing failure.
		#[source]
		source: JwtError,
	},
}
impl SigningError {
	/// Classifies a key parsing failure into the signing taxonomy.
	pub(crate) fn from_key_error(source: JwtError) -> Self {
		use jsonwebtoken::errors::ErrorKind;

		match source.kind() {
			ErrorKind::InvalidEcdsaKey => Self::WrongKeyType { source },
			ErrorKind::InvalidKeyFormat => Self::MalformedKey { source },
			_ => Self::Crypto { source },
		}
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures while decoding signed envelopes or response bodies.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Envelope is not a three-segment compact JWS.
	#[error("Signed envelope is not a three-segment compact JWS.")]
	MalformedEnvelope,
	/// Claims segment is not valid base64url.
	#[error("Signed envelope claims segment is not valid base64url.")]
	MalformedClaims {
		/// Underlying base64 failure.
		#[source]
		source: base64::DecodeError,
	},
	/// Claims segment decoded but is not valid JSON.
	#[error("Signed envelope claims segment is not valid JSON.")]
	ClaimsJson {
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Claims segment parsed but did not contain a JSON object.
	#[error("Signed envelope claims are not a JSON object.")]
	ClaimsNotObject,
	/// Claim set parsed but did not match the typed projection.
	#[error("Claim set does not match the expected shape.")]
	ClaimsShape {
		/// Structured parsing failure pointing at the offending claim.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Successful response carried a body that is not valid JSON.
	#[error("Response body is not valid JSON.")]
	ResponseJson {
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response JSON parsed but did not match the typed projection.
	#[error("Response body does not match the expected shape.")]
	ResponseShape {
		/// Structured parsing failure pointing at the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
