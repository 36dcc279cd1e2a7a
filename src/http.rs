//! Transport primitives for signed API requests.
//!
//! [`ApiTransport`] is the client's only dependency on an HTTP stack: it receives a
//! fully described [`ApiRequest`] (method, URL, bearer, optional JSON body) and
//! resolves to the raw status + body pair of [`ApiResponse`]. Implementations must
//! be `Send + Sync + 'static` so one transport can back many concurrent calls.
//! The client configures no timeout of its own; cancellation and per-attempt
//! deadlines are pass-through capabilities of the transport (configure them on the
//! wrapped [`ReqwestClient`] when using the default stack).

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future resolved by transport implementations.
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// HTTP methods used by the versioned endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// Read-only endpoint.
	Get,
	/// Mutating endpoint with a JSON body.
	Put,
}
impl Method {
	/// Returns the wire representation of the method.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Put => "PUT",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One fully described outbound request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute endpoint URL.
	pub url: Url,
	/// Bearer token placed into the `Authorization` header.
	pub bearer: String,
	/// Serialized JSON body for `PUT` endpoints.
	pub body: Option<Vec<u8>>,
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes, possibly empty.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Whether the status is in the 2xx success range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports capable of executing signed API requests.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes one request attempt; retries are driven by the caller, never by the
	/// transport itself.
	fn send(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The wrapped client is passed through untouched; pools, proxies, and timeouts
/// configured on it apply to every attempt the executor issues.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Put => reqwest::Method::PUT,
			};
			let mut builder = client
				.request(method, request.url)
				.header(AUTHORIZATION, format!("Bearer {}", request.bearer));

			if let Some(body) = request.body {
				builder = builder.header(CONTENT_TYPE, "application/json").body(body);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}
