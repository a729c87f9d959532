//! Transport primitives for registry submissions.
//!
//! The module exposes [`SubmissionTransport`] alongside [`SubmissionRequest`] and
//! [`TransportReply`] so downstream crates can integrate custom HTTP clients. The trait
//! is the gateway's only dependency on an HTTP stack: implementations own connection
//! pooling, TLS, and deadline enforcement, and report outcomes as a status signal the
//! gateway interprets.

// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`SubmissionTransport::dispatch`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TransportReply, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of delivering encoded submissions.
///
/// Callers provide an implementation (typically behind `Arc<T>` where
/// `T: SubmissionTransport`) and the gateway dispatches exactly one request per
/// submission that acquired a permit. Implementations must be `Send + Sync + 'static`
/// so a single transport can be shared by every concurrent caller.
pub trait SubmissionTransport
where
	Self: 'static + Send + Sync,
{
	/// Delivers one encoded submission and reports the registry's status signal.
	///
	/// Implementations enforce their own connect and call deadlines and surface an
	/// elapsed deadline as [`TransportError::Timeout`]; any other connectivity failure
	/// maps to [`TransportError::Network`].
	fn dispatch<'a>(&'a self, request: &'a SubmissionRequest) -> TransportFuture<'a>;
}

/// Wire-level submission handed to a [`SubmissionTransport`].
#[derive(Clone)]
pub struct SubmissionRequest {
	/// Target endpoint for the POST.
	pub endpoint: Url,
	/// JSON-encoded document payload.
	pub body: Vec<u8>,
	/// Bearer credential propagated via the `Authorization` header.
	pub bearer: String,
}
impl Debug for SubmissionRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SubmissionRequest")
			.field("endpoint", &self.endpoint.as_str())
			.field("body_len", &self.body.len())
			.field("bearer", &"<redacted>")
			.finish()
	}
}

/// Status signal captured from the registry's HTTP response.
#[derive(Clone, Debug, Default)]
pub struct TransportReply {
	/// HTTP status code returned by the registry.
	pub status: u16,
	/// Raw response body, when one was returned.
	pub body: Option<Vec<u8>>,
}
impl TransportReply {
	/// Returns `true` for acceptance statuses (the 2xx class).
	pub fn is_accepted(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Default connect deadline applied by [`ReqwestTransport::new`].
#[cfg(feature = "reqwest")]
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(5_000);
/// Default whole-call deadline applied by [`ReqwestTransport::new`].
#[cfg(feature = "reqwest")]
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// [`ReqwestTransport::new`] provisions a client with the default connect and call
/// deadlines; use [`ReqwestTransport::with_client`] to supply a caller-configured
/// client instead. The wrapped client must carry its own deadlines, because the
/// gateway relies on the transport to cut off stalled submissions.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport with the default connect and call deadlines.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.connect_timeout(DEFAULT_CONNECT_TIMEOUT)
			.timeout(DEFAULT_CALL_TIMEOUT)
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}

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
impl SubmissionTransport for ReqwestTransport {
	fn dispatch<'a>(&'a self, request: &'a SubmissionRequest) -> TransportFuture<'a> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.post(request.endpoint.clone())
				.header(CONTENT_TYPE, "application/json")
				.bearer_auth(&request.bearer)
				.body(request.body.clone())
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let bytes = response.bytes().await.map_err(TransportError::from)?;
			let body = if bytes.is_empty() { None } else { Some(bytes.to_vec()) };

			Ok(TransportReply { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn acceptance_covers_the_2xx_class() {
		assert!(!TransportReply { status: 199, body: None }.is_accepted());
		assert!(TransportReply { status: 200, body: None }.is_accepted());
		assert!(TransportReply { status: 299, body: None }.is_accepted());
		assert!(!TransportReply { status: 300, body: None }.is_accepted());
		assert!(!TransportReply { status: 503, body: None }.is_accepted());
	}

	#[test]
	fn request_debug_redacts_the_credential() {
		let request = SubmissionRequest {
			endpoint: Url::parse("https://registry.example.com/api/v3/lk/documents/create")
				.expect("Endpoint should parse."),
			body: b"{}".to_vec(),
			bearer: "super-secret".into(),
		};
		let rendered = format!("{request:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("super-secret"));
	}
}
