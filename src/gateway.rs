//! Submission orchestration with acquire-before-send pacing guarantees.
//!
//! [`SubmissionGateway::submit`] encodes the document, takes a rate limit permit, and
//! dispatches exactly one transport call while the permit guard is live. The guard
//! drops on every exit path, so a rejected status, a transport fault, or a cancelled
//! call can never strand a slot; an interrupted wait never reaches the transport at
//! all.

// std
use std::borrow::Cow;
// self
use crate::{
	_prelude::*,
	document::{CredentialToken, Document},
	http::{SubmissionRequest, SubmissionTransport},
	limit::RateLimiter,
	obs::{self, SubmitOutcome, SubmitSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway = SubmissionGateway<ReqwestTransport>;

/// Client-side gateway that paces document submissions to a registration API.
///
/// The gateway owns shared handles to the transport and the rate limiter so every
/// concurrent caller funnels through the same pacing state. Credentials are passed per
/// call, never stored.
#[derive(Clone)]
pub struct SubmissionGateway<T>
where
	T: ?Sized + SubmissionTransport,
{
	transport: Arc<T>,
	limiter: Arc<RateLimiter>,
	endpoint: Url,
	patience: Option<Duration>,
}
impl<T> SubmissionGateway<T>
where
	T: ?Sized + SubmissionTransport,
{
	/// Creates a gateway that reuses the caller-provided transport and limiter.
	pub fn with_transport(
		transport: impl Into<Arc<T>>,
		limiter: Arc<RateLimiter>,
		endpoint: Url,
	) -> Self {
		Self { transport: transport.into(), limiter, endpoint, patience: None }
	}

	/// Caps how long [`submit`](Self::submit) waits for a permit.
	///
	/// Without a patience bound the wait only ends when capacity recurs or the caller
	/// drops the future; with one, an expired wait reports [`Error::Interrupted`]
	/// without invoking the transport.
	pub fn with_patience(mut self, patience: Duration) -> Self {
		self.patience = Some(patience);

		self
	}

	/// Shared limiter handle, e.g. for capacity diagnostics.
	pub fn limiter(&self) -> &Arc<RateLimiter> {
		&self.limiter
	}

	/// Target endpoint submissions are posted to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Submits one document under the configured pacing policy.
	///
	/// The permit is acquired before the transport is invoked and returned
	/// unconditionally afterwards, so the gateway stays usable whatever the outcome.
	pub async fn submit(
		&self,
		document: &Document,
		credential: &CredentialToken,
	) -> Result<SubmissionReceipt> {
		let span = SubmitSpan::new("submit");

		obs::record_submit_outcome(SubmitOutcome::Attempt);

		let result = span.instrument(self.submit_paced(document, credential)).await;

		match &result {
			Ok(_) => obs::record_submit_outcome(SubmitOutcome::Success),
			Err(_) => obs::record_submit_outcome(SubmitOutcome::Failure),
		}

		result
	}

	async fn submit_paced(
		&self,
		document: &Document,
		credential: &CredentialToken,
	) -> Result<SubmissionReceipt> {
		let body = document.encode()?;
		let request = SubmissionRequest {
			endpoint: self.endpoint.clone(),
			body,
			bearer: credential.expose().to_owned(),
		};
		// The guard spans the transport call and drops on every exit path below.
		let _permit = match self.patience {
			Some(patience) => tokio::time::timeout(patience, self.limiter.acquire())
				.await
				.map_err(|_| Error::Interrupted)?,
			None => self.limiter.acquire().await,
		};
		let reply = self.transport.dispatch(&request).await?;

		if reply.is_accepted() {
			Ok(SubmissionReceipt { status: reply.status, body: reply.body })
		} else {
			Err(Error::Rejected { status: reply.status })
		}
	}
}
#[cfg(feature = "reqwest")]
impl SubmissionGateway<ReqwestTransport> {
	/// Creates a gateway admitting `limit` submissions per `window` against `endpoint`.
	///
	/// The gateway provisions its own reqwest-backed transport with default deadlines,
	/// so callers do not need to pass HTTP handles explicitly. Construction fails fast
	/// on a zero `limit` or `window` before any transport resource is allocated.
	pub fn new(limit: u32, window: Duration, endpoint: Url) -> Result<Self> {
		let limiter = Arc::new(RateLimiter::new(limit, window)?);
		let transport = ReqwestTransport::new()?;

		Ok(Self::with_transport(transport, limiter, endpoint))
	}
}
impl<T> Debug for SubmissionGateway<T>
where
	T: ?Sized + SubmissionTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SubmissionGateway")
			.field("endpoint", &self.endpoint.as_str())
			.field("limit", &self.limiter.limit())
			.field("window", &self.limiter.window())
			.field("patience", &self.patience)
			.finish()
	}
}

/// Acceptance record returned for a successful submission.
#[derive(Clone, Debug)]
pub struct SubmissionReceipt {
	/// HTTP status code the registry accepted the submission with.
	pub status: u16,
	/// Raw response body, when the registry returned one.
	pub body: Option<Vec<u8>>,
}
impl SubmissionReceipt {
	/// Response body decoded as UTF-8 for diagnostics, when one was returned.
	pub fn body_text(&self) -> Option<Cow<'_, str>> {
		self.body.as_deref().map(String::from_utf8_lossy)
	}
}
