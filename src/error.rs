//! Gateway-level error types shared across the limiter, transport, and submission path.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical gateway error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, deadline).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The registry answered with a non-acceptance status.
	#[error("Registry rejected the submission with HTTP status {status}.")]
	Rejected {
		/// HTTP status code returned by the registry.
		status: u16,
	},
	/// The wait for a submission slot ended before a permit was granted.
	#[error("Submission was interrupted while waiting for a rate limit permit.")]
	Interrupted,
}
impl Error {
	/// Returns the rejection status code when the registry refused the submission.
	pub fn rejected_status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status } => Some(*status),
			_ => None,
		}
	}

	/// Returns `true` when the failure is transient and the caller may retry the submission.
	///
	/// Configuration failures are permanent; every other variant leaves the gateway usable
	/// and the submission retryable under the caller's own policy.
	pub fn is_retryable(&self) -> bool {
		!matches!(self, Self::Config(_))
	}
}

/// Configuration and validation failures raised while assembling a gateway.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Submission pacing requires a positive permit budget.
	#[error("Request limit must be greater than zero.")]
	NonPositiveLimit,
	/// Submission pacing requires a non-zero window.
	#[error("Window duration must be greater than zero.")]
	ZeroWindow,
	/// Bearer credentials must carry at least one non-whitespace character.
	#[error("Credential token must not be empty.")]
	EmptyCredential,
	/// Document payload could not be encoded as JSON.
	#[error("Document payload could not be encoded.")]
	EncodePayload {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<serde_json::Error> for ConfigError {
	fn from(e: serde_json::Error) -> Self {
		Self::EncodePayload { source: e }
	}
}

/// Transport-level failures (network, IO, deadlines).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The transport's connect or call deadline elapsed.
	#[error("Transport deadline elapsed while calling the registry.")]
	Timeout,
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the registry.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the registry.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() {
			Self::Timeout
		} else {
			Self::network(e)
		}
	}
}
