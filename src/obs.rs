//! Optional observability helpers for the submission path.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `docreg_gateway.submit` with the
//!   `stage` (call site) field.
//! - Enable `metrics` to increment the `docreg_gateway_submit_total` counter for every
//!   attempt/success/failure, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each submission attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmitOutcome {
	/// Entry to the submission path.
	Attempt,
	/// The registry accepted the submission.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl SubmitOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SubmitOutcome::Attempt => "attempt",
			SubmitOutcome::Success => "success",
			SubmitOutcome::Failure => "failure",
		}
	}
}
impl Display for SubmitOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
