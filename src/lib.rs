//! Rate-limited client gateway for document-registration APIs - fixed-window submission
//! pacing, typed outcomes, and transport-aware observability in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod document;
pub mod error;
pub mod gateway;
pub mod http;
pub mod limit;
pub mod obs;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		document::{CredentialToken, Description, Document, Product},
		gateway::SubmissionGateway,
		http::ReqwestTransport,
		limit::RateLimiter,
	};

	/// Gateway type alias used by reqwest-backed integration tests.
	pub type ReqwestTestGateway = SubmissionGateway<ReqwestTransport>;

	/// Builds a reqwest transport whose connect and call deadlines are both `deadline`, so
	/// failure-path tests finish quickly.
	pub fn test_reqwest_transport(deadline: Duration) -> ReqwestTransport {
		let client = ReqwestClient::builder()
			.connect_timeout(deadline)
			.timeout(deadline)
			.build()
			.expect("Failed to build Reqwest client for tests.");

		ReqwestTransport::with_client(client)
	}

	/// Constructs a [`SubmissionGateway`] over a fresh limiter and the reqwest transport used
	/// across integration tests.
	pub fn build_reqwest_test_gateway(
		endpoint: Url,
		limit: u32,
		window: Duration,
	) -> (ReqwestTestGateway, Arc<RateLimiter>) {
		let limiter =
			Arc::new(RateLimiter::new(limit, window).expect("Failed to build test rate limiter."));
		let transport = test_reqwest_transport(Duration::from_secs(5));
		let gateway = SubmissionGateway::with_transport(transport, limiter.clone(), endpoint);

		(gateway, limiter)
	}

	/// Introduce-goods document fixture shaped like the registry's JSON contract.
	pub fn sample_document() -> Document {
		Document {
			description: Some(Description { participant_inn: "7700000000".into() }),
			doc_id: "doc-0001".into(),
			doc_status: "DRAFT".into(),
			doc_type: "LP_INTRODUCE_GOODS".into(),
			import_request: false,
			owner_inn: "7700000000".into(),
			participant_inn: "7700000000".into(),
			producer_inn: "7700000001".into(),
			production_date: "2020-01-23".into(),
			production_type: "OWN_PRODUCTION".into(),
			products: vec![Product {
				certificate_document: None,
				certificate_document_date: None,
				certificate_document_number: None,
				owner_inn: "7700000000".into(),
				producer_inn: "7700000001".into(),
				production_date: "2020-01-23".into(),
				tnved_code: "6401100000".into(),
				uit_code: Some("010463003407001221SgCU4BrhN1".into()),
				uitu_code: None,
			}],
			reg_date: "2020-01-23".into(),
			reg_number: "reg-0001".into(),
		}
	}

	/// Bearer credential fixture.
	pub fn test_credential() -> CredentialToken {
		CredentialToken::new("test-signature").expect("Failed to build test credential.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use tokio::time::Instant;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use docreg_gateway as _;
#[cfg(all(test, feature = "reqwest"))] use httpmock as _;
