//! Submission payload shapes for the registration API.
//!
//! The shapes mirror the registry's `documents/create` JSON contract field by field.
//! The gateway forwards them opaquely: no field content is validated here, and wire
//! names follow the registry's camelCase convention.

// self
use crate::{_prelude::*, error::ConfigError};

/// Marking document accepted by the registry's create endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	/// Participant description block, omitted from the wire when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<Description>,
	/// Registry-assigned document identifier.
	pub doc_id: String,
	/// Current document status.
	pub doc_status: String,
	/// Document type discriminator, e.g. `LP_INTRODUCE_GOODS`.
	pub doc_type: String,
	/// Marks documents describing imported goods.
	pub import_request: bool,
	/// Tax identifier of the goods owner.
	pub owner_inn: String,
	/// Tax identifier of the registry participant.
	pub participant_inn: String,
	/// Tax identifier of the producer.
	pub producer_inn: String,
	/// Production date, `YYYY-MM-DD`.
	pub production_date: String,
	/// Production type discriminator.
	pub production_type: String,
	/// Products covered by the document.
	pub products: Vec<Product>,
	/// Registration date, `YYYY-MM-DD`.
	pub reg_date: String,
	/// Registration number.
	pub reg_number: String,
}
impl Document {
	/// Encodes the document as the JSON bytes the registry expects.
	pub fn encode(&self) -> Result<Vec<u8>, ConfigError> {
		Ok(serde_json::to_vec(self)?)
	}
}

/// Participant description block nested inside a [`Document`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
	/// Tax identifier of the registry participant.
	pub participant_inn: String,
}

/// Product entry nested inside a [`Document`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
	/// Certificate document type, when the product carries one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub certificate_document: Option<String>,
	/// Certificate issue date, `YYYY-MM-DD`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub certificate_document_date: Option<String>,
	/// Certificate number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub certificate_document_number: Option<String>,
	/// Tax identifier of the goods owner.
	pub owner_inn: String,
	/// Tax identifier of the producer.
	pub producer_inn: String,
	/// Production date, `YYYY-MM-DD`.
	pub production_date: String,
	/// Commodity classification code.
	pub tnved_code: String,
	/// Unit identification code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uit_code: Option<String>,
	/// Unit transport packaging identification code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uitu_code: Option<String>,
}

/// Redacted bearer credential propagated to the registry with every submission.
///
/// The gateway never interprets the credential beyond forwarding it in the
/// `Authorization` header; it only requires the token to be non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialToken(String);
impl CredentialToken {
	/// Wraps a credential after checking it is non-empty.
	pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
		let value = value.into();

		if value.trim().is_empty() {
			return Err(ConfigError::EmptyCredential);
		}

		Ok(Self(value))
	}

	/// Returns the inner credential value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for CredentialToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for CredentialToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("CredentialToken").field(&"<redacted>").finish()
	}
}
impl Display for CredentialToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn introduce_goods_document() -> Document {
		Document {
			description: Some(Description { participant_inn: "7700000000".into() }),
			doc_id: "doc-42".into(),
			doc_status: "DRAFT".into(),
			doc_type: "LP_INTRODUCE_GOODS".into(),
			import_request: true,
			owner_inn: "7700000000".into(),
			participant_inn: "7700000000".into(),
			producer_inn: "7700000001".into(),
			production_date: "2020-01-23".into(),
			production_type: "OWN_PRODUCTION".into(),
			products: vec![Product {
				owner_inn: "7700000000".into(),
				producer_inn: "7700000001".into(),
				production_date: "2020-01-23".into(),
				tnved_code: "6401100000".into(),
				uit_code: Some("unit-1".into()),
				..Default::default()
			}],
			reg_date: "2020-01-23".into(),
			reg_number: "reg-42".into(),
		}
	}

	#[test]
	fn document_encodes_camel_case_wire_names() {
		let encoded = introduce_goods_document().encode().expect("Document should encode.");
		let value: serde_json::Value =
			serde_json::from_slice(&encoded).expect("Encoded document should parse back.");

		assert_eq!(value["docId"], "doc-42");
		assert_eq!(value["importRequest"], true);
		assert_eq!(value["description"]["participantInn"], "7700000000");
		assert_eq!(value["products"][0]["tnvedCode"], "6401100000");
		assert_eq!(value["products"][0]["uitCode"], "unit-1");
	}

	#[test]
	fn document_omits_absent_optional_fields() {
		let mut document = introduce_goods_document();

		document.description = None;

		let encoded = document.encode().expect("Document should encode.");
		let value: serde_json::Value =
			serde_json::from_slice(&encoded).expect("Encoded document should parse back.");

		assert!(value.get("description").is_none());
		assert!(value["products"][0].get("certificateDocument").is_none());
		assert!(value["products"][0].get("uituCode").is_none());
	}

	#[test]
	fn credential_rejects_empty_values() {
		assert!(matches!(CredentialToken::new(""), Err(ConfigError::EmptyCredential)));
		assert!(matches!(CredentialToken::new("   "), Err(ConfigError::EmptyCredential)));
	}

	#[test]
	fn credential_formatters_redact() {
		let credential =
			CredentialToken::new("super-secret").expect("Credential should be accepted.");

		assert_eq!(format!("{credential:?}"), "CredentialToken(\"<redacted>\")");
		assert_eq!(format!("{credential}"), "<redacted>");
		assert_eq!(credential.expose(), "super-secret");
	}
}
