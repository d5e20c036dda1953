// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Interfaces to the collaborators that feed the report build: the diagnostic
//! data extracted from the signed document, the conclusions of the two
//! upstream validation passes, the validation policy, and the clock.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    conclusion::ValidationConclusion,
    error::{Error, Result},
    qualification::{CertificateAttributes, QualificationRules, TrustServiceAssertions},
    trust_service::QualifierSet,
};

/// Whether a signature stands on its own or countersigns another one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SignatureKind {
    /// A signature over the document content.
    Primary,
    /// A signature over another signature.
    #[serde(rename_all = "camelCase")]
    Counter {
        /// Identifier of the countersigned signature.
        parent_id: String,
    },
}

impl SignatureKind {
    /// Returns the countersigned signature's id, if this is a counter
    /// signature.
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            SignatureKind::Primary => None,
            SignatureKind::Counter { parent_id } => Some(parent_id),
        }
    }
}

/// The portion of the document a signature covers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureScope {
    /// Name of the covered element or part.
    pub name: String,
    /// Human-readable description of the coverage.
    pub description: String,
}

/// One signature found in the document, as described by the diagnostic data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    /// Identifier of the signature, unique within the document.
    pub id: String,

    /// Primary or counter signature.
    #[serde(flatten)]
    pub kind: SignatureKind,

    /// The claimed signing time, if present in the signature.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signing_time: Option<DateTime<Utc>>,

    /// Signature format identifier (e.g. `XAdES-BASELINE-LT`).
    pub format: String,

    /// Identifier of the signing certificate, when it could be identified.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signer_certificate_id: Option<String>,

    /// Error message attached to the signature by upstream processing.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_message: Option<String>,

    /// The parts of the document this signature covers.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub scopes: Vec<SignatureScope>,
}

/// The trust-service entry covering a certificate's issuer: its service type
/// identifier and the qualifiers the trusted list asserts for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustServiceEntry {
    /// Trust-service type identifier.
    pub service_type: String,
    /// Qualifier URIs asserted for the service, in either spelling.
    pub qualifiers: QualifierSet,
}

impl TrustServiceEntry {
    /// Derives the boolean assertion flags used by the classifier.
    pub fn assertions(&self) -> TrustServiceAssertions {
        TrustServiceAssertions::from_service(&self.service_type, &self.qualifiers)
    }
}

/// Read-only view of the signed document produced by upstream parsing and
/// certificate processing.
pub trait DiagnosticData {
    /// Returns the signatures found in the document, in document order.
    fn signatures(&self) -> Result<Vec<SignatureRecord>>;

    /// Returns the self-asserted policy attributes of a certificate.
    fn certificate_attributes(&self, certificate_id: &str) -> Result<CertificateAttributes>;

    /// Returns the trust-service entry covering the certificate's issuer.
    fn trust_service(&self, certificate_id: &str) -> Result<TrustServiceEntry>;

    /// Returns the display name of the certificate subject.
    fn display_name(&self, certificate_id: &str) -> Result<String>;

    /// Returns the name of the validated document.
    fn document_name(&self) -> Result<String>;
}

/// Supplies the conclusion one upstream validation pass reached per
/// signature. The report build consumes two of these: one for the basic pass
/// and one for the long-term pass.
pub trait ConclusionProvider {
    /// Returns the conclusion for the given signature.
    fn conclusion_for(&self, signature_id: &str) -> Result<ValidationConclusion>;
}

/// The validation policy governing a report build.
pub trait ValidationPolicy {
    /// Returns the policy name.
    fn name(&self) -> Result<String>;

    /// Returns the policy description.
    fn description(&self) -> Result<String>;

    /// Returns the qualification decision table to classify signatures with.
    fn qualification_rules(&self) -> QualificationRules {
        QualificationRules::default()
    }
}

/// Supplies the report's validation-time field.
pub trait TimeSource {
    /// Returns the current time.
    fn current_time(&self) -> DateTime<Utc>;
}

/// [`TimeSource`] backed by the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// [`TimeSource`] returning a fixed instant; useful for reproducible reports
/// and tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedTimeSource(DateTime<Utc>);

impl FixedTimeSource {
    /// Creates a time source pinned to `time`.
    pub fn new(time: DateTime<Utc>) -> Self {
        Self(time)
    }
}

impl TimeSource for FixedTimeSource {
    fn current_time(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Everything the diagnostic data knows about one certificate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    /// Self-asserted policy attributes.
    pub attributes: CertificateAttributes,
    /// Trust-service entry covering the issuer.
    pub trust_service: TrustServiceEntry,
    /// Display name of the subject.
    pub display_name: String,
}

/// [`DiagnosticData`] held directly in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticDiagnosticData {
    /// Name of the validated document.
    pub document_name: String,
    /// Signatures in document order.
    pub signatures: Vec<SignatureRecord>,
    /// Certificates by id.
    pub certificates: HashMap<String, CertificateRecord>,
}

impl StaticDiagnosticData {
    fn certificate(&self, certificate_id: &str) -> Result<&CertificateRecord> {
        self.certificates
            .get(certificate_id)
            .ok_or_else(|| Error::CertificateNotFound {
                id: certificate_id.to_string(),
            })
    }
}

impl DiagnosticData for StaticDiagnosticData {
    fn signatures(&self) -> Result<Vec<SignatureRecord>> {
        Ok(self.signatures.clone())
    }

    fn certificate_attributes(&self, certificate_id: &str) -> Result<CertificateAttributes> {
        Ok(self.certificate(certificate_id)?.attributes)
    }

    fn trust_service(&self, certificate_id: &str) -> Result<TrustServiceEntry> {
        Ok(self.certificate(certificate_id)?.trust_service.clone())
    }

    fn display_name(&self, certificate_id: &str) -> Result<String> {
        Ok(self.certificate(certificate_id)?.display_name.clone())
    }

    fn document_name(&self) -> Result<String> {
        Ok(self.document_name.clone())
    }
}

/// [`ConclusionProvider`] backed by a map from signature id to conclusion.
#[derive(Clone, Debug, Default)]
pub struct MapConclusions(pub HashMap<String, ValidationConclusion>);

impl ConclusionProvider for MapConclusions {
    fn conclusion_for(&self, signature_id: &str) -> Result<ValidationConclusion> {
        self.0
            .get(signature_id)
            .cloned()
            .ok_or_else(|| Error::ConclusionMissing {
                signature_id: signature_id.to_string(),
            })
    }
}

/// [`ValidationPolicy`] with fixed metadata and rules.
#[derive(Clone, Debug)]
pub struct StaticPolicy {
    name: String,
    description: String,
    rules: QualificationRules,
}

impl StaticPolicy {
    /// Creates a policy with the default qualification rules.
    pub fn new<S: Into<String>, D: Into<String>>(name: S, description: D) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rules: QualificationRules::default(),
        }
    }

    /// Replaces the qualification rules.
    pub fn with_rules(mut self, rules: QualificationRules) -> Self {
        self.rules = rules;
        self
    }
}

impl ValidationPolicy for StaticPolicy {
    fn name(&self) -> Result<String> {
        Ok(self.name.clone())
    }

    fn description(&self) -> Result<String> {
        Ok(self.description.clone())
    }

    fn qualification_rules(&self) -> QualificationRules {
        self.rules.clone()
    }
}
