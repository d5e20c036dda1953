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

//! The per-document validation report and its per-signature entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    conclusion::{Indication, Note, SubIndication, ValidationConclusion},
    diagnostic::SignatureScope,
    error::Result,
    qualification::QualificationLevel,
};

/// The reported outcome for one signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureReportEntry {
    pub(crate) signature_id: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) parent_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) signing_time: Option<DateTime<Utc>>,

    pub(crate) signature_format: String,

    pub(crate) signed_by: String,

    pub(crate) conclusion: ValidationConclusion,

    pub(crate) qualification: QualificationLevel,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub(crate) scopes: Vec<SignatureScope>,
}

impl SignatureReportEntry {
    /// Returns the id of the reported signature.
    pub fn signature_id(&self) -> &str {
        &self.signature_id
    }

    /// Returns the id of the countersigned signature, if this entry reports
    /// a counter signature.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Returns the claimed signing time, if present.
    pub fn signing_time(&self) -> Option<DateTime<Utc>> {
        self.signing_time
    }

    /// Returns the signature format identifier.
    pub fn signature_format(&self) -> &str {
        &self.signature_format
    }

    /// Returns the display name of the signer.
    pub fn signed_by(&self) -> &str {
        &self.signed_by
    }

    /// Returns the reconciled conclusion for this signature.
    pub fn conclusion(&self) -> &ValidationConclusion {
        &self.conclusion
    }

    /// Returns the final indication for this signature.
    pub fn indication(&self) -> Indication {
        self.conclusion.indication()
    }

    /// Returns the final sub-indication for this signature, if any.
    pub fn sub_indication(&self) -> Option<SubIndication> {
        self.conclusion.sub_indication()
    }

    /// Returns the ordered notes attached to this entry.
    pub fn notes(&self) -> &[Note] {
        self.conclusion.notes()
    }

    /// Returns the qualification level determined for this signature.
    pub fn qualification(&self) -> QualificationLevel {
        self.qualification
    }

    /// Returns the parts of the document this signature covers.
    pub fn scopes(&self) -> &[SignatureScope] {
        &self.scopes
    }
}

/// The validation report for one document: one entry per signature, in
/// document order, plus the policy and timing metadata of the run.
///
/// Immutable once returned from the build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub(crate) policy_name: String,
    pub(crate) policy_description: String,
    pub(crate) validation_time: DateTime<Utc>,
    pub(crate) document_name: String,
    pub(crate) entries: Vec<SignatureReportEntry>,
    pub(crate) valid_count: usize,
    pub(crate) total_count: usize,
}

impl DocumentReport {
    /// Returns the name of the governing validation policy.
    pub fn policy_name(&self) -> &str {
        &self.policy_name
    }

    /// Returns the description of the governing validation policy.
    pub fn policy_description(&self) -> &str {
        &self.policy_description
    }

    /// Returns the time the validation ran.
    pub fn validation_time(&self) -> DateTime<Utc> {
        self.validation_time
    }

    /// Returns the name of the validated document.
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// Returns the per-signature entries, in document order.
    pub fn entries(&self) -> &[SignatureReportEntry] {
        &self.entries
    }

    /// Returns the number of signatures whose final indication is `VALID`.
    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    /// Returns the number of signatures processed, including those whose
    /// entries were degraded by a processing failure.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns `true` if every signature in the document is valid.
    pub fn is_fully_valid(&self) -> bool {
        self.valid_count == self.total_count
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for DocumentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::conclusion::NoteKind;

    fn sample_entry() -> SignatureReportEntry {
        SignatureReportEntry {
            signature_id: "sig-1".to_string(),
            parent_id: None,
            signing_time: None,
            signature_format: "XAdES-BASELINE-LT".to_string(),
            signed_by: "CN=Alice".to_string(),
            conclusion: ValidationConclusion::new(Indication::Valid)
                .with_note(Note::warning("self-signed timestamp authority")),
            qualification: QualificationLevel::QualifiedEsignature,
            scopes: vec![],
        }
    }

    fn sample_report() -> DocumentReport {
        DocumentReport {
            policy_name: "QES policy".to_string(),
            policy_description: "Validates qualified signatures".to_string(),
            validation_time: DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            document_name: "contract.xml".to_string(),
            entries: vec![sample_entry()],
            valid_count: 1,
            total_count: 1,
        }
    }

    #[test]
    fn report_wire_shape() {
        let report = sample_report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["policyName"], "QES policy");
        assert_eq!(json["documentName"], "contract.xml");
        assert_eq!(json["validCount"], 1);
        assert_eq!(json["totalCount"], 1);

        let entry = &json["entries"][0];
        assert_eq!(entry["signatureId"], "sig-1");
        assert_eq!(entry["signedBy"], "CN=Alice");
        assert_eq!(entry["qualification"], "QUALIFIED_ESIGNATURE");
        assert_eq!(entry["conclusion"]["indication"], "VALID");
        assert_eq!(entry["conclusion"]["notes"][0]["kind"], "WARNING");
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = sample_report();
        let json = report.to_json().unwrap();
        let parsed: DocumentReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn entry_accessors_delegate_to_conclusion() {
        let entry = sample_entry();
        assert_eq!(entry.indication(), Indication::Valid);
        assert_eq!(entry.sub_indication(), None);
        assert_eq!(entry.notes().len(), 1);
        assert_eq!(entry.notes()[0].kind(), NoteKind::Warning);
    }

    #[test]
    fn display_renders_json() {
        let report = sample_report();
        let text = report.to_string();
        assert!(text.contains("\"policyName\": \"QES policy\""));
    }
}
