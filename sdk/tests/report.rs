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

//! End-to-end report building scenarios.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use eidas_report::{
    CertificateAttributes, CertificateRecord, DiagnosticData, Error, FixedTimeSource, Indication,
    MapConclusions, NoteKind, QualificationLevel, QualifierSet, ReportAssembler, Result,
    SignatureKind, SignatureRecord, StaticDiagnosticData, StaticPolicy, SubIndication,
    TrustServiceEntry, ValidationConclusion, NOTE_VALID_NO_TIMESTAMP, QC_WITH_SSCD,
    SERVICE_TYPE_CA_QC,
};
use eidas_status_tracker::StatusTracker;

fn validation_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn signature(id: &str, certificate_id: &str) -> SignatureRecord {
    SignatureRecord {
        id: id.to_string(),
        kind: SignatureKind::Primary,
        signing_time: Some(validation_time()),
        format: "XAdES-BASELINE-LT".to_string(),
        signer_certificate_id: Some(certificate_id.to_string()),
        error_message: None,
        scopes: vec![],
    }
}

fn qualified_certificate(display_name: &str) -> CertificateRecord {
    CertificateRecord {
        attributes: CertificateAttributes {
            qcc: true,
            ..Default::default()
        },
        trust_service: TrustServiceEntry {
            service_type: SERVICE_TYPE_CA_QC.to_string(),
            qualifiers: QualifierSet::new([QC_WITH_SSCD]),
        },
        display_name: display_name.to_string(),
    }
}

fn valid() -> ValidationConclusion {
    ValidationConclusion::new(Indication::Valid)
}

fn no_timestamp() -> ValidationConclusion {
    ValidationConclusion::new(Indication::Indeterminate)
        .with_sub_indication(SubIndication::NoTimestamp)
}

/// Diagnostic data whose certificate lookups fail with an internal error.
struct FailingCertificates {
    inner: StaticDiagnosticData,
    failing_certificate_id: String,
}

impl DiagnosticData for FailingCertificates {
    fn signatures(&self) -> Result<Vec<SignatureRecord>> {
        self.inner.signatures()
    }

    fn certificate_attributes(&self, certificate_id: &str) -> Result<CertificateAttributes> {
        if certificate_id == self.failing_certificate_id {
            return Err(Error::OtherError("certificate store offline".into()));
        }
        self.inner.certificate_attributes(certificate_id)
    }

    fn trust_service(&self, certificate_id: &str) -> Result<TrustServiceEntry> {
        self.inner.trust_service(certificate_id)
    }

    fn display_name(&self, certificate_id: &str) -> Result<String> {
        self.inner.display_name(certificate_id)
    }

    fn document_name(&self) -> Result<String> {
        self.inner.document_name()
    }
}

#[test]
fn no_timestamp_fallback_keeps_document_valid() {
    // Three signatures; #2 has no qualifying timestamp but is valid at the
    // basic level, #1 and #3 are valid at the long-term level.
    let diagnostic_data = StaticDiagnosticData {
        document_name: "contract.xml".to_string(),
        signatures: vec![
            signature("sig-1", "cert-1"),
            signature("sig-2", "cert-1"),
            signature("sig-3", "cert-1"),
        ],
        certificates: HashMap::from([("cert-1".to_string(), qualified_certificate("CN=Alice"))]),
    };

    let basic = MapConclusions(HashMap::from([
        ("sig-1".to_string(), valid()),
        ("sig-2".to_string(), valid()),
        ("sig-3".to_string(), valid()),
    ]));
    let long_term = MapConclusions(HashMap::from([
        ("sig-1".to_string(), valid()),
        ("sig-2".to_string(), no_timestamp()),
        ("sig-3".to_string(), valid()),
    ]));

    let policy = StaticPolicy::new("QES policy", "Validates qualified signatures");
    let time_source = FixedTimeSource::new(validation_time());
    let assembler = ReportAssembler::new(
        &policy,
        &diagnostic_data,
        &basic,
        &long_term,
        &time_source,
    );

    let mut validation_log = StatusTracker::default();
    let report = assembler.assemble(&mut validation_log).unwrap();

    assert_eq!(report.total_count(), 3);
    assert_eq!(report.valid_count(), 3);
    assert!(report.is_fully_valid());

    // Entries come back in document order.
    let ids: Vec<&str> = report
        .entries()
        .iter()
        .map(|entry| entry.signature_id())
        .collect();
    assert_eq!(ids, vec!["sig-1", "sig-2", "sig-3"]);

    let entry = &report.entries()[1];
    assert_eq!(entry.indication(), Indication::Valid);
    assert!(entry
        .notes()
        .iter()
        .any(|note| note.text() == NOTE_VALID_NO_TIMESTAMP));

    // The other entries carry no such note.
    assert!(report.entries()[0].notes().is_empty());
    assert!(report.entries()[2].notes().is_empty());
}

#[test]
fn certificate_failure_degrades_single_entry() {
    let diagnostic_data = FailingCertificates {
        inner: StaticDiagnosticData {
            document_name: "contract.xml".to_string(),
            signatures: vec![signature("sig-1", "cert-1")],
            certificates: HashMap::from([(
                "cert-1".to_string(),
                qualified_certificate("CN=Alice"),
            )]),
        },
        failing_certificate_id: "cert-1".to_string(),
    };

    let conclusions = MapConclusions(HashMap::from([("sig-1".to_string(), valid())]));
    let policy = StaticPolicy::new("QES policy", "Validates qualified signatures");
    let time_source = FixedTimeSource::new(validation_time());
    let assembler = ReportAssembler::new(
        &policy,
        &diagnostic_data,
        &conclusions,
        &conclusions,
        &time_source,
    );

    let mut validation_log = StatusTracker::default();
    let report = assembler.assemble(&mut validation_log).unwrap();

    assert_eq!(report.total_count(), 1);
    assert_eq!(report.valid_count(), 0);

    let entry = &report.entries()[0];
    assert_eq!(entry.indication(), Indication::Indeterminate);
    assert_eq!(entry.sub_indication(), Some(SubIndication::UnexpectedError));
    assert_eq!(entry.qualification(), QualificationLevel::NotApplicable);
    assert_eq!(entry.signed_by(), "?");

    // The diagnostic note is present, non-empty, and names the cause.
    assert_eq!(entry.notes().len(), 1);
    let note = &entry.notes()[0];
    assert_eq!(note.kind(), NoteKind::Info);
    assert!(note.text().contains("certificate store offline"));

    // The failure was recorded once, attributed to the signature.
    assert_eq!(validation_log.filter_errors().count(), 1);
    assert_eq!(validation_log.items_for_signature("sig-1").count(), 1);
}

#[test]
fn one_failing_signature_does_not_disturb_the_rest() {
    let diagnostic_data = FailingCertificates {
        inner: StaticDiagnosticData {
            document_name: "contract.xml".to_string(),
            signatures: vec![
                signature("sig-1", "cert-1"),
                signature("sig-2", "cert-2"),
                signature("sig-3", "cert-1"),
            ],
            certificates: HashMap::from([(
                "cert-1".to_string(),
                qualified_certificate("CN=Alice"),
            )]),
        },
        failing_certificate_id: "cert-2".to_string(),
    };

    let conclusions = MapConclusions(HashMap::from([
        ("sig-1".to_string(), valid()),
        ("sig-2".to_string(), valid()),
        ("sig-3".to_string(), valid()),
    ]));
    let policy = StaticPolicy::new("QES policy", "Validates qualified signatures");
    let time_source = FixedTimeSource::new(validation_time());
    let assembler = ReportAssembler::new(
        &policy,
        &diagnostic_data,
        &conclusions,
        &conclusions,
        &time_source,
    );

    let mut validation_log = StatusTracker::default();
    let report = assembler.assemble(&mut validation_log).unwrap();

    assert_eq!(report.total_count(), 3);
    assert_eq!(report.valid_count(), 2);

    assert_eq!(report.entries()[0].indication(), Indication::Valid);
    assert_eq!(
        report.entries()[0].qualification(),
        QualificationLevel::QualifiedEsignature
    );
    assert_eq!(
        report.entries()[1].indication(),
        Indication::Indeterminate
    );
    assert_eq!(report.entries()[2].indication(), Indication::Valid);
    assert_eq!(report.entries()[2].signed_by(), "CN=Alice");
}

#[test]
fn missing_conclusion_aborts_and_is_logged_once() {
    let diagnostic_data = StaticDiagnosticData {
        document_name: "contract.xml".to_string(),
        signatures: vec![signature("sig-1", "cert-1")],
        certificates: HashMap::from([("cert-1".to_string(), qualified_certificate("CN=Alice"))]),
    };

    // No conclusions at all: the first lookup is a missing-input failure.
    let conclusions = MapConclusions::default();
    let policy = StaticPolicy::new("QES policy", "Validates qualified signatures");
    let time_source = FixedTimeSource::new(validation_time());
    let assembler = ReportAssembler::new(
        &policy,
        &diagnostic_data,
        &conclusions,
        &conclusions,
        &time_source,
    );

    let mut validation_log = StatusTracker::default();
    let err = assembler.assemble(&mut validation_log).unwrap_err();

    assert!(matches!(err, Error::ConclusionMissing { .. }));

    // Exactly one failure record: the document-level boundary logged it, and
    // no inner record exists for it to duplicate.
    assert_eq!(validation_log.filter_errors().count(), 1);
    assert_eq!(validation_log.items_for_signature("document").count(), 1);
}

#[test]
fn counter_signature_and_error_message_flow_into_the_entry() {
    let mut counter = signature("sig-2", "cert-1");
    counter.kind = SignatureKind::Counter {
        parent_id: "sig-1".to_string(),
    };
    counter.error_message = Some("decoding recovered & resumed".to_string());

    let diagnostic_data = StaticDiagnosticData {
        document_name: "contract.xml".to_string(),
        signatures: vec![signature("sig-1", "cert-1"), counter],
        certificates: HashMap::from([("cert-1".to_string(), qualified_certificate("CN=Alice"))]),
    };

    let conclusions = MapConclusions(HashMap::from([
        ("sig-1".to_string(), valid()),
        ("sig-2".to_string(), valid()),
    ]));
    let policy = StaticPolicy::new("QES policy", "Validates qualified signatures");
    let time_source = FixedTimeSource::new(validation_time());
    let assembler = ReportAssembler::new(
        &policy,
        &diagnostic_data,
        &conclusions,
        &conclusions,
        &time_source,
    );

    let mut validation_log = StatusTracker::default();
    let report = assembler.assemble(&mut validation_log).unwrap();

    let entry = &report.entries()[1];
    assert_eq!(entry.parent_id(), Some("sig-1"));
    assert_eq!(entry.notes().len(), 1);
    assert_eq!(
        entry.notes()[0].text(),
        "decoding recovered &amp; resumed"
    );
}

#[test]
fn assemble_json_renders_the_document_format() {
    let diagnostic_data = StaticDiagnosticData {
        document_name: "contract.xml".to_string(),
        signatures: vec![signature("sig-1", "cert-1")],
        certificates: HashMap::from([("cert-1".to_string(), qualified_certificate("CN=Alice"))]),
    };

    let conclusions = MapConclusions(HashMap::from([("sig-1".to_string(), valid())]));
    let policy = StaticPolicy::new("QES policy", "Validates qualified signatures");
    let time_source = FixedTimeSource::new(validation_time());
    let assembler = ReportAssembler::new(
        &policy,
        &diagnostic_data,
        &conclusions,
        &conclusions,
        &time_source,
    );

    let mut validation_log = StatusTracker::default();
    let json = assembler.assemble_json(&mut validation_log).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["policyName"], "QES policy");
    assert_eq!(value["documentName"], "contract.xml");
    assert_eq!(value["validationTime"], "2025-06-01T12:00:00Z");
    assert_eq!(value["entries"][0]["signatureId"], "sig-1");
    assert_eq!(value["entries"][0]["qualification"], "QUALIFIED_ESIGNATURE");
    assert_eq!(value["validCount"], 1);
    assert_eq!(value["totalCount"], 1);
}
