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

#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

//! This library determines the eIDAS qualification level of electronic
//! signatures and assembles a per-document summary report of the validation
//! outcome.
//!
//! It sits downstream of cryptographic signature verification: the
//! conclusions of the basic and long-term validation passes, the certificate
//! attributes, and the trusted-list assertions are consumed through the
//! collaborator traits in this crate, reconciled per signature, classified,
//! and accumulated into a [`DocumentReport`]. A failure while processing one
//! signature degrades that signature's entry instead of suppressing the rest
//! of the document.
//!
//! # Example: building a report
//!
//! ```
//! use std::collections::HashMap;
//!
//! use eidas_report::{
//!     CertificateRecord, Indication, MapConclusions, QualifierSet, ReportAssembler,
//!     SignatureKind, SignatureRecord, StaticDiagnosticData, StaticPolicy, SystemTimeSource,
//!     TrustServiceEntry, ValidationConclusion, SERVICE_TYPE_CA_QC,
//! };
//! use eidas_status_tracker::StatusTracker;
//!
//! # fn main() -> eidas_report::Result<()> {
//! let diagnostic_data = StaticDiagnosticData {
//!     document_name: "contract.xml".to_string(),
//!     signatures: vec![SignatureRecord {
//!         id: "sig-1".to_string(),
//!         kind: SignatureKind::Primary,
//!         signing_time: None,
//!         format: "XAdES-BASELINE-B".to_string(),
//!         signer_certificate_id: Some("cert-1".to_string()),
//!         error_message: None,
//!         scopes: vec![],
//!     }],
//!     certificates: HashMap::from([(
//!         "cert-1".to_string(),
//!         CertificateRecord {
//!             attributes: Default::default(),
//!             trust_service: TrustServiceEntry {
//!                 service_type: SERVICE_TYPE_CA_QC.to_string(),
//!                 qualifiers: QualifierSet::default(),
//!             },
//!             display_name: "CN=Alice".to_string(),
//!         },
//!     )]),
//! };
//!
//! let conclusions = MapConclusions(HashMap::from([(
//!     "sig-1".to_string(),
//!     ValidationConclusion::new(Indication::Valid),
//! )]));
//!
//! let policy = StaticPolicy::new("QES policy", "Default validation policy");
//! let time_source = SystemTimeSource;
//!
//! let assembler = ReportAssembler::new(
//!     &policy,
//!     &diagnostic_data,
//!     &conclusions,
//!     &conclusions,
//!     &time_source,
//! );
//!
//! let mut validation_log = StatusTracker::default();
//! let report = assembler.assemble(&mut validation_log)?;
//!
//! assert_eq!(report.total_count(), 1);
//! assert_eq!(report.valid_count(), 1);
//! # Ok(())
//! # }
//! ```

mod assembler;
pub use assembler::ReportAssembler;

mod conclusion;
pub use conclusion::{Indication, Note, NoteKind, SubIndication, ValidationConclusion};

mod diagnostic;
pub use diagnostic::{
    CertificateRecord, ConclusionProvider, DiagnosticData, FixedTimeSource, MapConclusions,
    SignatureKind, SignatureRecord, SignatureScope, StaticDiagnosticData, StaticPolicy,
    SystemTimeSource, TimeSource, TrustServiceEntry, ValidationPolicy,
};

mod error;
pub use error::{Error, Result};

mod qualification;
pub use qualification::{
    CertificateAttributes, QualificationLevel, QualificationRules, TrustServiceAssertions,
};

mod reconcile;
pub use reconcile::{reconcile, NOTE_INVALID_NO_TIMESTAMP, NOTE_VALID_NO_TIMESTAMP};

mod report;
pub use report::{DocumentReport, SignatureReportEntry};

mod report_builder;
pub use report_builder::SignatureReportBuilder;

pub mod settings;

mod trust_service;
pub use trust_service::{
    QualifierSet, ServiceQualifier, QC_FOR_LEGAL_PERSON, QC_FOR_LEGAL_PERSON_LEGACY, QC_NO_SSCD,
    QC_NO_SSCD_LEGACY, QC_SSCD_STATUS_AS_IN_CERT, QC_SSCD_STATUS_AS_IN_CERT_LEGACY, QC_WITH_SSCD,
    QC_WITH_SSCD_LEGACY, SERVICE_TYPE_CA_QC,
};

/// The internal name of this SDK.
pub const NAME: &str = "eidas-report";
/// The version of this SDK.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
