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

//! Builds the per-document report by driving reconciliation and
//! classification for every signature.

use eidas_status_tracker::{log_item, StatusTracker};
use log::{debug, error};

use crate::{
    conclusion::{Indication, Note, SubIndication, ValidationConclusion},
    diagnostic::{
        ConclusionProvider, DiagnosticData, SignatureRecord, TimeSource, ValidationPolicy,
    },
    error::{cause_summary, Error, Result},
    qualification::{QualificationLevel, QualificationRules, TrustServiceAssertions},
    reconcile::reconcile,
    report::{DocumentReport, SignatureReportEntry},
    settings::get_settings,
};

/// Drives conclusion aggregation and qualification classification for every
/// signature in a document and accumulates the results into a
/// [`DocumentReport`].
///
/// The builder holds no state across calls; every [`build`](Self::build)
/// invocation is independent.
pub struct SignatureReportBuilder<'a> {
    policy: &'a dyn ValidationPolicy,
    diagnostic_data: &'a dyn DiagnosticData,
    basic_validation: &'a dyn ConclusionProvider,
    long_term_validation: &'a dyn ConclusionProvider,
    time_source: &'a dyn TimeSource,
}

impl<'a> SignatureReportBuilder<'a> {
    /// Creates a builder over the document's collaborators.
    pub fn new(
        policy: &'a dyn ValidationPolicy,
        diagnostic_data: &'a dyn DiagnosticData,
        basic_validation: &'a dyn ConclusionProvider,
        long_term_validation: &'a dyn ConclusionProvider,
        time_source: &'a dyn TimeSource,
    ) -> Self {
        Self {
            policy,
            diagnostic_data,
            basic_validation,
            long_term_validation,
            time_source,
        }
    }

    /// Builds the report for every signature in the document, in document
    /// order.
    ///
    /// A failure while processing one signature degrades that signature's
    /// entry to `INDETERMINATE / UNEXPECTED_ERROR`, records the failure in
    /// `validation_log`, and does not disturb the remaining signatures. A
    /// missing conclusion, or an unavailable policy or document-level field,
    /// aborts the whole build instead (see [`Error::aborts_report`]).
    pub fn build(&self, validation_log: &mut StatusTracker) -> Result<DocumentReport> {
        let policy_name = self.policy.name()?;
        let policy_description = self.policy.description()?;
        let document_name = self.diagnostic_data.document_name()?;
        let validation_time = self.time_source.current_time();
        let rules = self.policy.qualification_rules();

        let signatures = self.diagnostic_data.signatures()?;
        debug!(
            "building report for {document_name}: {} signature(s)",
            signatures.len()
        );

        let mut entries = Vec::with_capacity(signatures.len());
        let mut valid_count = 0usize;

        for record in &signatures {
            let entry = match self.signature_entry(record, &rules) {
                Ok(entry) => entry,
                Err(err) if err.aborts_report() => return Err(err),
                Err(err) => {
                    error!("signature {} could not be processed: {err}", record.id);
                    log_item!(
                        record.id.clone(),
                        "entry degraded to INDETERMINATE / UNEXPECTED_ERROR",
                        "SignatureReportBuilder::build"
                    )
                    .failure_no_throw(validation_log, &err);
                    self.degraded_entry(record, &err)
                }
            };

            if entry.indication() == Indication::Valid {
                valid_count += 1;
            }
            entries.push(entry);
        }

        debug_assert!(valid_count <= entries.len());
        Ok(DocumentReport {
            policy_name,
            policy_description,
            validation_time,
            document_name,
            valid_count,
            total_count: entries.len(),
            entries,
        })
    }

    fn signature_entry(
        &self,
        record: &SignatureRecord,
        rules: &QualificationRules,
    ) -> Result<SignatureReportEntry> {
        let basic = self.basic_validation.conclusion_for(&record.id)?;
        let long_term = self.long_term_validation.conclusion_for(&record.id)?;
        let conclusion = reconcile(&basic, &long_term, record.error_message.as_deref());

        let (signed_by, qualification) = match record.signer_certificate_id.as_deref() {
            Some(certificate_id) if !certificate_id.is_empty() => {
                let attributes = self.diagnostic_data.certificate_attributes(certificate_id)?;
                let trust = self.diagnostic_data.trust_service(certificate_id)?;
                let signed_by = self.diagnostic_data.display_name(certificate_id)?;
                (
                    signed_by,
                    rules.classify(Some(&attributes), &trust.assertions()),
                )
            }
            _ => (
                get_settings().report.unknown_signer_label,
                rules.classify(None, &TrustServiceAssertions::default()),
            ),
        };

        Ok(SignatureReportEntry {
            signature_id: record.id.clone(),
            parent_id: record.kind.parent_id().map(str::to_string),
            signing_time: record.signing_time,
            signature_format: record.format.clone(),
            signed_by,
            conclusion,
            qualification,
            scopes: record.scopes.clone(),
        })
    }

    // Replacement entry for a signature whose processing failed. The failure
    // is summarized with a bounded cause chain so the report stays small no
    // matter what the underlying error drags along.
    fn degraded_entry(&self, record: &SignatureRecord, err: &Error) -> SignatureReportEntry {
        let report_settings = get_settings().report;
        let conclusion = ValidationConclusion::from_parts(
            Indication::Indeterminate,
            Some(SubIndication::UnexpectedError),
            vec![Note::info(cause_summary(
                err,
                report_settings.diagnostic_cause_limit,
            ))],
        );

        SignatureReportEntry {
            signature_id: record.id.clone(),
            parent_id: record.kind.parent_id().map(str::to_string),
            signing_time: record.signing_time,
            signature_format: record.format.clone(),
            signed_by: report_settings.unknown_signer_label,
            conclusion,
            qualification: QualificationLevel::NotApplicable,
            scopes: record.scopes.clone(),
        }
    }
}
