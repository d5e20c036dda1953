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

//! Per-document entry point wrapping the report build and the rendering of
//! its output format.

use eidas_status_tracker::{log_item, StatusTracker};
use log::error;

use crate::{
    diagnostic::{ConclusionProvider, DiagnosticData, TimeSource, ValidationPolicy},
    error::Result,
    report::DocumentReport,
    report_builder::SignatureReportBuilder,
};

/// Assembles the validation report for one document.
///
/// Thin wrapper around [`SignatureReportBuilder`]: it owns the one-build-per-
/// document contract and the document-level failure boundary.
pub struct ReportAssembler<'a> {
    builder: SignatureReportBuilder<'a>,
}

impl<'a> ReportAssembler<'a> {
    /// Creates an assembler over the document's collaborators.
    pub fn new(
        policy: &'a dyn ValidationPolicy,
        diagnostic_data: &'a dyn DiagnosticData,
        basic_validation: &'a dyn ConclusionProvider,
        long_term_validation: &'a dyn ConclusionProvider,
        time_source: &'a dyn TimeSource,
    ) -> Self {
        Self {
            builder: SignatureReportBuilder::new(
                policy,
                diagnostic_data,
                basic_validation,
                long_term_validation,
                time_source,
            ),
        }
    }

    /// Builds the report for the document.
    ///
    /// Failures the builder has already attributed to a single signature are
    /// not recorded a second time at this boundary; only a document-level
    /// failure not yet present in `validation_log` is logged here before
    /// being returned to the caller.
    pub fn assemble(&self, validation_log: &mut StatusTracker) -> Result<DocumentReport> {
        match self.builder.build(validation_log) {
            Ok(report) => Ok(report),
            Err(err) => {
                if !validation_log.has_error(&err) {
                    error!("report build aborted: {err}");
                    log_item!("document", "report build aborted", "ReportAssembler::assemble")
                        .failure_no_throw(validation_log, &err);
                }
                Err(err)
            }
        }
    }

    /// Builds the report and renders it in the external document format.
    pub fn assemble_json(&self, validation_log: &mut StatusTracker) -> Result<String> {
        self.assemble(validation_log)?.to_json()
    }
}
