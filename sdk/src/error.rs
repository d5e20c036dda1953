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

use thiserror::Error;

/// `Error` enumerates errors returned by most eidas-report operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A validation conclusion referenced by the report could not be obtained.
    #[error("conclusion missing: signature = {signature_id}")]
    ConclusionMissing { signature_id: String },

    /// The validation policy could not supply a required field.
    #[error("validation policy unavailable: {0}")]
    PolicyUnavailable(String),

    /// The diagnostic data could not supply a required document-level field.
    #[error("document data missing: {0}")]
    DocumentDataMissing(String),

    /// No certificate with this id is present in the diagnostic data.
    #[error("certificate not found: id = {id}")]
    CertificateNotFound { id: String },

    /// No trust-service entry covers the issuer of this certificate.
    #[error("no trust service covers certificate: id = {id}")]
    TrustServiceMissing { id: String },

    #[error("bad parameter: {0}")]
    BadParam(String),

    #[error("not found")]
    NotFound,

    #[error("type is unsupported")]
    UnsupportedType,

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    OtherError(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Returns `true` for missing-input errors that abort the whole report
    /// build rather than degrading a single signature entry.
    ///
    /// Certificate and trust-service resolution failures are recoverable per
    /// signature; a missing conclusion or an unavailable policy or document
    /// field is not.
    pub fn aborts_report(&self) -> bool {
        matches!(
            self,
            Error::ConclusionMissing { .. }
                | Error::PolicyUnavailable(_)
                | Error::DocumentDataMissing(_)
        )
    }
}

/// Returns a summary of `err` and its cause chain, truncated after
/// `cause_limit` causes to keep the diagnostic payload bounded.
pub(crate) fn cause_summary(err: &Error, cause_limit: usize) -> String {
    use std::{error::Error as _, fmt::Write as _};

    let mut message = format!("See validation log for details.\n{err}");
    let mut source = err.source();
    let mut depth = 0;
    while let Some(cause) = source {
        if depth >= cause_limit {
            message.push_str("\n...");
            break;
        }
        let _ = write!(message, "\ncaused by: {cause}");
        source = cause.source();
        depth += 1;
    }
    message
}

/// A specialized `Result` type for eidas-report operations.
pub type Result<T> = std::result::Result<T, Error>;
