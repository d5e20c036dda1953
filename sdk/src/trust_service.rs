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

//! Trust-service qualifiers asserted by national trusted lists.
//!
//! Each qualifier exists under two URI spellings: the TS 119 612 form and the
//! legacy 1999/93/EC trusted-list form. Both spellings identify the same
//! qualifier permanently; membership checks accept either.

use serde::{Deserialize, Serialize};

/// Trust-service type identifier for a certification authority issuing
/// qualified certificates.
pub const SERVICE_TYPE_CA_QC: &str = "http://uri.etsi.org/TrstSvc/Svctype/CA/QC";

/// The service issues qualified certificates maintained on a secure
/// signature-creation device (TS 119 612 spelling).
pub const QC_WITH_SSCD: &str = "http://uri.etsi.org/TrstSvc/TrustedList/SvcInfoExt/QCWithSSCD";

/// Legacy spelling of [`QC_WITH_SSCD`].
pub const QC_WITH_SSCD_LEGACY: &str =
    "http://uri.etsi.org/TrstSvc/eSigDir-1999-93-EC-TrustedList/SvcInfoExt/QCWithSSCD";

/// The service issues qualified certificates without a secure
/// signature-creation device (TS 119 612 spelling).
pub const QC_NO_SSCD: &str = "http://uri.etsi.org/TrstSvc/TrustedList/SvcInfoExt/QCNoSSCD";

/// Legacy spelling of [`QC_NO_SSCD`].
pub const QC_NO_SSCD_LEGACY: &str =
    "http://uri.etsi.org/TrstSvc/eSigDir-1999-93-EC-TrustedList/SvcInfoExt/QCNoSSCD";

/// Whether a secure device is used is stated by the certificate itself
/// (TS 119 612 spelling).
pub const QC_SSCD_STATUS_AS_IN_CERT: &str =
    "http://uri.etsi.org/TrstSvc/TrustedList/SvcInfoExt/QCSSCDStatusAsInCert";

/// Legacy spelling of [`QC_SSCD_STATUS_AS_IN_CERT`].
pub const QC_SSCD_STATUS_AS_IN_CERT_LEGACY: &str =
    "http://uri.etsi.org/TrstSvc/eSigDir-1999-93-EC-TrustedList/SvcInfoExt/QCSSCDStatusAsInCert";

/// The service issues qualified certificates to legal persons
/// (TS 119 612 spelling).
pub const QC_FOR_LEGAL_PERSON: &str =
    "http://uri.etsi.org/TrstSvc/TrustedList/SvcInfoExt/QCForLegalPerson";

/// Legacy spelling of [`QC_FOR_LEGAL_PERSON`].
pub const QC_FOR_LEGAL_PERSON_LEGACY: &str =
    "http://uri.etsi.org/TrstSvc/eSigDir-1999-93-EC-TrustedList/SvcInfoExt/QCForLegalPerson";

/// Canonical identity of a trust-service qualifier, independent of which URI
/// spelling asserted it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceQualifier {
    /// Qualified certificates on a secure signature-creation device.
    QcWithSscd,
    /// Qualified certificates without a secure signature-creation device.
    QcNoSscd,
    /// Secure-device status is stated by the certificate itself.
    QcSscdStatusAsInCert,
    /// Certificates issued to legal persons.
    QcForLegalPerson,
}

impl ServiceQualifier {
    /// All qualifiers, in declaration order.
    pub const ALL: [ServiceQualifier; 4] = [
        ServiceQualifier::QcWithSscd,
        ServiceQualifier::QcNoSscd,
        ServiceQualifier::QcSscdStatusAsInCert,
        ServiceQualifier::QcForLegalPerson,
    ];

    /// Returns the TS 119 612 URI spelling of this qualifier.
    pub fn uri(self) -> &'static str {
        match self {
            ServiceQualifier::QcWithSscd => QC_WITH_SSCD,
            ServiceQualifier::QcNoSscd => QC_NO_SSCD,
            ServiceQualifier::QcSscdStatusAsInCert => QC_SSCD_STATUS_AS_IN_CERT,
            ServiceQualifier::QcForLegalPerson => QC_FOR_LEGAL_PERSON,
        }
    }

    /// Returns the legacy 1999/93/EC URI spelling of this qualifier.
    pub fn legacy_uri(self) -> &'static str {
        match self {
            ServiceQualifier::QcWithSscd => QC_WITH_SSCD_LEGACY,
            ServiceQualifier::QcNoSscd => QC_NO_SSCD_LEGACY,
            ServiceQualifier::QcSscdStatusAsInCert => QC_SSCD_STATUS_AS_IN_CERT_LEGACY,
            ServiceQualifier::QcForLegalPerson => QC_FOR_LEGAL_PERSON_LEGACY,
        }
    }

    /// Resolves a URI in either spelling to its canonical qualifier.
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|qualifier| uri == qualifier.uri() || uri == qualifier.legacy_uri())
    }
}

/// The set of qualifier URIs a trusted list asserts for one trust service.
///
/// Read-only to the report core; owned by the diagnostic data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifierSet(Vec<String>);

impl QualifierSet {
    /// Creates a qualifier set from raw URIs, in either spelling.
    pub fn new<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(uris.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if the set asserts `qualifier` under either spelling.
    pub fn contains(&self, qualifier: ServiceQualifier) -> bool {
        self.0
            .iter()
            .any(|uri| uri == qualifier.uri() || uri == qualifier.legacy_uri())
    }

    /// Returns the raw URIs as supplied by the trusted list.
    pub fn uris(&self) -> &[String] {
        &self.0
    }
}
