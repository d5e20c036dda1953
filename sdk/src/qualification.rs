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

//! Classification of a signing certificate into an eIDAS qualification level.

#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::trust_service::{QualifierSet, ServiceQualifier, SERVICE_TYPE_CA_QC};

/// Policy attributes a certificate asserts about itself.
///
/// Derived once per certificate from its policy extensions and QC statements.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAttributes {
    /// Issued under the qualified certificate policy.
    pub qcp: bool,
    /// Issued under the qualified certificate policy requiring a secure
    /// signature-creation device.
    pub qcp_plus: bool,
    /// Carries a qualified-compliance statement.
    pub qcc: bool,
    /// States that the private key resides on a secure signature-creation
    /// device.
    pub qc_sscd: bool,
}

/// What the trusted list asserts about the service that issued a certificate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustServiceAssertions {
    /// The issuing service is a certification authority issuing qualified
    /// certificates.
    pub ca_qc: bool,
    /// The service issues qualified certificates without a secure device.
    pub qc_no_sscd: bool,
    /// The service issues certificates to legal persons.
    pub qc_for_legal_person: bool,
    /// Secure-device status is stated by the certificate itself.
    pub qc_sscd_as_in_cert: bool,
    /// The service issues qualified certificates on a secure device.
    pub qc_with_sscd: bool,
}

impl TrustServiceAssertions {
    /// Derives the assertion flags from a trust-service type identifier and
    /// its qualifier set. Each qualifier is recognized under either of its
    /// URI spellings.
    pub fn from_service(service_type: &str, qualifiers: &QualifierSet) -> Self {
        Self {
            ca_qc: service_type == SERVICE_TYPE_CA_QC,
            qc_no_sscd: qualifiers.contains(ServiceQualifier::QcNoSscd),
            qc_for_legal_person: qualifiers.contains(ServiceQualifier::QcForLegalPerson),
            qc_sscd_as_in_cert: qualifiers.contains(ServiceQualifier::QcSscdStatusAsInCert),
            qc_with_sscd: qualifiers.contains(ServiceQualifier::QcWithSscd),
        }
    }
}

/// eIDAS qualification level of a signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
pub enum QualificationLevel {
    /// Qualified electronic signature.
    QualifiedEsignature,
    /// Qualified electronic seal.
    QualifiedEseal,
    /// Advanced electronic signature backed by a qualified certificate.
    AdvancedEsignatureQc,
    /// Advanced electronic seal backed by a qualified certificate.
    AdvancedEsealQc,
    /// Advanced electronic signature.
    AdvancedEsignature,
    /// Advanced electronic seal.
    AdvancedEseal,
    /// No qualification can be determined.
    NotApplicable,
}

/// The qualification decision table.
///
/// The table is policy data supplied by the validation policy; the precedence
/// logic in [`classify`](Self::classify) does not change when the table does.
/// Rows are keyed on whether the certificate is qualified, whether a secure
/// signature-creation device holds the key, and whether the certificate was
/// issued to a legal person.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationRules {
    // Indexed [qualified][secure_device][legal_person].
    levels: [[[QualificationLevel; 2]; 2]; 2],
}

impl QualificationRules {
    /// Creates a rule table from explicit rows, indexed
    /// `[qualified][secure_device][legal_person]`.
    pub fn new(levels: [[[QualificationLevel; 2]; 2]; 2]) -> Self {
        Self { levels }
    }

    /// Looks up the level for one attribute tuple.
    pub fn level_for(
        &self,
        qualified: bool,
        secure_device: bool,
        legal_person: bool,
    ) -> QualificationLevel {
        self.levels[usize::from(qualified)][usize::from(secure_device)][usize::from(legal_person)]
    }

    /// Classifies a signing certificate.
    ///
    /// `cert` is `None` when the signer certificate could not be resolved;
    /// the result is then [`QualificationLevel::NotApplicable`] without
    /// consulting the table.
    ///
    /// Trusted-list assertions take precedence over the certificate's
    /// self-asserted claims: the issuing service must be attested as CA/QC
    /// for any qualification to hold, and an explicit device assertion
    /// (`qc_no_sscd`, then `qc_with_sscd`) overrides what the certificate
    /// states about its key protection.
    pub fn classify(
        &self,
        cert: Option<&CertificateAttributes>,
        trust: &TrustServiceAssertions,
    ) -> QualificationLevel {
        let Some(cert) = cert else {
            return QualificationLevel::NotApplicable;
        };

        let claims_qualified = cert.qcc || cert.qcp || cert.qcp_plus;
        let claims_secure_device = cert.qc_sscd || cert.qcp_plus;

        let qualified = claims_qualified && trust.ca_qc;

        let secure_device = if trust.qc_no_sscd {
            false
        } else if trust.qc_with_sscd {
            true
        } else {
            // QCSSCDStatusAsInCert and a silent trusted list both defer to
            // the certificate's own statements.
            claims_secure_device
        };

        self.level_for(qualified, secure_device, trust.qc_for_legal_person)
    }
}

impl Default for QualificationRules {
    fn default() -> Self {
        use QualificationLevel::*;

        Self {
            levels: [
                // Not qualified: advanced at best, device makes no difference.
                [
                    [AdvancedEsignature, AdvancedEseal],
                    [AdvancedEsignature, AdvancedEseal],
                ],
                // Qualified certificate.
                [
                    [AdvancedEsignatureQc, AdvancedEsealQc],
                    [QualifiedEsignature, QualifiedEseal],
                ],
            ],
        }
    }
}
