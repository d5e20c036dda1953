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

//! Types describing the conclusion of a validation pass for one signature.

#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top-level verdict for one signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
pub enum Indication {
    /// The signature passed the validation process.
    Valid,
    /// The available information is insufficient to declare the signature
    /// valid or invalid.
    Indeterminate,
    /// The signature failed the validation process.
    Invalid,
}

/// Refinement of an [`Indication`], naming the rule that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
pub enum SubIndication {
    /// No qualifying timestamp covers the signature.
    NoTimestamp,
    /// An internal failure interrupted the validation of this signature.
    UnexpectedError,
    /// The signing certificate could not be identified.
    NoSigningCertificateFound,
    /// No certificate chain could be built up to a trust anchor.
    NoCertificateChainFound,
    /// The best-signature-time is outside the certificate validity range and
    /// no proof of existence compensates for it.
    OutOfBoundsNoPoe,
    /// The signing certificate is revoked and no proof of existence predates
    /// the revocation.
    RevokedNoPoe,
    /// The signing certificate is revoked.
    Revoked,
    /// The signing certificate has expired.
    Expired,
    /// The signing certificate is not yet valid.
    NotYetValid,
    /// The signature does not conform to one of the accepted formats.
    FormatFailure,
    /// The computed digest of the signed data differs from the signed digest.
    HashFailure,
    /// The cryptographic verification of the signature value failed.
    SigCryptoFailure,
    /// The signature does not satisfy a signature-level constraint.
    SigConstraintsFailure,
    /// The certificate chain does not satisfy a chain-level constraint.
    ChainConstraintsFailure,
    /// An algorithm or key length used is below the acceptable threshold.
    CryptoConstraintsFailure,
    /// The data covered by the signature could not be obtained.
    SignedDataNotFound,
    /// Required proof of existence is missing.
    NoPoe,
    /// Revocation data is not yet available for the signing certificate.
    TryLater,
    /// No certificate chain could be built and no proof of existence exists.
    NoCertificateChainFoundNoPoe,
}

/// Classifies the weight a [`Note`] carries in a report entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
pub enum NoteKind {
    /// Context that does not alter the verdict.
    Info,
    /// A concern that did not fail the signature.
    Warning,
    /// A condition that contributed to a non-valid verdict.
    Error,
}

/// One annotation attached to a validation conclusion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
pub struct Note {
    kind: NoteKind,
    text: String,
}

impl Note {
    /// Creates an informational note.
    pub fn info<S: Into<String>>(text: S) -> Self {
        Self {
            kind: NoteKind::Info,
            text: text.into(),
        }
    }

    /// Creates a warning note.
    pub fn warning<S: Into<String>>(text: S) -> Self {
        Self {
            kind: NoteKind::Warning,
            text: text.into(),
        }
    }

    /// Creates an error note.
    pub fn error<S: Into<String>>(text: S) -> Self {
        Self {
            kind: NoteKind::Error,
            text: text.into(),
        }
    }

    /// Returns the kind of this note.
    pub fn kind(&self) -> NoteKind {
        self.kind
    }

    /// Returns the text of this note.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The conclusion one validation pass reached for one signature.
///
/// Immutable once produced by the upstream pass; the aggregation step builds
/// new conclusions rather than editing the inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
pub struct ValidationConclusion {
    indication: Indication,
    #[serde(rename = "subIndication", skip_serializing_if = "Option::is_none")]
    sub_indication: Option<SubIndication>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    notes: Vec<Note>,
}

impl ValidationConclusion {
    /// Creates a conclusion with the given indication and no refinement.
    pub fn new(indication: Indication) -> Self {
        Self {
            indication,
            sub_indication: None,
            notes: vec![],
        }
    }

    /// Creates a conclusion from its parts.
    pub fn from_parts(
        indication: Indication,
        sub_indication: Option<SubIndication>,
        notes: Vec<Note>,
    ) -> Self {
        Self {
            indication,
            sub_indication,
            notes,
        }
    }

    /// Sets the sub-indication.
    pub fn with_sub_indication(mut self, sub_indication: SubIndication) -> Self {
        self.sub_indication = Some(sub_indication);
        self
    }

    /// Appends a note.
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Returns the indication.
    pub fn indication(&self) -> Indication {
        self.indication
    }

    /// Returns the sub-indication, if any.
    pub fn sub_indication(&self) -> Option<SubIndication> {
        self.sub_indication
    }

    /// Returns the ordered notes.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the notes of the requested kind, in their original order.
    pub fn notes_of_kind(&self, kind: NoteKind) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |note| note.kind == kind)
    }

    /// Appends a note in place.
    pub fn push_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Returns `true` if the indication is [`Indication::Valid`].
    pub fn is_valid(&self) -> bool {
        self.indication == Indication::Valid
    }
}
