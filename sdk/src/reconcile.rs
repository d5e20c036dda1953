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

//! Reconciliation of the basic and long-term validation conclusions for one
//! signature into the single conclusion reported for it.

use crate::conclusion::{Indication, Note, NoteKind, SubIndication, ValidationConclusion};

/// Note text reported when a signature is valid but carries no qualifying
/// timestamp.
pub const NOTE_VALID_NO_TIMESTAMP: &str =
    "The signature is valid but there is no qualifying timestamp within it.";

/// Note text reported when a signature is not valid and carries no qualifying
/// timestamp.
pub const NOTE_INVALID_NO_TIMESTAMP: &str =
    "The signature is not valid and there is no qualifying timestamp within it.";

/// Reconciles the two validation conclusions computed for one signature.
///
/// The long-term conclusion wins by default. When the long-term pass reports
/// `INDETERMINATE / NO_TIMESTAMP`, no timestamp exists for it to improve on
/// the basic pass, so the basic conclusion is reported instead, annotated
/// with a note naming the situation; when the basic pass is itself not valid,
/// the long-term notes are kept as context.
///
/// In the default branch the long-term notes are emitted in kind order
/// (errors, then warnings, then infos); error notes are dropped when the
/// long-term indication is `VALID`, since they are not relevant to a final
/// valid outcome.
///
/// A signature-level `signature_error` from the diagnostic data, if present,
/// is always appended as an informational note, escaped for safe embedding
/// in the rendered report.
///
/// This function is pure and total: it never fails, and identical inputs
/// produce identical output.
pub fn reconcile(
    basic: &ValidationConclusion,
    long_term: &ValidationConclusion,
    signature_error: Option<&str>,
) -> ValidationConclusion {
    let no_timestamp = long_term.indication() == Indication::Indeterminate
        && long_term.sub_indication() == Some(SubIndication::NoTimestamp);

    let mut result = if no_timestamp {
        let mut notes: Vec<Note> = basic.notes().to_vec();
        if basic.is_valid() {
            notes.push(Note::info(NOTE_VALID_NO_TIMESTAMP));
        } else {
            notes.push(Note::info(NOTE_INVALID_NO_TIMESTAMP));
            notes.extend(long_term.notes().iter().cloned());
        }
        ValidationConclusion::from_parts(basic.indication(), basic.sub_indication(), notes)
    } else {
        let mut notes: Vec<Note> = Vec::with_capacity(long_term.notes().len());
        if !long_term.is_valid() {
            notes.extend(long_term.notes_of_kind(NoteKind::Error).cloned());
        }
        notes.extend(long_term.notes_of_kind(NoteKind::Warning).cloned());
        notes.extend(long_term.notes_of_kind(NoteKind::Info).cloned());
        ValidationConclusion::from_parts(long_term.indication(), long_term.sub_indication(), notes)
    };

    if let Some(message) = signature_error {
        result.push_note(Note::info(escape_markup(message)));
    }

    result
}

/// Escapes the characters with markup meaning so upstream error text can be
/// embedded verbatim in the rendered report.
pub(crate) fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
