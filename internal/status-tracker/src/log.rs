// Copyright 2024 Adobe. All rights reserved.
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

use std::{borrow::Cow, fmt::Debug};

use crate::StatusTracker;

/// Describes the kind of condition a [`LogItem`] records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LogKind {
    /// The condition describes a step that completed as expected.
    Success,

    /// The condition is noteworthy but did not alter the outcome.
    Informational,

    /// The condition prevented the expected outcome.
    Failure,
}

/// Detailed information about an error or other noteworthy condition observed
/// while building a validation report.
///
/// Use the [`log_item`](crate::log_item) macro to create a `LogItem`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogItem {
    /// Identifier of the signature this item is attributed to, or another
    /// descriptive label for document-level conditions.
    pub signature_id: Cow<'static, str>,

    /// Description of the condition.
    pub description: Cow<'static, str>,

    /// Source file where the condition was detected.
    pub file: Cow<'static, str>,

    /// Function where the condition was detected.
    pub function: Cow<'static, str>,

    /// Source line number where the condition was detected.
    pub line: u32,

    /// Error value as a string, if this item was produced from an error.
    pub err_val: Option<Cow<'static, str>>,

    /// Kind of condition this item records.
    pub kind: LogKind,
}

impl LogItem {
    /// Creates a `LogItem` without source-location capture.
    ///
    /// Most callers should prefer the [`log_item`](crate::log_item) macro,
    /// which captures the file and line number automatically.
    pub fn new(
        signature_id: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        function: impl Into<Cow<'static, str>>,
        file: impl Into<Cow<'static, str>>,
        line: u32,
    ) -> Self {
        LogItem {
            signature_id: signature_id.into(),
            description: description.into(),
            file: file.into(),
            function: function.into(),
            line,
            err_val: None,
            kind: LogKind::Informational,
        }
    }

    /// Captures the description of an error value (typically an `Error` enum)
    /// as additional information for this `LogItem`.
    ///
    /// IMPORTANT: This is implemented using the [`Debug`](std::fmt::Debug)
    /// trait, but in common practice, the `Error` enum from any crate is
    /// likely to fulfill this requirement.
    ///
    /// ## Example
    ///
    /// ```
    /// # use std::borrow::Cow;
    /// # use eidas_status_tracker::log_item;
    /// let log = log_item!("sig-1", "basic conclusion lookup", "test func")
    ///     .error("sample error message");
    ///
    /// assert_eq!(log.err_val, Some(Cow::Borrowed("\"sample error message\"")));
    /// ```
    pub fn error<E: Debug>(self, err: E) -> Self {
        LogItem {
            err_val: Some(format!("{err:?}").into()),
            ..self
        }
    }

    /// Records this item in `tracker` as a success.
    pub fn success(mut self, tracker: &mut StatusTracker) {
        self.kind = LogKind::Success;
        tracker.add_non_error(self);
    }

    /// Records this item in `tracker` as informational.
    pub fn informational(mut self, tracker: &mut StatusTracker) {
        self.kind = LogKind::Informational;
        tracker.add_non_error(self);
    }

    /// Records this item in `tracker` as a failure.
    ///
    /// Will return `Err(err)` if the tracker is configured to stop on the
    /// first error, `Ok(())` otherwise. _(See [`ErrorBehavior`].)_
    ///
    /// [`ErrorBehavior`]: crate::ErrorBehavior
    pub fn failure<E: Debug>(mut self, tracker: &mut StatusTracker, err: E) -> Result<(), E> {
        self.kind = LogKind::Failure;
        self.err_val = Some(format!("{err:?}").into());
        tracker.add_error(self, err)
    }

    /// Records this item in `tracker` as a failure without regard for the
    /// tracker's error behavior.
    ///
    /// Use this when the failure has already been converted into a recovery
    /// path and must not abort the surrounding computation.
    pub fn failure_no_throw<E: Debug>(mut self, tracker: &mut StatusTracker, err: E) {
        self.kind = LogKind::Failure;
        self.err_val = Some(format!("{err:?}").into());
        tracker.add_non_error(self);
    }
}

/// Creates a [`LogItem`] struct that is annotated with the source file and
/// line number where the log condition was discovered.
///
/// Takes three parameters, each of which may be a `'static str` or `String`:
///
/// * `signature_id`: identifier of the signature (or document-level label)
///   this item is attributed to
/// * `description`: human-readable reason for this `LogItem` to have been
///   generated
/// * `function`: name of the function generating this `LogItem`
///
/// ## Example
///
/// ```
/// # use std::borrow::Cow;
/// # use eidas_status_tracker::log_item;
/// let log = log_item!("sig-1", "conclusion degraded", "test func");
///
/// assert_eq!(log.signature_id, Cow::Borrowed("sig-1"));
/// assert_eq!(log.file, Cow::Borrowed(file!()));
/// ```
#[macro_export]
macro_rules! log_item {
    ($signature_id:expr, $description:expr, $function:expr) => {{
        $crate::LogItem {
            signature_id: $signature_id.into(),
            description: $description.into(),
            file: file!().into(),
            function: $function.into(),
            line: line!(),
            err_val: None,
            kind: $crate::LogKind::Informational,
        }
    }};
}
