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

//! This crate provides a status-tracking mechanism used by the eidas-report
//! crate and related crates while building signature validation reports.
//!
//! A [`LogItem`] records one noteworthy condition attributed to a single
//! signature (or to the document as a whole). A [`StatusTracker`] aggregates
//! `LogItem`s as they are generated and controls whether a failure aborts the
//! surrounding computation or is collected for later reporting.

#![deny(missing_docs)]
#![deny(warnings)]

mod log;
pub use log::{LogItem, LogKind};

mod status_tracker;
pub use status_tracker::{ErrorBehavior, StatusTracker};

#[cfg(test)]
mod tests {
    mod log;
    mod status_tracker;
}
