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

//! Crate settings.
//!
//! Settings cover presentation knobs only; none of them changes which
//! indication, sub-indication, or qualification level a signature receives.

use std::cell::RefCell;

use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

thread_local!(
    static SETTINGS: RefCell<Config> =
        RefCell::new(Config::try_from(&Settings::default()).unwrap_or_default());
);

// trait used to validate user input to make sure user supplied configurations are valid
pub(crate) trait SettingsValidate {
    // returns error if settings are invalid
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Settings for report generation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Report {
    /// Maximum number of causes included in the diagnostic note of a degraded
    /// entry.
    pub diagnostic_cause_limit: usize,

    /// Display name reported when the signer certificate cannot be resolved.
    pub unknown_signer_label: String,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            diagnostic_cause_limit: 4,
            unknown_signer_label: "?".to_string(),
        }
    }
}

impl SettingsValidate for Report {
    fn validate(&self) -> Result<()> {
        if self.diagnostic_cause_limit == 0 {
            return Err(Error::BadParam(
                "report.diagnostic_cause_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Settings for the eidas-report crate.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Settings {
    /// Report generation settings.
    pub report: Report,
}

impl Settings {
    /// Loads settings from a string in the given format (`json` or `toml`),
    /// merged over the current settings.
    pub fn from_string(settings_str: &str, format: &str) -> Result<Self> {
        let f = match format.to_lowercase().as_str() {
            "json" => FileFormat::Json,
            "toml" => FileFormat::Toml,
            _ => return Err(Error::UnsupportedType),
        };

        let new_config = Config::builder()
            .add_source(config::File::from_str(settings_str, f))
            .build()
            .map_err(|_e| Error::BadParam("could not parse configuration file".into()))?;

        let update_config = SETTINGS.with_borrow(|current_settings| {
            Config::builder()
                .add_source(current_settings.clone())
                .add_source(new_config)
                .build() // merge overrides, allows for partial changes
        });

        match update_config {
            Ok(update_config) => {
                // sanity check the values before committing
                let settings = update_config
                    .clone()
                    .try_deserialize::<Settings>()
                    .map_err(|_e| {
                        Error::BadParam("configuration file contains unrecognized param".into())
                    })?;

                settings.validate()?;

                SETTINGS.set(update_config);

                Ok(settings)
            }
            Err(_) => Err(Error::OtherError("could not update configuration".into())),
        }
    }
}

impl SettingsValidate for Settings {
    fn validate(&self) -> Result<()> {
        self.report.validate()
    }
}

// Get a snapshot of the Settings object, falling back to the defaults if the
// store cannot be deserialized.
pub(crate) fn get_settings() -> Settings {
    SETTINGS.with_borrow(|config| {
        config
            .clone()
            .try_deserialize::<Settings>()
            .unwrap_or_default()
    })
}

/// Loads settings from a string representation of the configuration. The
/// format of the configuration must be supplied (`json` or `toml`).
pub fn load_settings_from_str(settings_str: &str, format: &str) -> Result<()> {
    Settings::from_string(settings_str, format).map(|_| ())
}

// Get a settings value by path reference. The path is nested names of the
// Settings objects separated by "." notation, e.g. "report.unknown_signer_label".
#[allow(unused)]
pub(crate) fn get_settings_value<'de, T: serde::de::Deserialize<'de>>(
    value_path: &str,
) -> Result<T> {
    SETTINGS.with_borrow(|current_settings| {
        current_settings
            .get::<T>(value_path)
            .map_err(|_| Error::NotFound)
    })
}

/// Sets settings back to the default values. Current use case is for testing.
pub fn reset_default_settings() -> Result<()> {
    if let Ok(default_settings) = Config::try_from(&Settings::default()) {
        SETTINGS.set(default_settings);
        Ok(())
    } else {
        Err(Error::OtherError("could not save settings".into()))
    }
}

#[cfg(test)]
pub mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn default_settings() {
        let settings = get_settings();
        assert_eq!(settings.report.diagnostic_cause_limit, 4);
        assert_eq!(settings.report.unknown_signer_label, "?");
    }

    #[test]
    fn load_partial_override_from_toml() {
        let toml = r#"
            [report]
            unknown_signer_label = "unknown signer"
            "#;
        load_settings_from_str(toml, "toml").unwrap();

        let settings = get_settings();
        assert_eq!(settings.report.unknown_signer_label, "unknown signer");
        // untouched values keep their defaults
        assert_eq!(settings.report.diagnostic_cause_limit, 4);

        reset_default_settings().unwrap();
    }

    #[test]
    fn load_from_json() {
        let json = r#"{"report": {"diagnostic_cause_limit": 2}}"#;
        load_settings_from_str(json, "json").unwrap();

        let settings = get_settings();
        assert_eq!(settings.report.diagnostic_cause_limit, 2);

        reset_default_settings().unwrap();
    }

    #[test]
    fn rejects_unsupported_format() {
        let result = load_settings_from_str("report:", "yaml");
        assert!(matches!(result, Err(Error::UnsupportedType)));
    }

    #[test]
    fn rejects_invalid_values() {
        let json = r#"{"report": {"diagnostic_cause_limit": 0}}"#;
        assert!(load_settings_from_str(json, "json").is_err());

        // the rejected value was not committed
        assert_eq!(get_settings().report.diagnostic_cause_limit, 4);
    }

    #[test]
    fn get_value_by_path() {
        let label: String = get_settings_value("report.unknown_signer_label").unwrap();
        assert_eq!(label, "?");

        let missing: Result<String> = get_settings_value("report.no_such_key");
        assert!(missing.is_err());
    }
}
