//! Sync configuration.
//!
//! `SyncSettings` holds the tunables of the sync orchestrator. Every field has
//! a default so partial JSON and an empty environment both produce a usable
//! value.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

const ENV_MIN_SYNC_INTERVAL_SECS: &str = "FEATHERWEIGHT_MIN_SYNC_INTERVAL_SECS";
const ENV_DEVICE_NAME: &str = "FEATHERWEIGHT_DEVICE_NAME";
const ENV_REMOTE_URL: &str = "FEATHERWEIGHT_REMOTE_URL";

/// Minimum time between two sync attempts
pub const DEFAULT_MIN_SYNC_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Attempts closer together than this are skipped
    pub min_sync_interval_secs: u64,
    /// Overrides the host-derived device label
    pub device_name: Option<String>,
    pub remote_url: Option<String>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            min_sync_interval_secs: DEFAULT_MIN_SYNC_INTERVAL_SECS,
            device_name: None,
            remote_url: None,
        }
    }
}

impl SyncSettings {
    pub const fn min_sync_interval(&self) -> Duration {
        Duration::from_secs(self.min_sync_interval_secs)
    }

    /// Load settings from `FEATHERWEIGHT_*` environment variables.
    ///
    /// Unset variables keep their defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Ok(Self::default().with_overrides(SettingsOverrides::from_env()?))
    }

    /// Apply every field `overrides` sets, leaving the rest untouched.
    #[must_use]
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(secs) = overrides.min_sync_interval_secs {
            self.min_sync_interval_secs = secs;
        }
        if overrides.device_name.is_some() {
            self.device_name = overrides.device_name;
        }
        if overrides.remote_url.is_some() {
            self.remote_url = overrides.remote_url;
        }
        self
    }
}

/// Settings supplied explicitly by an outer layer such as the environment.
///
/// `None` means "not given", so an explicit value equal to the default still
/// wins over a lower layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsOverrides {
    pub min_sync_interval_secs: Option<u64>,
    pub device_name: Option<String>,
    pub remote_url: Option<String>,
}

impl SettingsOverrides {
    pub fn from_env() -> Result<Self> {
        parse_overrides(|key| env::var(key).ok())
    }
}

fn parse_overrides<F>(lookup: F) -> Result<SettingsOverrides>
where
    F: Fn(&str) -> Option<String>,
{
    let mut overrides = SettingsOverrides::default();

    if let Some(raw) = normalize_text_option(lookup(ENV_MIN_SYNC_INTERVAL_SECS)) {
        let secs = raw.parse().map_err(|_| {
            Error::InvalidInput(format!(
                "{ENV_MIN_SYNC_INTERVAL_SECS} must be a whole number of seconds, got '{raw}'"
            ))
        })?;
        overrides.min_sync_interval_secs = Some(secs);
    }

    overrides.device_name = normalize_text_option(lookup(ENV_DEVICE_NAME));

    if let Some(url) = normalize_text_option(lookup(ENV_REMOTE_URL)) {
        if !is_http_url(&url) {
            return Err(Error::InvalidInput(format!(
                "{ENV_REMOTE_URL} must include http:// or https://"
            )));
        }
        overrides.remote_url = Some(url.trim_end_matches('/').to_string());
    }

    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(values: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = values
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    fn parse_settings<F>(lookup: F) -> Result<SyncSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(SyncSettings::default().with_overrides(parse_overrides(lookup)?))
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(parse_overrides(lookup(&[])).unwrap(), SettingsOverrides::default());
        let settings = parse_settings(lookup(&[])).unwrap();
        assert_eq!(settings, SyncSettings::default());
        assert_eq!(settings.min_sync_interval(), Duration::from_secs(10));
    }

    #[test]
    fn environment_overrides_are_applied() {
        let settings = parse_settings(lookup(&[
            (ENV_MIN_SYNC_INTERVAL_SECS, "30"),
            (ENV_DEVICE_NAME, "  Garage iPad "),
            (ENV_REMOTE_URL, "https://sync.example.com/"),
        ]))
        .unwrap();

        assert_eq!(settings.min_sync_interval_secs, 30);
        assert_eq!(settings.device_name.as_deref(), Some("Garage iPad"));
        assert_eq!(
            settings.remote_url.as_deref(),
            Some("https://sync.example.com")
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(parse_settings(lookup(&[(ENV_MIN_SYNC_INTERVAL_SECS, "soon")])).is_err());
        assert!(parse_settings(lookup(&[(ENV_REMOTE_URL, "sync.example.com")])).is_err());
    }

    #[test]
    fn explicit_default_interval_beats_profile_value() {
        let profile = SyncSettings {
            min_sync_interval_secs: 30,
            device_name: Some("Garage iPad".to_string()),
            remote_url: None,
        };
        let overrides = parse_overrides(lookup(&[(ENV_MIN_SYNC_INTERVAL_SECS, "10")])).unwrap();

        let settings = profile.with_overrides(overrides);

        assert_eq!(settings.min_sync_interval_secs, DEFAULT_MIN_SYNC_INTERVAL_SECS);
        assert_eq!(settings.device_name.as_deref(), Some("Garage iPad"));
    }

    #[test]
    fn unset_environment_keeps_profile_values() {
        let profile = SyncSettings {
            min_sync_interval_secs: 30,
            device_name: None,
            remote_url: Some("https://sync.example.com".to_string()),
        };

        let settings = profile.clone().with_overrides(parse_overrides(lookup(&[])).unwrap());

        assert_eq!(settings, profile);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: SyncSettings =
            serde_json::from_str(r#"{ "device_name": "Phone" }"#).unwrap();
        assert_eq!(settings.min_sync_interval_secs, DEFAULT_MIN_SYNC_INTERVAL_SECS);
        assert_eq!(settings.device_name.as_deref(), Some("Phone"));
    }
}
