//! Configuration loading from the process environment.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::schema::{AppConfig, ConfigSchema};
use crate::config::validation::{validate, ValidationFailure};

/// Snapshot of environment variables taken once at startup.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawEnv {
    vars: BTreeMap<String, String>,
}

impl RawEnv {
    /// Capture the current process environment.
    ///
    /// Non-UTF-8 keys and values are converted lossily, so a mangled value
    /// fails its shape check instead of reading as absent.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

// Values may hold credentials; only keys are printed.
impl fmt::Debug for RawEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEnv")
            .field("keys", &self.vars.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Validate the process environment against the application schema.
pub fn load_from_env() -> Result<AppConfig, ValidationFailure> {
    let raw = RawEnv::from_process();
    tracing::debug!(variables = raw.len(), "Captured process environment");
    validate(&ConfigSchema::app(), &raw)
}
