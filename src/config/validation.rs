//! Configuration validation.
//!
//! # Responsibilities
//! - Check every schema rule against the raw environment
//! - Substitute defaults for absent settings
//! - Coerce accepted values into the typed [`AppConfig`]
//!
//! # Design Decisions
//! - Returns all violations, not just the first
//! - Pure function: (ConfigSchema, RawEnv) → Result<AppConfig, ValidationFailure>
//! - Keys not named by the schema are ignored

use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::config::loader::RawEnv;
use crate::config::schema::{
    AppConfig, AppUrl, ConfigSchema, DatabaseUrl, RuntimeMode, SettingRule, Shape, NODE_ENV,
    DATABASE_URL, NEXT_PUBLIC_APP_URL, RUNTIME_MODES,
};

/// A single broken constraint on one setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Setting absent and its rule has no default.
    #[error("required, not provided")]
    MissingRequiredSetting,

    /// Setting present but does not match its shape.
    #[error("present but invalid: expected {expected}")]
    MalformedSetting { expected: String },
}

impl Violation {
    pub fn malformed(shape: &Shape) -> Self {
        Violation::MalformedSetting {
            expected: shape.expected(),
        }
    }
}

/// Violations for one setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingViolations {
    pub key: String,
    pub violations: Vec<Violation>,
}

/// Every violation found in one validation pass, keyed by setting in schema
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: Vec<SettingViolations>,
}

impl ValidationReport {
    pub fn push(&mut self, key: &str, violation: Violation) {
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.violations.push(violation),
            None => self.entries.push(SettingViolations {
                key: key.to_string(),
                violations: vec![violation],
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[Violation]> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.violations.as_slice())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingViolations> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: ", entry.key)?;
            for (j, violation) in entry.violations.iter().enumerate() {
                if j > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}", violation)?;
            }
        }
        Ok(())
    }
}

/// Serializes as `{"KEY": ["message", ...]}`.
impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            let messages: Vec<String> = entry.violations.iter().map(ToString::to_string).collect();
            map.serialize_entry(&entry.key, &messages)?;
        }
        map.end()
    }
}

/// Aggregate failure carrying the full per-setting report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid environment variables:\n{report}")]
pub struct ValidationFailure {
    report: ValidationReport,
}

impl ValidationFailure {
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }
}

/// Validate `raw` against `schema` and build the typed configuration.
///
/// Every rule in `schema` is checked and reported. The resulting [`AppConfig`]
/// is always built from [`NODE_ENV`], [`NEXT_PUBLIC_APP_URL`] and
/// [`DATABASE_URL`], so a schema must carry a rule for each of them; a schema
/// that leaves one out reports it as [`Violation::MissingRequiredSetting`]
/// whatever the environment holds. [`ConfigSchema::app`] satisfies this.
pub fn validate(schema: &ConfigSchema, raw: &RawEnv) -> Result<AppConfig, ValidationFailure> {
    let mut report = ValidationReport::default();
    let mut accepted: HashMap<&str, &str> = HashMap::new();

    for rule in schema.rules() {
        match check_rule(rule, raw.get(rule.key)) {
            Ok(value) => {
                accepted.insert(rule.key, value);
            }
            Err(violation) => report.push(rule.key, violation),
        }
    }

    let runtime_mode = coerce(&accepted, &mut report, NODE_ENV, Shape::OneOf(RUNTIME_MODES), |v| {
        v.parse::<RuntimeMode>().ok()
    });
    let public_app_url = coerce(&accepted, &mut report, NEXT_PUBLIC_APP_URL, Shape::AbsoluteUrl, AppUrl::parse);
    let database_url = coerce(&accepted, &mut report, DATABASE_URL, Shape::NonEmpty, DatabaseUrl::parse);

    match (runtime_mode, public_app_url, database_url) {
        (Some(mode), Some(url), Some(db)) if report.is_empty() => Ok(AppConfig::new(mode, url, db)),
        _ => Err(ValidationFailure { report }),
    }
}

fn check_rule<'a>(rule: &SettingRule, value: Option<&'a str>) -> Result<&'a str, Violation> {
    match value.or(rule.default) {
        None => Err(Violation::MissingRequiredSetting),
        Some(value) if rule.shape.accepts(value) => Ok(value),
        Some(_) => Err(Violation::malformed(&rule.shape)),
    }
}

/// Convert an accepted value into its typed form.
///
/// A key the schema never checked counts as missing; a key that already has a
/// violation is left alone.
fn coerce<T>(
    accepted: &HashMap<&str, &str>,
    report: &mut ValidationReport,
    key: &str,
    shape: Shape,
    convert: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    match accepted.get(key).copied() {
        Some(value) => {
            let typed = convert(value);
            if typed.is_none() {
                report.push(key, Violation::malformed(&shape));
            }
            typed
        }
        None => {
            if !report.contains(key) {
                report.push(key, Violation::MissingRequiredSetting);
            }
            None
        }
    }
}
