//! Device profile definitions and validation for the Force10 configuration parser.
//!
//! A profile carries the data-driven part of end-of-input completeness
//! checking: for each passthrough section it may name the exact set of
//! directives a well-formed dump of that device must contain.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating a device profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// JSON deserialization failed.
    #[error("invalid profile JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// Top-level directives whose bodies are stored verbatim rather than modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassthroughSection {
    /// `boot ...`
    Boot,
    /// `redundancy ...`
    Redundancy,
    /// `hardware ...`
    Hardware,
    /// `stack-unit ...`
    StackUnit,
    /// `logging ...`
    Logging,
    /// `service ...`
    Service,
    /// `aaa ...`
    Aaa,
    /// `eula-consent ...`
    EulaConsent,
}

impl PassthroughSection {
    /// Every passthrough section, in declaration order.
    pub const ALL: [PassthroughSection; 8] = [
        PassthroughSection::Boot,
        PassthroughSection::Redundancy,
        PassthroughSection::Hardware,
        PassthroughSection::StackUnit,
        PassthroughSection::Logging,
        PassthroughSection::Service,
        PassthroughSection::Aaa,
        PassthroughSection::EulaConsent,
    ];

    /// The leading configuration keyword for this section.
    pub fn keyword(self) -> &'static str {
        match self {
            PassthroughSection::Boot => "boot",
            PassthroughSection::Redundancy => "redundancy",
            PassthroughSection::Hardware => "hardware",
            PassthroughSection::StackUnit => "stack-unit",
            PassthroughSection::Logging => "logging",
            PassthroughSection::Service => "service",
            PassthroughSection::Aaa => "aaa",
            PassthroughSection::EulaConsent => "eula-consent",
        }
    }
}

impl fmt::Display for PassthroughSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A device profile describing what a complete configuration dump of a
/// particular switch model looks like.
///
/// # Example
/// ```
/// use f10cfg_profile::{PassthroughSection, Profile};
///
/// let profile = Profile::default();
/// assert_eq!(
///     profile.expected(PassthroughSection::Hardware),
///     Some(&[vec!["hardware".to_string(), "watchdog".to_string()]][..]),
/// );
/// assert!(Profile::permissive().expected_sections.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Unique profile identifier (e.g., `"ftos-default"`).
    pub id: String,
    /// Profile schema version for forward compatibility (e.g., `"1.0.0"`).
    pub schema_version: String,
    /// Free-form description of the device family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Exact directive lists required per passthrough section.
    ///
    /// Comparison is order-insensitive. Sections not listed are not checked.
    #[serde(default)]
    pub expected_sections: BTreeMap<PassthroughSection, Vec<Vec<String>>>,
}

impl Default for Profile {
    /// The canonical Force10 profile: a watchdog-enabled chassis with fully
    /// synchronised redundancy.
    fn default() -> Self {
        let line = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        Self {
            id: "ftos-default".into(),
            schema_version: "1.0.0".into(),
            description: Some("Canonical Force10 FTOS switch".into()),
            expected_sections: BTreeMap::from([
                (
                    PassthroughSection::Hardware,
                    vec![line(&["hardware", "watchdog"])],
                ),
                (
                    PassthroughSection::Redundancy,
                    vec![line(&["redundancy", "auto-synchronize", "full"])],
                ),
            ]),
        }
    }
}

impl Profile {
    /// A profile with no completeness expectations.
    pub fn permissive() -> Self {
        Self {
            id: "permissive".into(),
            schema_version: "1.0.0".into(),
            description: None,
            expected_sections: BTreeMap::new(),
        }
    }

    /// The directive list required for `section`, if the profile constrains it.
    pub fn expected(&self, section: PassthroughSection) -> Option<&[Vec<String>]> {
        self.expected_sections.get(&section).map(Vec::as_slice)
    }
}

/// Load and validate a [`Profile`] from a JSON string.
///
/// Performs structural validation after deserialization:
/// - `id` and `schema_version` must be non-empty
/// - every expected directive must be non-empty, contain no blank words,
///   and start with its section's keyword
pub fn load_profile_from_str(s: &str) -> Result<Profile, ProfileError> {
    let profile: Profile = serde_json::from_str(s)?;

    if profile.id.trim().is_empty() {
        return Err(ProfileError::InvalidField {
            field: "id".into(),
            reason: "must not be empty".into(),
        });
    }
    if profile.schema_version.trim().is_empty() {
        return Err(ProfileError::InvalidField {
            field: "schema_version".into(),
            reason: "must not be empty".into(),
        });
    }

    for (section, lines) in &profile.expected_sections {
        for (i, words) in lines.iter().enumerate() {
            let field = format!("expected_sections.{section}[{i}]");
            let Some(first) = words.first() else {
                return Err(ProfileError::InvalidField {
                    field,
                    reason: "must contain at least one word".into(),
                });
            };
            if first != section.keyword() {
                return Err(ProfileError::InvalidField {
                    field,
                    reason: format!("must start with \"{}\", found \"{first}\"", section.keyword()),
                });
            }
            if words.iter().any(|w| w.trim().is_empty() || w.contains([' ', '\t'])) {
                return Err(ProfileError::InvalidField {
                    field,
                    reason: "words must be non-empty and contain no whitespace".into(),
                });
            }
        }
    }

    Ok(profile)
}
