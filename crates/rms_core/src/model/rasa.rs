//! Closed enumerations: the nine rasas and gender perspectives.
//!
//! # Responsibility
//! - Define the canonical variant sets stored in `projects.expected_rasa`,
//!   `ratings.rasa` and `philosophical_analyses.gender_perspective`.
//! - Provide case-insensitive name lookup that never coerces unknown input.
//!
//! # Invariants
//! - Canonical (stored and serialized) form is the uppercase variant name.
//! - Lookup failure reports the complete list of accepted names.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One of the nine emotional essences (Navarasa).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rasa {
    /// Aesthetic pleasure. Default expectation for new projects.
    #[default]
    Shringara,
    /// Joy.
    Hasya,
    /// Empathy.
    Karuna,
    /// Heroic.
    Veera,
    /// Horrific.
    Bhayanaka,
    /// Wonder.
    Adbhuta,
    /// Serene.
    Shanta,
    /// Disgust.
    Bibhatsa,
    /// Fiery.
    Raudra,
}

impl Rasa {
    /// Every rasa in declaration order.
    pub const ALL: [Rasa; 9] = [
        Rasa::Shringara,
        Rasa::Hasya,
        Rasa::Karuna,
        Rasa::Veera,
        Rasa::Bhayanaka,
        Rasa::Adbhuta,
        Rasa::Shanta,
        Rasa::Bibhatsa,
        Rasa::Raudra,
    ];

    /// Canonical names in declaration order.
    pub const NAMES: [&'static str; 9] = [
        "SHRINGARA",
        "HASYA",
        "KARUNA",
        "VEERA",
        "BHAYANAKA",
        "ADBHUTA",
        "SHANTA",
        "BIBHATSA",
        "RAUDRA",
    ];

    /// Canonical uppercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Rasa::Shringara => "SHRINGARA",
            Rasa::Hasya => "HASYA",
            Rasa::Karuna => "KARUNA",
            Rasa::Veera => "VEERA",
            Rasa::Bhayanaka => "BHAYANAKA",
            Rasa::Adbhuta => "ADBHUTA",
            Rasa::Shanta => "SHANTA",
            Rasa::Bibhatsa => "BIBHATSA",
            Rasa::Raudra => "RAUDRA",
        }
    }

    /// Looks up a rasa by name, ignoring ASCII case. Whitespace is not
    /// stripped, so `" hasya "` is rejected.
    ///
    /// # Errors
    /// Returns `InvalidEnumValue` listing all nine names when `value` does
    /// not match any variant.
    pub fn parse(value: &str) -> Result<Self, InvalidEnumValue> {
        lookup("rasa", value, &Self::ALL, &Self::NAMES)
    }

    /// Parses a canonical stored value (exact, uppercase only).
    pub(crate) fn from_db(value: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|name| *name == value)
            .map(|index| Self::ALL[index])
    }
}

impl Display for Rasa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender perspective recorded by a philosophical analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
    pub const NAMES: [&'static str; 3] = ["MALE", "FEMALE", "OTHER"];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }

    /// Looks up a gender by name, ignoring ASCII case only.
    pub fn parse(value: &str) -> Result<Self, InvalidEnumValue> {
        lookup("gender", value, &Self::ALL, &Self::NAMES)
    }

    pub(crate) fn from_db(value: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|name| *name == value)
            .map(|index| Self::ALL[index])
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup failure for a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEnumValue {
    /// Enumeration name, e.g. `rasa`.
    pub kind: &'static str,
    /// Caller-supplied value as received.
    pub value: String,
    /// Every accepted canonical name, in declaration order.
    pub valid_values: &'static [&'static str],
}

impl Display for InvalidEnumValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid {} value. Must be one of: {}",
            self.kind,
            self.valid_values.join(", ")
        )
    }
}

impl Error for InvalidEnumValue {}

fn lookup<T: Copy>(
    kind: &'static str,
    value: &str,
    variants: &[T],
    names: &'static [&'static str],
) -> Result<T, InvalidEnumValue> {
    let normalized = value.to_ascii_uppercase();
    names
        .iter()
        .position(|name| *name == normalized)
        .map(|index| variants[index])
        .ok_or_else(|| InvalidEnumValue {
            kind,
            value: value.to_string(),
            valid_values: names,
        })
}
