use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::opt_id_from_string_or_number;
use crate::error::DrobbError;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::NonBinary, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::NonBinary => "NON_BINARY",
            Gender::Other => "OTHER",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DrobbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DrobbError::InvalidArgument(format!("Unknown gender: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// Aesthetic: style category tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Aesthetic {
    #[serde(rename = "STAR_GIRL")]
    StarGirl,
    #[serde(rename = "SGANDI")]
    Sgandi,
    #[serde(rename = "INDIE")]
    Indie,
    #[serde(rename = "Y2K")]
    Y2k,
    #[serde(rename = "OLD_MONEY")]
    OldMoney,
    #[serde(rename = "ALT")]
    Alt,
    #[serde(rename = "COTTAGECORE")]
    Cottagecore,
    #[serde(rename = "DOWNTOWN")]
    Downtown,
}

impl Aesthetic {
    pub const ALL: [Aesthetic; 8] = [
        Aesthetic::StarGirl,
        Aesthetic::Sgandi,
        Aesthetic::Indie,
        Aesthetic::Y2k,
        Aesthetic::OldMoney,
        Aesthetic::Alt,
        Aesthetic::Cottagecore,
        Aesthetic::Downtown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aesthetic::StarGirl => "STAR_GIRL",
            Aesthetic::Sgandi => "SGANDI",
            Aesthetic::Indie => "INDIE",
            Aesthetic::Y2k => "Y2K",
            Aesthetic::OldMoney => "OLD_MONEY",
            Aesthetic::Alt => "ALT",
            Aesthetic::Cottagecore => "COTTAGECORE",
            Aesthetic::Downtown => "DOWNTOWN",
        }
    }
}

impl fmt::Display for Aesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aesthetic {
    type Err = DrobbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace([' ', '-'], "_");
        Aesthetic::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| DrobbError::InvalidArgument(format!("Unknown aesthetic: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "opt_id_from_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub aesthetic: Vec<String>,
}

/// Body of `PUT /api/profile/update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub gender: Gender,
    pub birth_date: String,
    pub aesthetic: Vec<Aesthetic>,
}

/// Body of `PUT /api/profile/preferences`. Tags are upper-cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub aesthetics: Vec<String>,
    pub clothing_preferences: Vec<String>,
}

impl PreferencesUpdate {
    pub fn new<A, C>(aesthetics: A, clothing: C) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self {
            aesthetics: aesthetics
                .into_iter()
                .map(|a| a.as_ref().to_uppercase())
                .collect(),
            clothing_preferences: clothing
                .into_iter()
                .map(|c| c.as_ref().to_uppercase())
                .collect(),
        }
    }
}
