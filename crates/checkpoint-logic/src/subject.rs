//! Subject seeds: the immutable input describing one traveler before
//! enrichment.
//!
//! A [`SubjectSeed`] carries demographic traits, narrative fields, and the
//! [`TruthFlags`] every generated artifact must agree with. Seeds are
//! usually authored in scenario JSON; tests build them with
//! [`SubjectSeed::new`] and the `with_*` helpers.

use serde::{Deserialize, Serialize};

use crate::directive::ExceptionKind;
use crate::interrogation::InterrogationResponses;
use crate::tells::BpmTells;

/// What a subject physically is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectType {
    Human,
    /// Human with augmentations.
    HumanCyborg,
    /// Machine chassis with organic components.
    RobotCyborg,
    Replicant,
}

impl SubjectType {
    pub fn is_cyborg(self) -> bool {
        matches!(self, SubjectType::HumanCyborg | SubjectType::RobotCyborg)
    }

    pub fn is_synthetic(self) -> bool {
        matches!(self, SubjectType::Replicant | SubjectType::RobotCyborg)
    }
}

/// Social hierarchy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HierarchyTier {
    Lower,
    Standard,
    Upper,
    Vip,
}

/// Where the subject claims to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OriginWorld {
    Earth,
    Luna,
    Mars,
    Ceres,
    Europa,
    Io,
    Ganymede,
    Callisto,
    Titan,
    Enceladus,
}

impl OriginWorld {
    pub fn display_name(self) -> &'static str {
        match self {
            OriginWorld::Earth => "Earth",
            OriginWorld::Luna => "Luna",
            OriginWorld::Mars => "Mars",
            OriginWorld::Ceres => "Ceres",
            OriginWorld::Europa => "Europa",
            OriginWorld::Io => "Io",
            OriginWorld::Ganymede => "Ganymede",
            OriginWorld::Callisto => "Callisto",
            OriginWorld::Titan => "Titan",
            OriginWorld::Enceladus => "Enceladus",
        }
    }
}

/// Working role, used by the ENGINEERS condition and MEDICAL / DIPLOMAT
/// exceptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectRole {
    Civilian,
    Engineer,
    Medic,
    Diplomat,
    Laborer,
    Trader,
    Pilot,
    Security,
    Scientist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unspecified,
}

/// Ground-truth facts about a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TruthFlags {
    pub has_warrant: bool,
    pub has_transit_issue: bool,
    pub has_incident: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_medical_emergency: Option<bool>,
}

impl TruthFlags {
    pub fn medical_emergency(&self) -> bool {
        self.has_medical_emergency.unwrap_or(false)
    }
}

/// Demographic traits handed to the subject factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectTraits {
    pub subject_type: SubjectType,
    pub hierarchy_tier: HierarchyTier,
    pub origin: OriginWorld,
    pub role: SubjectRole,
}

impl Default for SubjectTraits {
    fn default() -> Self {
        Self {
            subject_type: SubjectType::Human,
            hierarchy_tier: HierarchyTier::Standard,
            origin: OriginWorld::Mars,
            role: SubjectRole::Civilian,
        }
    }
}

/// Background file on the subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dossier {
    pub occupation: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,
}

impl Default for Dossier {
    fn default() -> Self {
        Self {
            occupation: "dock worker".to_string(),
            address: "Hab Block 9, Lower Ring".to_string(),
            employer: None,
        }
    }
}

/// Author-supplied values that win over procedurally generated ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<OriginWorld>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_visit: Option<String>,
}

/// One subject before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSeed {
    /// Stable identifier.
    pub id: String,
    /// Seed for every random draw made on this subject's behalf.
    pub seed: u64,
    pub traits: SubjectTraits,
    #[serde(default)]
    pub sex: Sex,
    pub reason_for_visit: String,
    #[serde(default)]
    pub dossier: Dossier,
    pub truth_flags: TruthFlags,
    /// Explicit tags that force an exception regardless of traits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exception_tags: Vec<ExceptionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tells: Option<BpmTells>,
    #[serde(default, skip_serializing_if = "InterrogationResponses::is_empty")]
    pub responses: InterrogationResponses,
    #[serde(default)]
    pub overrides: ManualOverrides,
    /// Ask the factory for a procedural portrait.
    #[serde(default)]
    pub procedural_portrait: bool,
}

impl SubjectSeed {
    pub fn new(
        id: impl Into<String>,
        seed: u64,
        traits: SubjectTraits,
        truth_flags: TruthFlags,
    ) -> Self {
        Self {
            id: id.into(),
            seed,
            traits,
            sex: Sex::Unspecified,
            reason_for_visit: "Work transfer".to_string(),
            dossier: Dossier::default(),
            truth_flags,
            exception_tags: Vec::new(),
            tells: None,
            responses: InterrogationResponses::default(),
            overrides: ManualOverrides::default(),
            procedural_portrait: false,
        }
    }

    pub fn with_dossier(mut self, dossier: Dossier) -> Self {
        self.dossier = dossier;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason_for_visit = reason.into();
        self
    }

    pub fn with_exception_tag(mut self, tag: ExceptionKind) -> Self {
        if !self.exception_tags.contains(&tag) {
            self.exception_tags.push(tag);
        }
        self
    }

    pub fn with_tells(mut self, tells: BpmTells) -> Self {
        self.tells = Some(tells);
        self
    }

    pub fn with_responses(mut self, responses: InterrogationResponses) -> Self {
        self.responses = responses;
        self
    }

    pub fn with_overrides(mut self, overrides: ManualOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn has_tag(&self, tag: ExceptionKind) -> bool {
        self.exception_tags.contains(&tag)
    }

    /// Origin after any manual override, which is what the player sees.
    pub fn effective_origin(&self) -> OriginWorld {
        self.overrides.origin.unwrap_or(self.traits.origin)
    }
}
