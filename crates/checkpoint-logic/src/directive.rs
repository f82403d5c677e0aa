//! Directive evaluation: the ground-truth verdict for a subject.
//!
//! A shift's [`DirectiveRule`] names one base condition that marks a
//! subject for denial, plus exceptions that let a matching subject
//! through. Some exceptions are declared to the player; others are hidden
//! and only discoverable through interrogation.
//!
//! # Verdict Rule
//!
//! | Base matches | Any exception (declared or hidden) | Verdict |
//! |--------------|------------------------------------|---------|
//! | yes | no | DENY |
//! | yes | yes | APPROVE |
//! | no | any | APPROVE |
//!
//! ```
//! use checkpoint_logic::directive::{
//!     evaluate, ConditionKind, DirectiveRule, ExceptionKind, Verdict,
//! };
//! use checkpoint_logic::subject::{HierarchyTier, SubjectSeed, SubjectTraits, TruthFlags};
//!
//! let directive =
//!     DirectiveRule::new(ConditionKind::Warrants).with_exceptions([ExceptionKind::Vip]);
//! let traits = SubjectTraits { hierarchy_tier: HierarchyTier::Vip, ..SubjectTraits::default() };
//! let flags = TruthFlags { has_warrant: true, ..TruthFlags::default() };
//! let seed = SubjectSeed::new("S-1", 7, traits, flags);
//!
//! let eval = evaluate(&seed, &directive);
//! assert_eq!(eval.outcome, Verdict::Approve);
//! assert_eq!(eval.matched.declared, vec![ExceptionKind::Vip]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;
use crate::subject::{HierarchyTier, OriginWorld, SubjectRole, SubjectSeed, SubjectType};

/// Player decision and ground-truth outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Approve,
    Deny,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Approve => write!(f, "APPROVE"),
            Verdict::Deny => write!(f, "DENY"),
        }
    }
}

/// Base conditions a directive can deny on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionKind {
    Warrants,
    Replicants,
    Synthetics,
    Engineers,
    TitanOrigin,
    IoOrigin,
    NonHumans,
    All,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 8] = [
        ConditionKind::Warrants,
        ConditionKind::Replicants,
        ConditionKind::Synthetics,
        ConditionKind::Engineers,
        ConditionKind::TitanOrigin,
        ConditionKind::IoOrigin,
        ConditionKind::NonHumans,
        ConditionKind::All,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ConditionKind::Warrants => "WARRANTS",
            ConditionKind::Replicants => "REPLICANTS",
            ConditionKind::Synthetics => "SYNTHETICS",
            ConditionKind::Engineers => "ENGINEERS",
            ConditionKind::TitanOrigin => "TITAN_ORIGIN",
            ConditionKind::IoOrigin => "IO_ORIGIN",
            ConditionKind::NonHumans => "NON_HUMANS",
            ConditionKind::All => "ALL",
        }
    }

    /// Player-facing wording for the briefing.
    pub fn describe(self) -> &'static str {
        match self {
            ConditionKind::Warrants => "SUBJECTS WITH ACTIVE WARRANTS",
            ConditionKind::Replicants => "REPLICANTS",
            ConditionKind::Synthetics => "SYNTHETIC SUBJECTS (REPLICANTS, ROBOTIC CYBORGS)",
            ConditionKind::Engineers => "ENGINEERING PERSONNEL",
            ConditionKind::TitanOrigin => "SUBJECTS ORIGINATING FROM TITAN",
            ConditionKind::IoOrigin => "SUBJECTS ORIGINATING FROM IO",
            ConditionKind::NonHumans => "ALL NON-HUMAN SUBJECTS",
            ConditionKind::All => "ALL SUBJECTS",
        }
    }

    /// Whether the subject falls under this condition.
    pub fn matches(self, seed: &SubjectSeed) -> bool {
        let traits = &seed.traits;
        match self {
            ConditionKind::Warrants => seed.truth_flags.has_warrant,
            ConditionKind::Replicants => traits.subject_type == SubjectType::Replicant,
            ConditionKind::Synthetics => traits.subject_type.is_synthetic(),
            ConditionKind::Engineers => traits.role == SubjectRole::Engineer,
            ConditionKind::TitanOrigin => seed.effective_origin() == OriginWorld::Titan,
            ConditionKind::IoOrigin => seed.effective_origin() == OriginWorld::Io,
            ConditionKind::NonHumans => traits.subject_type != SubjectType::Human,
            ConditionKind::All => true,
        }
    }
}

impl FromStr for ConditionKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        ConditionKind::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| {
                log::warn!("rejected directive condition {s:?}");
                ContentError::UnknownCondition(s.to_string())
            })
    }
}

/// Exceptions that let a base-matching subject through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExceptionKind {
    Humans,
    Vip,
    Medical,
    EarthOrigin,
    Cyborg,
    Diplomat,
    Emergency,
}

impl ExceptionKind {
    pub const ALL: [ExceptionKind; 7] = [
        ExceptionKind::Humans,
        ExceptionKind::Vip,
        ExceptionKind::Medical,
        ExceptionKind::EarthOrigin,
        ExceptionKind::Cyborg,
        ExceptionKind::Diplomat,
        ExceptionKind::Emergency,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ExceptionKind::Humans => "HUMANS",
            ExceptionKind::Vip => "VIP",
            ExceptionKind::Medical => "MEDICAL",
            ExceptionKind::EarthOrigin => "EARTH_ORIGIN",
            ExceptionKind::Cyborg => "CYBORG",
            ExceptionKind::Diplomat => "DIPLOMAT",
            ExceptionKind::Emergency => "EMERGENCY",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ExceptionKind::Humans => "BASELINE HUMANS",
            ExceptionKind::Vip => "VIP PASSHOLDERS",
            ExceptionKind::Medical => "MEDICAL PERSONNEL",
            ExceptionKind::EarthOrigin => "EARTH-BORN CITIZENS",
            ExceptionKind::Cyborg => "REGISTERED CYBORGS",
            ExceptionKind::Diplomat => "DIPLOMATIC STAFF",
            ExceptionKind::Emergency => "ACTIVE MEDICAL EMERGENCIES",
        }
    }

    /// Whether the subject qualifies, either by traits or by an explicit
    /// override tag on the seed.
    pub fn matches(self, seed: &SubjectSeed) -> bool {
        if seed.has_tag(self) {
            return true;
        }
        let traits = &seed.traits;
        match self {
            ExceptionKind::Humans => traits.subject_type == SubjectType::Human,
            ExceptionKind::Vip => traits.hierarchy_tier == HierarchyTier::Vip,
            ExceptionKind::Medical => traits.role == SubjectRole::Medic,
            ExceptionKind::EarthOrigin => seed.effective_origin() == OriginWorld::Earth,
            ExceptionKind::Cyborg => traits.subject_type.is_cyborg(),
            ExceptionKind::Diplomat => traits.role == SubjectRole::Diplomat,
            ExceptionKind::Emergency => seed.truth_flags.medical_emergency(),
        }
    }
}

impl FromStr for ExceptionKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        ExceptionKind::ALL
            .into_iter()
            .find(|e| e.code() == code)
            .ok_or_else(|| {
                log::warn!("rejected directive exception {s:?}");
                ContentError::UnknownException(s.to_string())
            })
    }
}

/// Checks the operator is told to run. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredCheck {
    Warrants,
    Transit,
    Incidents,
    Biometrics,
    Interrogation,
}

impl RequiredCheck {
    pub fn code(self) -> &'static str {
        match self {
            RequiredCheck::Warrants => "WARRANTS",
            RequiredCheck::Transit => "TRANSIT",
            RequiredCheck::Incidents => "INCIDENTS",
            RequiredCheck::Biometrics => "BIOMETRICS",
            RequiredCheck::Interrogation => "INTERROGATION",
        }
    }
}

/// The administrative rule active for a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveRule {
    pub base: ConditionKind,
    #[serde(default)]
    pub exceptions: Vec<ExceptionKind>,
    /// Exceptions withheld from the player's briefing.
    #[serde(default)]
    pub hidden_exceptions: Vec<ExceptionKind>,
    #[serde(default)]
    pub required_checks: Vec<RequiredCheck>,
}

impl DirectiveRule {
    pub fn new(base: ConditionKind) -> Self {
        Self {
            base,
            exceptions: Vec::new(),
            hidden_exceptions: Vec::new(),
            required_checks: Vec::new(),
        }
    }

    pub fn with_exceptions(mut self, exceptions: impl IntoIterator<Item = ExceptionKind>) -> Self {
        self.exceptions.extend(exceptions);
        self
    }

    pub fn with_hidden_exceptions(
        mut self,
        exceptions: impl IntoIterator<Item = ExceptionKind>,
    ) -> Self {
        self.hidden_exceptions.extend(exceptions);
        self
    }

    pub fn with_required_checks(mut self, checks: impl IntoIterator<Item = RequiredCheck>) -> Self {
        self.required_checks.extend(checks);
        self
    }

    /// Parse a single directive from authored JSON.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Player-facing directive text. Hidden exceptions never appear here.
    pub fn briefing(&self) -> String {
        let mut lines = vec![format!("DIRECTIVE: DENY ENTRY TO {}", self.base.describe())];
        if self.exceptions.is_empty() {
            lines.push("EXCEPTIONS: NONE".to_string());
        } else {
            let list: Vec<&str> = self.exceptions.iter().map(|e| e.describe()).collect();
            lines.push(format!("EXCEPTIONS: {}", list.join(", ")));
        }
        if !self.required_checks.is_empty() {
            let list: Vec<&str> = self.required_checks.iter().map(|c| c.code()).collect();
            lines.push(format!("REQUIRED CHECKS: {}", list.join(", ")));
        }
        lines.join("\n")
    }
}

/// Exceptions that applied to a subject, split by visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionMatch {
    pub declared: Vec<ExceptionKind>,
    pub hidden: Vec<ExceptionKind>,
}

impl ExceptionMatch {
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty() && self.hidden.is_empty()
    }

    /// Declared then hidden, in directive order.
    pub fn all(&self) -> Vec<ExceptionKind> {
        self.declared.iter().chain(&self.hidden).copied().collect()
    }

    /// The only list safe to show the player.
    pub fn visible(&self) -> &[ExceptionKind] {
        &self.declared
    }

    /// True when only a hidden exception saved the subject.
    pub fn hidden_only(&self) -> bool {
        self.declared.is_empty() && !self.hidden.is_empty()
    }
}

/// Result of evaluating a directive against one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub outcome: Verdict,
    pub base_match: bool,
    pub matched: ExceptionMatch,
}

/// Compute the ground-truth verdict for `seed` under `directive`.
pub fn evaluate(seed: &SubjectSeed, directive: &DirectiveRule) -> Evaluation {
    let base_match = directive.base.matches(seed);
    let matching = |list: &[ExceptionKind]| -> Vec<ExceptionKind> {
        list.iter().copied().filter(|e| e.matches(seed)).collect()
    };
    let matched = ExceptionMatch {
        declared: matching(&directive.exceptions),
        hidden: matching(&directive.hidden_exceptions),
    };
    let outcome = if base_match && matched.is_empty() {
        Verdict::Deny
    } else {
        Verdict::Approve
    };
    Evaluation {
        outcome,
        base_match,
        matched,
    }
}
