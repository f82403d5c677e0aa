//! Subject director: builds one game-ready subject per seed.
//!
//! The director asks the factory for a named individual, synthesizes
//! evidence, evaluates the shift directive, and merges the results into a
//! [`SubjectData`]. It draws no randomness of its own: evidence and
//! naming each seed their own source from `seed.seed`, so repeated builds
//! agree byte for byte.
//!
//! ```
//! use checkpoint_logic::directive::{ConditionKind, DirectiveRule, Verdict};
//! use checkpoint_logic::director::build;
//! use checkpoint_logic::subject::{SubjectSeed, SubjectTraits, TruthFlags};
//!
//! let flags = TruthFlags { has_warrant: true, ..TruthFlags::default() };
//! let seed = SubjectSeed::new("S-1", 42, SubjectTraits::default(), flags);
//! let subject = build(&seed, &DirectiveRule::new(ConditionKind::Warrants));
//! assert_eq!(subject.intended_outcome, Verdict::Deny);
//! assert!(subject.evidence.has_warrant());
//! ```

use serde::{Deserialize, Serialize};

use crate::directive::{evaluate, DirectiveRule, ExceptionMatch, RequiredCheck, Verdict};
use crate::evidence::{synthesize, SubjectEvidence};
use crate::factory::{FactoryOptions, ProceduralFactory, SubjectFactory};
use crate::interrogation::{InterrogationResponses, Interviewee};
use crate::subject::{
    Dossier, ManualOverrides, OriginWorld, Sex, SubjectSeed, SubjectTraits, TruthFlags,
};
use crate::tells::BpmTells;

/// A fully enriched subject, ready for the booth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectData {
    pub id: String,
    pub name: String,
    pub sex: Sex,
    pub traits: SubjectTraits,
    pub reason_for_visit: String,
    pub dossier: Dossier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait_seed: Option<u64>,
    #[serde(flatten)]
    pub evidence: SubjectEvidence,
    pub intended_outcome: Verdict,
    /// Whether the directive's base condition applied.
    pub directive_match: bool,
    pub required_checks: Vec<RequiredCheck>,
    pub truth_flags: TruthFlags,
    /// Exceptions that applied. Only `declared` may reach the player.
    pub exception_tags: ExceptionMatch,
    pub seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tells: Option<BpmTells>,
    #[serde(default, skip_serializing_if = "InterrogationResponses::is_empty")]
    pub responses: InterrogationResponses,
}

impl Interviewee for SubjectData {
    fn subject_seed(&self) -> u64 {
        self.seed
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn dossier(&self) -> &Dossier {
        &self.dossier
    }

    fn reason_for_visit(&self) -> &str {
        &self.reason_for_visit
    }

    fn origin(&self) -> OriginWorld {
        self.traits.origin
    }

    fn responses(&self) -> &InterrogationResponses {
        &self.responses
    }

    fn tells(&self) -> Option<&BpmTells> {
        self.tells.as_ref()
    }
}

/// Build with the procedural stand-in factory.
pub fn build(seed: &SubjectSeed, directive: &DirectiveRule) -> SubjectData {
    build_with(&ProceduralFactory, seed, directive)
}

/// Build with a caller-supplied factory.
pub fn build_with(
    factory: &impl SubjectFactory,
    seed: &SubjectSeed,
    directive: &DirectiveRule,
) -> SubjectData {
    // The seed's own id and reason are authoritative unless the author
    // overrode them explicitly.
    let overrides = ManualOverrides {
        id: seed.overrides.id.clone().or_else(|| Some(seed.id.clone())),
        reason_for_visit: seed
            .overrides
            .reason_for_visit
            .clone()
            .or_else(|| Some(seed.reason_for_visit.clone())),
        ..seed.overrides.clone()
    };
    let options = FactoryOptions {
        seed: seed.seed,
        procedural_portrait: seed.procedural_portrait,
        overrides,
    };
    let base = factory.create_from_traits(&seed.traits, seed.sex, &options);

    let evidence = synthesize(seed);
    let evaluation = evaluate(seed, directive);

    log::debug!(
        "built subject {} (seed {}): {} base_match={} declared={} hidden={}",
        base.id,
        seed.seed,
        evaluation.outcome,
        evaluation.base_match,
        evaluation.matched.declared.len(),
        evaluation.matched.hidden.len(),
    );

    SubjectData {
        id: base.id,
        name: base.name,
        sex: base.sex,
        traits: base.traits,
        reason_for_visit: base.reason_for_visit,
        dossier: seed.dossier.clone(),
        portrait_seed: base.portrait_seed,
        evidence,
        intended_outcome: evaluation.outcome,
        directive_match: evaluation.base_match,
        required_checks: directive.required_checks.clone(),
        truth_flags: seed.truth_flags,
        exception_tags: evaluation.matched,
        seed: seed.seed,
        tells: seed.tells,
        responses: seed.responses.clone(),
    }
}

/// How a player's decision compares to the ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionGrade {
    pub decision: Verdict,
    pub expected: Verdict,
    pub correct: bool,
    /// The base condition applied and only a hidden exception let the
    /// subject through, so the briefing alone pointed at DENY.
    pub hidden_exception_decisive: bool,
}

/// Grade a player's decision against a built subject.
pub fn grade(subject: &SubjectData, decision: Verdict) -> DecisionGrade {
    let expected = subject.intended_outcome;
    DecisionGrade {
        decision,
        expected,
        correct: decision == expected,
        hidden_exception_decisive: subject.directive_match && subject.exception_tags.hidden_only(),
    }
}
