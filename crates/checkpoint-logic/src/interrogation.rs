//! Interrogation responses: what a subject says when asked a question.
//!
//! Resolution order for `(subject, question_id, tone)`:
//!
//! 1. The subject's own entry for `question_id`. A single line is returned
//!    verbatim regardless of tone. A tone-tiered entry returns the
//!    requested tone, then falls back firm → soft → harsh, then to
//!    [`GENERIC_REFUSAL`].
//! 2. A canned answer keyed by the exact question id, some of which
//!    interpolate dossier fields.
//! 3. A neutral line for the requested tone.
//!
//! The resolver never fails and never returns an empty string.
//!
//! ```
//! use checkpoint_logic::interrogation::{respond, Tone};
//! use checkpoint_logic::subject::{Dossier, SubjectSeed, SubjectTraits, TruthFlags};
//!
//! let seed = SubjectSeed::new("S-1", 1, SubjectTraits::default(), TruthFlags::default())
//!     .with_dossier(Dossier { occupation: "engineer".into(), ..Dossier::default() });
//! assert!(respond(&seed, "identity-occupation", Tone::Firm).contains("engineer"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;
use crate::subject::{Dossier, OriginWorld, SubjectSeed};
use crate::tells::BpmTells;

/// Returned when a tiered entry has no usable tone at all.
pub const GENERIC_REFUSAL: &str = "I have nothing to say about that.";

/// How hard the operator presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Soft,
    #[default]
    Firm,
    Harsh,
}

impl Tone {
    /// Fixed order tried after the requested tone.
    pub const FALLBACK_ORDER: [Tone; 3] = [Tone::Firm, Tone::Soft, Tone::Harsh];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Soft => "soft",
            Tone::Firm => "firm",
            Tone::Harsh => "harsh",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(Tone::Soft),
            "firm" => Ok(Tone::Firm),
            "harsh" => Ok(Tone::Harsh),
            _ => Err(ContentError::UnknownTone(s.to_string())),
        }
    }
}

/// Tone variants of one answer. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneTiers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harsh: Option<String>,
}

impl ToneTiers {
    pub fn get(&self, tone: Tone) -> Option<&str> {
        let line = match tone {
            Tone::Soft => self.soft.as_deref(),
            Tone::Firm => self.firm.as_deref(),
            Tone::Harsh => self.harsh.as_deref(),
        };
        line.filter(|l| !l.is_empty())
    }

    /// Requested tone, then firm → soft → harsh, then the generic refusal.
    pub fn resolve(&self, tone: Tone) -> &str {
        std::iter::once(tone)
            .chain(Tone::FALLBACK_ORDER)
            .find_map(|t| self.get(t))
            .unwrap_or(GENERIC_REFUSAL)
    }
}

/// One scripted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEntry {
    Line(String),
    Tiered(ToneTiers),
}

impl ResponseEntry {
    pub fn resolve(&self, tone: Tone) -> &str {
        match self {
            ResponseEntry::Line(line) if !line.is_empty() => line,
            ResponseEntry::Line(_) => GENERIC_REFUSAL,
            ResponseEntry::Tiered(tiers) => tiers.resolve(tone),
        }
    }
}

/// Per-subject scripted answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterrogationResponses {
    entries: BTreeMap<String, ResponseEntry>,
}

impl InterrogationResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, question_id: &str) -> Option<&ResponseEntry> {
        self.entries.get(question_id)
    }

    pub fn insert(&mut self, question_id: impl Into<String>, entry: ResponseEntry) {
        self.entries.insert(question_id.into(), entry);
    }

    pub fn with_line(mut self, question_id: impl Into<String>, line: impl Into<String>) -> Self {
        self.insert(question_id, ResponseEntry::Line(line.into()));
        self
    }

    pub fn with_tiers(mut self, question_id: impl Into<String>, tiers: ToneTiers) -> Self {
        self.insert(question_id, ResponseEntry::Tiered(tiers));
        self
    }
}

/// Anything that can be questioned at the booth.
pub trait Interviewee {
    fn subject_seed(&self) -> u64;
    fn display_name(&self) -> &str;
    fn dossier(&self) -> &Dossier;
    fn reason_for_visit(&self) -> &str;
    fn origin(&self) -> OriginWorld;
    fn responses(&self) -> &InterrogationResponses;
    fn tells(&self) -> Option<&BpmTells>;
}

impl Interviewee for SubjectSeed {
    fn subject_seed(&self) -> u64 {
        self.seed
    }

    fn display_name(&self) -> &str {
        self.overrides.name.as_deref().unwrap_or(self.id.as_str())
    }

    fn dossier(&self) -> &Dossier {
        &self.dossier
    }

    fn reason_for_visit(&self) -> &str {
        self.overrides
            .reason_for_visit
            .as_deref()
            .unwrap_or(self.reason_for_visit.as_str())
    }

    fn origin(&self) -> OriginWorld {
        self.effective_origin()
    }

    fn responses(&self) -> &InterrogationResponses {
        &self.responses
    }

    fn tells(&self) -> Option<&BpmTells> {
        self.tells.as_ref()
    }
}

// ── Question catalog ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionCategory {
    Identity,
    Warrant,
    Transit,
    Incident,
    Verification,
    Personality,
    Pressure,
}

/// A question the operator can ask, with its on-screen prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub category: QuestionCategory,
    pub prompt: &'static str,
}

const fn q(id: &'static str, category: QuestionCategory, prompt: &'static str) -> Question {
    Question {
        id,
        category,
        prompt,
    }
}

/// Every question with a canned answer.
pub static QUESTIONS: &[Question] = &[
    q("identity-name", QuestionCategory::Identity, "State your name."),
    q("identity-occupation", QuestionCategory::Identity, "What do you do for work?"),
    q("identity-address", QuestionCategory::Identity, "Where do you live?"),
    q("identity-origin", QuestionCategory::Identity, "Where are you coming from?"),
    q("identity-purpose", QuestionCategory::Identity, "What is the purpose of your visit?"),
    q("warrant-status", QuestionCategory::Warrant, "Are you wanted anywhere?"),
    q("warrant-explain", QuestionCategory::Warrant, "Explain this warrant."),
    q("transit-history", QuestionCategory::Transit, "Walk me through your recent travel."),
    q("transit-flagged", QuestionCategory::Transit, "Why was this leg flagged?"),
    q("transit-last-seen", QuestionCategory::Transit, "Where were you before this checkpoint?"),
    q("incident-record", QuestionCategory::Incident, "Tell me about the incident on your record."),
    q("incident-explain", QuestionCategory::Incident, "Why were you involved?"),
    q("verification-record", QuestionCategory::Verification, "Do you recognize this document?"),
    q(
        "verification-contradiction",
        QuestionCategory::Verification,
        "Your story doesn't match the record. Explain.",
    ),
    q("personality-calm", QuestionCategory::Personality, "You seem very calm."),
    q("personality-nervous", QuestionCategory::Personality, "Why are you nervous?"),
    q("pressure-lying", QuestionCategory::Pressure, "I think you're lying to me."),
    q("pressure-synthetic", QuestionCategory::Pressure, "Are you synthetic?"),
    q("pressure-fingerprint", QuestionCategory::Pressure, "Your fingerprints don't scan. Why?"),
    q("pressure-surgery", QuestionCategory::Pressure, "Have you had any surgery recently?"),
];

pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Resolve the line a subject speaks.
pub fn respond(subject: &impl Interviewee, question_id: &str, tone: Tone) -> String {
    if let Some(entry) = subject.responses().get(question_id) {
        return entry.resolve(tone).to_string();
    }
    canned_answer(subject, question_id).unwrap_or_else(|| neutral_answer(tone).to_string())
}

fn canned_answer(subject: &impl Interviewee, question_id: &str) -> Option<String> {
    let dossier = subject.dossier();
    let line = match question_id {
        "identity-name" => format!("{}. It's on the papers.", subject.display_name()),
        "identity-occupation" => format!("I work as a {}.", dossier.occupation),
        "identity-address" => format!("I live at {}.", dossier.address),
        "identity-origin" => format!(
            "I came up from {}. Born and raised.",
            subject.origin().display_name()
        ),
        "identity-purpose" => format!("{}. That's all.", subject.reason_for_visit()),
        "warrant-status" => "Wanted? No. There must be some mistake.".to_string(),
        "warrant-explain" => "Whatever that says, it was settled. Check again.".to_string(),
        "transit-history" => "The usual routes. Nothing out of the ordinary.".to_string(),
        "transit-flagged" => "The ship changed course. That wasn't my call.".to_string(),
        "transit-last-seen" => format!(
            "On {} before this, like I said.",
            subject.origin().display_name()
        ),
        "incident-record" => "A misunderstanding. Nobody got hurt.".to_string(),
        "incident-explain" => "Wrong place, wrong time.".to_string(),
        "verification-record" => "I've never seen that document before.".to_string(),
        "verification-contradiction" => "Clerks make mistakes. It happens.".to_string(),
        "personality-calm" => "I'm calm. Why wouldn't I be?".to_string(),
        "personality-nervous" => "Long trip. I'm tired, that's all.".to_string(),
        "pressure-lying" => "I'm telling you the truth.".to_string(),
        "pressure-synthetic" => "I'm as human as you. Run whatever test you like.".to_string(),
        "pressure-fingerprint" => "Old burn scars. They never scan right.".to_string(),
        "pressure-surgery" => match &dossier.employer {
            Some(employer) => format!("Standard work, paid for by {employer}. Nothing illegal."),
            None => "Standard medical work. Nothing illegal.".to_string(),
        },
        _ => return None,
    };
    Some(line)
}

fn neutral_answer(tone: Tone) -> &'static str {
    match tone {
        Tone::Soft => "I... I'm not sure what you want me to say.",
        Tone::Firm => "I don't understand the question.",
        Tone::Harsh => "I'm not answering that.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::{SubjectTraits, TruthFlags};

    fn subject() -> SubjectSeed {
        SubjectSeed::new("S-9", 9, SubjectTraits::default(), TruthFlags::default())
            .with_dossier(Dossier {
                occupation: "engineer".into(),
                address: "12 Kepler Row".into(),
                employer: None,
            })
            .with_reason("Visiting family")
    }

    #[test]
    fn occupation_interpolated() {
        let line = respond(&subject(), "identity-occupation", Tone::Firm);
        assert!(line.contains("engineer"));
    }

    #[test]
    fn dossier_fields_interpolated() {
        let s = subject();
        assert!(respond(&s, "identity-address", Tone::Soft).contains("12 Kepler Row"));
        assert!(respond(&s, "identity-purpose", Tone::Harsh).contains("Visiting family"));
        assert!(respond(&s, "identity-origin", Tone::Firm).contains("Mars"));
    }

    #[test]
    fn single_line_ignores_tone() {
        let s = subject().with_responses(
            InterrogationResponses::new().with_line("identity-name", "Call me Vex."),
        );
        for tone in [Tone::Soft, Tone::Firm, Tone::Harsh] {
            assert_eq!(respond(&s, "identity-name", tone), "Call me Vex.");
        }
    }

    #[test]
    fn tiered_returns_requested_tone() {
        let tiers = ToneTiers {
            soft: Some("soft line".into()),
            firm: Some("firm line".into()),
            harsh: Some("harsh line".into()),
        };
        let s = subject()
            .with_responses(InterrogationResponses::new().with_tiers("pressure-lying", tiers));
        assert_eq!(respond(&s, "pressure-lying", Tone::Soft), "soft line");
        assert_eq!(respond(&s, "pressure-lying", Tone::Harsh), "harsh line");
    }

    #[test]
    fn tiered_fallback_order() {
        let soft_and_harsh = ToneTiers {
            soft: Some("soft".into()),
            firm: None,
            harsh: Some("harsh".into()),
        };
        // firm missing -> soft before harsh
        assert_eq!(soft_and_harsh.resolve(Tone::Firm), "soft");

        let harsh_only = ToneTiers {
            harsh: Some("harsh".into()),
            ..ToneTiers::default()
        };
        assert_eq!(harsh_only.resolve(Tone::Soft), "harsh");

        let firm_only = ToneTiers {
            firm: Some("firm".into()),
            ..ToneTiers::default()
        };
        assert_eq!(firm_only.resolve(Tone::Harsh), "firm");

        assert_eq!(ToneTiers::default().resolve(Tone::Soft), GENERIC_REFUSAL);
    }

    #[test]
    fn empty_tiers_refuse_instead_of_canned() {
        let s = subject().with_responses(
            InterrogationResponses::new().with_tiers("identity-occupation", ToneTiers::default()),
        );
        assert_eq!(respond(&s, "identity-occupation", Tone::Firm), GENERIC_REFUSAL);
    }

    #[test]
    fn unknown_question_uses_neutral_tone() {
        let s = subject();
        assert_eq!(respond(&s, "weather", Tone::Soft), neutral_answer(Tone::Soft));
        assert_eq!(respond(&s, "weather", Tone::default()), "I don't understand the question.");
        assert_eq!(respond(&s, "", Tone::Harsh), "I'm not answering that.");
    }

    #[test]
    fn every_catalog_question_has_canned_answer() {
        assert_eq!(QUESTIONS.len(), 20);
        let s = subject();
        for question in QUESTIONS {
            let line = canned_answer(&s, question.id);
            assert!(line.is_some_and(|l| !l.is_empty()), "{}", question.id);
        }
    }

    #[test]
    fn responses_total() {
        let scripted = subject().with_responses(
            InterrogationResponses::new()
                .with_line("warrant-status", "")
                .with_tiers("transit-history", ToneTiers::default()),
        );
        let ids: Vec<&str> = QUESTIONS
            .iter()
            .map(|q| q.id)
            .chain(["", "unknown", "IDENTITY-NAME"])
            .collect();
        for s in [subject(), scripted] {
            for id in &ids {
                for tone in [Tone::Soft, Tone::Firm, Tone::Harsh] {
                    assert!(!respond(&s, id, tone).is_empty(), "{id} / {tone}");
                }
            }
        }
    }

    #[test]
    fn responses_parse_untagged() {
        let json = r#"{
            "identity-name": "Just Vex.",
            "pressure-lying": {"soft": "Please, I'm honest.", "harsh": "Back off."}
        }"#;
        let parsed: InterrogationResponses =
            serde_json::from_str(json).expect("responses should parse");
        assert_eq!(parsed.len(), 2);
        assert_eq!(
            parsed.get("identity-name"),
            Some(&ResponseEntry::Line("Just Vex.".into()))
        );
        let entry = parsed.get("pressure-lying").expect("tiered entry");
        assert_eq!(entry.resolve(Tone::Firm), "Please, I'm honest.");
    }

    #[test]
    fn tone_parsing() {
        assert_eq!("HARSH".parse::<Tone>().ok(), Some(Tone::Harsh));
        assert!(matches!("gentle".parse::<Tone>(), Err(ContentError::UnknownTone(_))));
        assert_eq!(Tone::default(), Tone::Firm);
    }

    #[test]
    fn catalog_lookup() {
        let q = find_question("pressure-synthetic").expect("catalog entry");
        assert_eq!(q.category, QuestionCategory::Pressure);
        assert!(find_question("nope").is_none());
    }
}
