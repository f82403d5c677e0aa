//! Evidence synthesis: warrants, travel history, incident records.
//!
//! Evidence is generated once per subject from its seed and truth flags,
//! then never mutated. Every item must be explainable by the truth flags:
//! a subject without a warrant shows `NONE`, a subject with a transit
//! issue always has at least one flagged travel entry, and so on.
//!
//! # Draw Order
//!
//! All draws come from one [`SeededRandom`] in this fixed order:
//!
//! 1. warrant detail
//! 2. incident count
//! 3. travel history (count, then route / date / flag per entry, then
//!    the flag repair)
//! 4. discrepancies
//! 5. verification record fields
//!
//! Report text is rendered last and draws nothing. Reordering any step
//! changes the evidence produced for existing seeds.
//!
//! ```
//! use checkpoint_logic::evidence::{synthesize, NO_WARRANT};
//! use checkpoint_logic::subject::{SubjectSeed, SubjectTraits, TruthFlags};
//!
//! let flags = TruthFlags { has_transit_issue: true, ..TruthFlags::default() };
//! let seed = SubjectSeed::new("S-042", 42, SubjectTraits::default(), flags);
//! let evidence = synthesize(&seed);
//! assert_eq!(evidence.warrants, NO_WARRANT);
//! assert!(evidence.database_query.travel_history.iter().any(|t| t.flagged));
//! ```

use serde::{Deserialize, Serialize};

use crate::content;
use crate::random::SeededRandom;
use crate::subject::{SubjectSeed, TruthFlags};

/// Warrant sentinel for subjects with no active warrant.
pub const NO_WARRANT: &str = "NONE";

/// Lines of a list shown before the report collapses the rest.
pub const VISIBLE_REPORT_LINES: usize = 3;

/// Probability that a travel entry is flagged for a transit-issue subject.
pub const TRANSIT_FLAG_PROBABILITY: f64 = 0.5;

/// One leg of a subject's travel history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelEntry {
    pub from: String,
    pub to: String,
    pub date: String,
    pub flagged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_note: Option<String>,
}

/// Result of the travel database query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseQuery {
    pub travel_history: Vec<TravelEntry>,
    pub last_seen_location: String,
    pub last_seen_date: String,
    pub discrepancies: Vec<String>,
}

impl DatabaseQuery {
    pub fn flagged_entries(&self) -> impl Iterator<Item = &TravelEntry> {
        self.travel_history.iter().filter(|t| t.flagged)
    }
}

/// What a verification record was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationKind {
    Transit,
    Incident,
    Warrant,
}

impl VerificationKind {
    /// Pick the record type from truth flags. `None` when no record is due.
    pub fn for_flags(flags: &TruthFlags) -> Option<Self> {
        match (flags.has_incident, flags.has_warrant) {
            (true, _) if flags.has_transit_issue => Some(VerificationKind::Transit),
            (true, _) => Some(VerificationKind::Incident),
            (false, true) => Some(VerificationKind::Warrant),
            (false, false) => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VerificationKind::Transit => "TRANSIT",
            VerificationKind::Incident => "INCIDENT",
            VerificationKind::Warrant => "WARRANT",
        }
    }

    fn summaries(self) -> &'static [&'static str] {
        match self {
            VerificationKind::Transit => content::TRANSIT_SUMMARIES,
            VerificationKind::Incident => content::INCIDENT_SUMMARIES,
            VerificationKind::Warrant => content::WARRANT_SUMMARIES,
        }
    }

    fn contradictions(self) -> &'static [&'static str] {
        match self {
            VerificationKind::Transit => content::TRANSIT_CONTRADICTIONS,
            VerificationKind::Incident => content::INCIDENT_CONTRADICTIONS,
            VerificationKind::Warrant => content::WARRANT_CONTRADICTIONS,
        }
    }

    fn questions(self) -> &'static [&'static str] {
        match self {
            VerificationKind::Transit => content::TRANSIT_QUESTIONS,
            VerificationKind::Incident => content::INCIDENT_QUESTIONS,
            VerificationKind::Warrant => content::WARRANT_QUESTIONS,
        }
    }
}

/// Secondary document used to push an interrogation past the primary
/// evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub kind: VerificationKind,
    pub date: String,
    /// `VR-<nnnn>-<first 3 letters of kind>`.
    pub reference_id: String,
    pub source: String,
    pub summary: String,
    pub contradiction: String,
    pub question: String,
}

/// Evidence categories with a report block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceCategory {
    Warrant,
    Transit,
    Incident,
}

impl EvidenceCategory {
    pub const ALL: [EvidenceCategory; 3] = [
        EvidenceCategory::Warrant,
        EvidenceCategory::Transit,
        EvidenceCategory::Incident,
    ];
}

/// Precomputed report text per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceOutputs {
    pub warrant: String,
    pub transit: String,
    pub incident: String,
}

impl EvidenceOutputs {
    pub fn get(&self, category: EvidenceCategory) -> &str {
        match category {
            EvidenceCategory::Warrant => &self.warrant,
            EvidenceCategory::Transit => &self.transit,
            EvidenceCategory::Incident => &self.incident,
        }
    }
}

/// The full evidence bundle for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEvidence {
    /// Warrant detail, or [`NO_WARRANT`].
    pub warrants: String,
    pub incidents: u32,
    pub database_query: DatabaseQuery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_record: Option<VerificationRecord>,
    pub outputs: EvidenceOutputs,
}

impl SubjectEvidence {
    pub fn has_warrant(&self) -> bool {
        self.warrants != NO_WARRANT
    }
}

/// Synthesize evidence with a fresh random source seeded from `seed.seed`.
pub fn synthesize(seed: &SubjectSeed) -> SubjectEvidence {
    let mut rng = SeededRandom::new(seed.seed);
    synthesize_with(seed, &mut rng)
}

/// Synthesize evidence drawing from a caller-owned random source.
pub fn synthesize_with(seed: &SubjectSeed, rng: &mut SeededRandom) -> SubjectEvidence {
    let flags = &seed.truth_flags;

    let warrants = if flags.has_warrant {
        (*rng.pick(content::WARRANT_DETAILS)).to_string()
    } else {
        NO_WARRANT.to_string()
    };

    let incidents = if flags.has_incident {
        rng.int(1, 3) as u32
    } else {
        0
    };

    let travel_history = travel_history(flags, rng);
    if flags.has_transit_issue {
        debug_assert!(travel_history.iter().any(|t| t.flagged));
    }

    let discrepancies = if flags.has_incident {
        let count = rng.int(1, 3) as usize;
        rng.sample(content::INCIDENT_DISCREPANCIES, count)
            .into_iter()
            .map(|d| (*d).to_string())
            .collect()
    } else {
        Vec::new()
    };

    let verification_record =
        VerificationKind::for_flags(flags).map(|kind| verification_record(kind, rng));

    // travel_history always has at least one entry
    let (last_seen_location, last_seen_date) = travel_history
        .last()
        .map(|t| (t.to.clone(), t.date.clone()))
        .unwrap_or_else(|| ("UNKNOWN".to_string(), "UNKNOWN".to_string()));

    let database_query = DatabaseQuery {
        travel_history,
        last_seen_location,
        last_seen_date,
        discrepancies,
    };

    let outputs = EvidenceOutputs {
        warrant: warrant_report(&seed.id, &warrants),
        transit: transit_report(&seed.id, &database_query),
        incident: incident_report(
            &seed.id,
            incidents,
            &database_query,
            verification_record.as_ref(),
        ),
    };

    SubjectEvidence {
        warrants,
        incidents,
        database_query,
        verification_record,
        outputs,
    }
}

fn travel_history(flags: &TruthFlags, rng: &mut SeededRandom) -> Vec<TravelEntry> {
    let count = rng.int(1, 4) as usize;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let (from, to) = *rng.pick(content::TRANSIT_ROUTES);
        let date = synthetic_date(rng);
        let flagged = flags.has_transit_issue && rng.bool(TRANSIT_FLAG_PROBABILITY);
        let flag_note = flagged.then(|| (*rng.pick(content::TRANSIT_FLAG_NOTES)).to_string());
        entries.push(TravelEntry {
            from: from.to_string(),
            to: to.to_string(),
            date,
            flagged,
            flag_note,
        });
    }

    // A transit-issue subject must always show tangible evidence.
    if flags.has_transit_issue && !entries.iter().any(|t| t.flagged) {
        if let Some(first) = entries.first_mut() {
            log::trace!("no travel entry flagged by chance, flagging the first");
            first.flagged = true;
            first.flag_note = Some((*rng.pick(content::TRANSIT_FLAG_NOTES)).to_string());
        }
    }

    entries
}

fn verification_record(kind: VerificationKind, rng: &mut SeededRandom) -> VerificationRecord {
    let date = synthetic_date(rng);
    let number = rng.int(1000, 9999);
    let source = *rng.pick(content::VERIFICATION_SOURCES);
    let summary = *rng.pick(kind.summaries());
    let contradiction = *rng.pick(kind.contradictions());
    let question = *rng.pick(kind.questions());
    VerificationRecord {
        kind,
        date,
        reference_id: format!("VR-{number}-{}", &kind.label()[..3]),
        source: source.to_string(),
        summary: summary.to_string(),
        contradiction: contradiction.to_string(),
        question: question.to_string(),
    }
}

/// `YYYY.MM.DD` in the fixed record year. Month is drawn before day.
fn synthetic_date(rng: &mut SeededRandom) -> String {
    let month = rng.int(1, 12);
    let day = rng.int(1, 28);
    format!("{}.{month:02}.{day:02}", content::RECORD_YEAR)
}

// ── Report text ────────────────────────────────────────────────────────

fn warrant_report(subject_id: &str, warrants: &str) -> String {
    let mut lines = vec![format!("> QUERY WARRANT_DB --SUBJECT {subject_id}")];
    if warrants == NO_WARRANT {
        lines.push("STATUS: CLEAR".to_string());
        lines.push("NO OUTSTANDING WARRANTS".to_string());
    } else {
        lines.push("STATUS: ACTIVE WARRANT".to_string());
        lines.push(format!("DETAIL: {warrants}"));
    }
    lines.join("\n")
}

fn transit_report(subject_id: &str, query: &DatabaseQuery) -> String {
    let mut lines = vec![
        format!("> QUERY TRANSIT_LOG --SUBJECT {subject_id}"),
        format!("ENTRIES: {}", query.travel_history.len()),
    ];
    let rows = query.travel_history.iter().map(|t| match &t.flag_note {
        Some(note) if t.flagged => format!("{} {} -> {} [FLAG: {note}]", t.date, t.from, t.to),
        _ => format!("{} {} -> {}", t.date, t.from, t.to),
    });
    push_truncated(&mut lines, rows.collect());
    lines.push(format!(
        "LAST SEEN: {} // {}",
        query.last_seen_location, query.last_seen_date
    ));
    lines.join("\n")
}

fn incident_report(
    subject_id: &str,
    incidents: u32,
    query: &DatabaseQuery,
    record: Option<&VerificationRecord>,
) -> String {
    let mut lines = vec![
        format!("> QUERY INCIDENT_DB --SUBJECT {subject_id}"),
        format!("INCIDENTS ON FILE: {incidents}"),
    ];
    if query.discrepancies.is_empty() {
        lines.push("NO DISCREPANCIES".to_string());
    } else {
        let rows = query
            .discrepancies
            .iter()
            .map(|d| format!("DISCREPANCY: {d}"))
            .collect();
        push_truncated(&mut lines, rows);
    }
    if let Some(record) = record {
        lines.push(format!(
            "VERIFICATION: {} ({})",
            record.reference_id,
            record.kind.label()
        ));
    }
    lines.join("\n")
}

fn push_truncated(lines: &mut Vec<String>, rows: Vec<String>) {
    let hidden = rows.len().saturating_sub(VISIBLE_REPORT_LINES);
    lines.extend(rows.into_iter().take(VISIBLE_REPORT_LINES));
    if hidden > 0 {
        lines.push(format!("... {hidden} MORE"));
    } else {
        lines.push("END OF RECORD".to_string());
    }
}
