//! Static content tables owned by the verification core.
//!
//! The cardinality and order of every table here is part of the seeded
//! reproducibility contract: adding, removing, or reordering an entry
//! changes which value a given seed draws. Append-only edits still shift
//! distributions, so treat any change as a content version bump.

/// Warrant details, drawn when a subject carries an active warrant.
pub static WARRANT_DETAILS: &[&str] = &[
    "OUTSTANDING: UNPAID HABITAT LEVY // CERES FISCAL AUTHORITY",
    "OUTSTANDING: BREACH OF LABOR CONTRACT // TITAN MINING GUILD",
    "OUTSTANDING: SMUGGLING OF RESTRICTED BIOMATTER // CUSTOMS DIV. 4",
    "OUTSTANDING: ASSAULT ON A TRANSIT OFFICER // IO PORT AUTHORITY",
    "OUTSTANDING: IDENTITY FRAUD // COLONIAL REGISTRY",
    "OUTSTANDING: UNLICENSED AUGMENTATION SURGERY // MEDICAL BOARD",
    "OUTSTANDING: DESERTION FROM SECURITY DETAIL // GANYMEDE GARRISON",
    "OUTSTANDING: THEFT OF REACTOR COMPONENTS // EUROPA DEEP STATION",
];

/// Transit routes as `(from, to)` pairs.
pub static TRANSIT_ROUTES: &[(&str, &str)] = &[
    ("EARTH ORBITAL", "LUNA GATE"),
    ("LUNA GATE", "MARS HIGH PORT"),
    ("MARS HIGH PORT", "CERES RING"),
    ("CERES RING", "GANYMEDE DOCKS"),
    ("GANYMEDE DOCKS", "IO FOUNDRY"),
    ("IO FOUNDRY", "EUROPA DEEP STATION"),
    ("EUROPA DEEP STATION", "CALLISTO RELAY"),
    ("CALLISTO RELAY", "TITAN REFINERY"),
    ("TITAN REFINERY", "ENCELADUS OUTPOST"),
    ("ENCELADUS OUTPOST", "MARS HIGH PORT"),
];

/// Notes attached to flagged travel entries.
pub static TRANSIT_FLAG_NOTES: &[&str] = &[
    "MANIFEST MISMATCH",
    "UNSCHEDULED LAYOVER",
    "TRANSPONDER GAP",
    "ROUTE NOT FILED",
    "QUARANTINE ZONE BYPASS",
    "DUPLICATE BOARDING RECORD",
];

/// Discrepancies surfaced by incident records.
pub static INCIDENT_DISCREPANCIES: &[&str] = &[
    "BIOMETRIC HASH DOES NOT MATCH REGISTRY",
    "EMPLOYER DENIES CURRENT CONTRACT",
    "DECLARED CARGO WEIGHT OFF BY 14%",
    "ADDRESS LISTED AS CONDEMNED HABITAT",
    "MEDICAL CLEARANCE ISSUED POSTHUMOUSLY",
    "ENTRY STAMP PREDATES PERMIT",
    "FINGERPRINT RIDGE COUNT INCONSISTENT",
    "NEXT OF KIN RECORD SEALED",
];

/// Issuing sources for verification records.
pub static VERIFICATION_SOURCES: &[&str] = &[
    "COLONIAL REGISTRY",
    "TRANSIT AUTHORITY LEDGER",
    "SECURITY DIVISION ARCHIVE",
    "PORT CUSTOMS OFFICE",
    "INTERPLANETARY COURT CLERK",
];

pub static TRANSIT_SUMMARIES: &[&str] = &[
    "Subject's ship logged an undeclared stop between scheduled ports.",
    "Boarding record shows two departures on the same cycle.",
    "Cargo manifest lists a passenger matching subject under another name.",
];

pub static INCIDENT_SUMMARIES: &[&str] = &[
    "Subject named in a dock altercation report.",
    "Subject detained briefly for questioning and released.",
    "Subject filed a complaint later withdrawn without explanation.",
];

pub static WARRANT_SUMMARIES: &[&str] = &[
    "Warrant issued after subject missed a mandatory hearing.",
    "Warrant transferred from a neighboring jurisdiction.",
    "Warrant reissued after an administrative lapse.",
];

pub static TRANSIT_CONTRADICTIONS: &[&str] = &[
    "Subject claims a direct route; ledger shows a layover.",
    "Subject states this is their first crossing; records show prior entry.",
    "Declared departure port was closed on the logged date.",
];

pub static INCIDENT_CONTRADICTIONS: &[&str] = &[
    "Subject reports a clean record; archive lists an open incident.",
    "Witness statement places subject at the scene.",
    "Subject's alibi conflicts with their own shift log.",
];

pub static WARRANT_CONTRADICTIONS: &[&str] = &[
    "Subject denies any legal trouble; court clerk confirms a warrant.",
    "Subject claims the warrant was cleared; no clearance is on file.",
    "Subject's identity papers were issued after the warrant date.",
];

pub static TRANSIT_QUESTIONS: &[&str] = &[
    "Why does your route include a stop you never declared?",
    "Who were you travelling with on your last crossing?",
    "Explain the gap in your transponder history.",
];

pub static INCIDENT_QUESTIONS: &[&str] = &[
    "What happened on the day of the reported incident?",
    "Why did you withdraw your complaint?",
    "Can anyone confirm where you were that shift?",
];

pub static WARRANT_QUESTIONS: &[&str] = &[
    "Are you aware there is a warrant in your name?",
    "Why did you miss your hearing?",
    "Who told you the warrant was cleared?",
];

/// Fixed year stamped on synthetic dates.
pub const RECORD_YEAR: u32 = 3184;
