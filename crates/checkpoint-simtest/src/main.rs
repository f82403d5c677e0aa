//! Checkpoint Headless Verification Harness
//!
//! Sweeps seeds, directives, and authored scenarios through the pure
//! subject pipeline. Runs entirely in-process with no UI and no renderer.
//!
//! Usage:
//!   cargo run -p checkpoint-simtest
//!   cargo run -p checkpoint-simtest -- --verbose
//!
//! Library logging is routed through `RUST_LOG` (default `warn`).

use checkpoint_logic::directive::{evaluate, ConditionKind, DirectiveRule, ExceptionKind, Verdict};
use checkpoint_logic::director::{build, grade};
use checkpoint_logic::evidence::{EvidenceCategory, NO_WARRANT};
use checkpoint_logic::interrogation::{respond, Tone, QUESTIONS};
use checkpoint_logic::session::InterrogationSession;
use checkpoint_logic::shift::{parse_subjects, shift_directives};
use checkpoint_logic::subject::{
    HierarchyTier, OriginWorld, SubjectRole, SubjectSeed, SubjectTraits, SubjectType, TruthFlags,
};
use checkpoint_logic::tells::BiometricConfig;

// ── Authored scenarios (same JSON the game ships) ───────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

const SWEEP_SIZE: u64 = 512;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    if let Err(error) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("tracing already initialized: {error}");
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    init_tracing(verbose);
    println!("=== Checkpoint Verification Harness ===\n");

    let seeds = seed_sweep(SWEEP_SIZE);
    tracing::info!(subjects = seeds.len(), "seed sweep prepared");

    let mut results = Vec::new();

    // 1. Same seed, same subject
    results.extend(validate_determinism(&seeds, verbose));

    // 2. Evidence agrees with truth flags
    results.extend(validate_evidence(&seeds, verbose));

    // 3. Verdict rule across every directive shape
    results.extend(validate_verdicts(&seeds, verbose));

    // 4. Heart-rate readings stay in range
    results.extend(validate_biometrics(&seeds, verbose));

    // 5. Every question gets an answer
    results.extend(validate_responses(&seeds, verbose));

    // 6. Bundled shift presets and authored scenarios
    results.extend(validate_content(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );
    tracing::info!(passed, failed, "harness finished");

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Sweep inputs ────────────────────────────────────────────────────────

const SUBJECT_TYPES: [SubjectType; 4] = [
    SubjectType::Human,
    SubjectType::HumanCyborg,
    SubjectType::RobotCyborg,
    SubjectType::Replicant,
];

const TIERS: [HierarchyTier; 4] = [
    HierarchyTier::Lower,
    HierarchyTier::Standard,
    HierarchyTier::Upper,
    HierarchyTier::Vip,
];

const ORIGINS: [OriginWorld; 5] = [
    OriginWorld::Earth,
    OriginWorld::Io,
    OriginWorld::Titan,
    OriginWorld::Mars,
    OriginWorld::Europa,
];

const ROLES: [SubjectRole; 5] = [
    SubjectRole::Engineer,
    SubjectRole::Medic,
    SubjectRole::Diplomat,
    SubjectRole::Civilian,
    SubjectRole::Trader,
];

fn seed_sweep(count: u64) -> Vec<SubjectSeed> {
    (0..count)
        .map(|i| {
            let traits = SubjectTraits {
                subject_type: SUBJECT_TYPES[(i % 4) as usize],
                hierarchy_tier: TIERS[((i / 3) % 4) as usize],
                origin: ORIGINS[((i / 5) % 5) as usize],
                role: ROLES[((i / 7) % 5) as usize],
            };
            let flags = TruthFlags {
                has_warrant: i & 1 == 1,
                has_transit_issue: i & 2 == 2,
                has_incident: i & 4 == 4,
                has_medical_emergency: (i % 11 == 0).then_some(true),
            };
            SubjectSeed::new(format!("SIM-{i:04}"), i.wrapping_mul(2_654_435_761), traits, flags)
        })
        .collect()
}

fn directive_shapes() -> Vec<DirectiveRule> {
    let mut directives = Vec::new();
    for base in ConditionKind::ALL {
        directives.push(DirectiveRule::new(base));
        for exception in ExceptionKind::ALL {
            directives.push(DirectiveRule::new(base).with_exceptions([exception]));
            directives.push(DirectiveRule::new(base).with_hidden_exceptions([exception]));
        }
    }
    directives
}

fn fail_detail(failures: &[String], ok: &str) -> String {
    match failures.first() {
        None => ok.to_string(),
        Some(first) => format!("{} failures, first: {}", failures.len(), first),
    }
}

// ── 1. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(seeds: &[SubjectSeed], _verbose: bool) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();
    let directive = DirectiveRule::new(ConditionKind::All).with_exceptions([ExceptionKind::Vip]);

    let mut mismatches = Vec::new();
    for seed in seeds {
        let a = serde_json::to_string(&build(seed, &directive));
        let b = serde_json::to_string(&build(seed, &directive));
        match (a, b) {
            (Ok(a), Ok(b)) if a == b => {}
            (Ok(_), Ok(_)) => mismatches.push(seed.id.clone()),
            (Err(e), _) | (_, Err(e)) => mismatches.push(format!("{}: {}", seed.id, e)),
        }
    }
    results.push(TestResult {
        name: "determinism_rebuild_identical".into(),
        passed: mismatches.is_empty(),
        detail: fail_detail(&mismatches, &format!("{} subjects rebuilt identically", seeds.len())),
    });

    // Interview readings replay too
    let mut replay_failures = Vec::new();
    for seed in seeds.iter().take(64) {
        let subject = build(seed, &directive);
        let run = || {
            let mut session = InterrogationSession::new(&subject);
            QUESTIONS
                .iter()
                .map(|q| session.ask(q.id, Tone::Firm).bpm)
                .collect::<Vec<_>>()
        };
        if run() != run() {
            replay_failures.push(seed.id.clone());
        }
    }
    results.push(TestResult {
        name: "determinism_session_replay".into(),
        passed: replay_failures.is_empty(),
        detail: fail_detail(&replay_failures, "64 interviews replayed identically"),
    });

    results
}

// ── 2. Evidence ─────────────────────────────────────────────────────────

fn validate_evidence(seeds: &[SubjectSeed], verbose: bool) -> Vec<TestResult> {
    println!("--- Evidence ---");
    let mut results = Vec::new();
    let directive = DirectiveRule::new(ConditionKind::All);

    let mut warrant_bad = Vec::new();
    let mut incident_bad = Vec::new();
    let mut transit_bad = Vec::new();
    let mut record_bad = Vec::new();
    let mut history_lengths = [0u32; 5];

    for seed in seeds {
        let subject = build(seed, &directive);
        let ev = &subject.evidence;
        let flags = &seed.truth_flags;

        if (ev.warrants == NO_WARRANT) == flags.has_warrant {
            warrant_bad.push(seed.id.clone());
        }
        if (ev.incidents > 0) != flags.has_incident
            || ev.database_query.discrepancies.is_empty() == flags.has_incident
        {
            incident_bad.push(seed.id.clone());
        }
        if (ev.database_query.flagged_entries().count() > 0) != flags.has_transit_issue {
            transit_bad.push(seed.id.clone());
        }
        if ev.verification_record.is_some() != (flags.has_incident || flags.has_warrant) {
            record_bad.push(seed.id.clone());
        }
        let len = ev.database_query.travel_history.len();
        if let Some(slot) = history_lengths.get_mut(len) {
            *slot += 1;
        }
    }

    results.push(TestResult {
        name: "evidence_warrant_flag".into(),
        passed: warrant_bad.is_empty(),
        detail: fail_detail(&warrant_bad, "warrant text agrees with has_warrant"),
    });
    results.push(TestResult {
        name: "evidence_incident_flag".into(),
        passed: incident_bad.is_empty(),
        detail: fail_detail(
            &incident_bad,
            "incident count and discrepancies agree with has_incident",
        ),
    });
    results.push(TestResult {
        name: "evidence_transit_flag".into(),
        passed: transit_bad.is_empty(),
        detail: fail_detail(&transit_bad, "flagged travel agrees with has_transit_issue"),
    });
    results.push(TestResult {
        name: "evidence_verification_record".into(),
        passed: record_bad.is_empty(),
        detail: fail_detail(&record_bad, "verification record present iff incident or warrant"),
    });
    results.push(TestResult {
        name: "evidence_history_length".into(),
        passed: history_lengths[0] == 0,
        detail: format!("travel history lengths 1..=4: {:?}", &history_lengths[1..]),
    });

    if verbose {
        let sample = build(&seeds[7], &directive);
        println!("  Sample reports for {}:", sample.id);
        for category in EvidenceCategory::ALL {
            for line in sample.evidence.outputs.get(category).lines() {
                println!("    {}", line);
            }
        }
    }

    results
}

// ── 3. Verdicts ─────────────────────────────────────────────────────────

fn validate_verdicts(seeds: &[SubjectSeed], verbose: bool) -> Vec<TestResult> {
    println!("--- Directive Verdicts ---");
    let mut results = Vec::new();
    let directives = directive_shapes();

    let mut rule_bad = Vec::new();
    let mut leak_bad = Vec::new();
    let mut denies = 0u32;
    let mut checked = 0u32;

    for directive in &directives {
        for seed in seeds.iter().take(128) {
            let subject = build(seed, directive);
            let base = directive.base.matches(seed);
            let any_exception = directive
                .exceptions
                .iter()
                .chain(&directive.hidden_exceptions)
                .any(|e| e.matches(seed));
            let expected = if base && !any_exception {
                Verdict::Deny
            } else {
                Verdict::Approve
            };
            if subject.intended_outcome != expected
                || evaluate(seed, directive).outcome != expected
            {
                rule_bad.push(format!("{} under {}", seed.id, directive.base.code()));
            }
            if subject
                .exception_tags
                .visible()
                .iter()
                .any(|e| !directive.exceptions.contains(e))
            {
                leak_bad.push(format!("{} under {}", seed.id, directive.base.code()));
            }
            if expected == Verdict::Deny {
                denies += 1;
            }
            checked += 1;
        }
    }

    results.push(TestResult {
        name: "verdict_rule".into(),
        passed: rule_bad.is_empty(),
        detail: fail_detail(
            &rule_bad,
            &format!("{} evaluations across {} directives", checked, directives.len()),
        ),
    });
    results.push(TestResult {
        name: "verdict_hidden_not_visible".into(),
        passed: leak_bad.is_empty(),
        detail: fail_detail(&leak_bad, "no hidden exception reached the visible list"),
    });
    results.push(TestResult {
        name: "verdict_both_outcomes".into(),
        passed: denies > 0 && denies < checked,
        detail: format!("{} DENY / {} APPROVE", denies, checked - denies),
    });

    // ALL with no exceptions denies everyone
    let deny_all = DirectiveRule::new(ConditionKind::All);
    let all_denied = seeds
        .iter()
        .all(|s| evaluate(s, &deny_all).outcome == Verdict::Deny);
    results.push(TestResult {
        name: "verdict_all_denies_everyone".into(),
        passed: all_denied,
        detail: "ALL with no exceptions → DENY for every subject".into(),
    });

    if verbose {
        println!("  Deny rate by base condition (no exceptions):");
        for base in ConditionKind::ALL {
            let directive = DirectiveRule::new(base);
            let n = seeds
                .iter()
                .filter(|s| evaluate(s, &directive).outcome == Verdict::Deny)
                .count();
            println!("    {:13}: {}/{}", base.code(), n, seeds.len());
        }
    }

    results
}

// ── 4. Biometrics ───────────────────────────────────────────────────────

fn validate_biometrics(seeds: &[SubjectSeed], _verbose: bool) -> Vec<TestResult> {
    println!("--- Biometrics ---");
    check_biometrics(seeds, SCENARIOS_JSON)
}

fn check_biometrics(seeds: &[SubjectSeed], scenarios_json: &str) -> Vec<TestResult> {
    let mut results = Vec::new();
    let config = BiometricConfig::default();
    let directive = DirectiveRule::new(ConditionKind::All);

    let mut scenario_seeds = match parse_subjects(scenarios_json) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "biometrics_scenarios_parse".into(),
                passed: false,
                detail: format!("scenario parse error: {}", e),
            });
            Vec::new()
        }
    };
    scenario_seeds.extend(seeds.iter().take(64).cloned());

    let mut out_of_range = Vec::new();
    let mut readings = 0u32;
    for seed in &scenario_seeds {
        let subject = build(seed, &directive);
        let mut session = InterrogationSession::new(&subject);
        for q in QUESTIONS.iter() {
            let reading = session.ask(q.id, Tone::Harsh).bpm;
            readings += 1;
            if !(config.floor..=config.ceiling).contains(&reading) {
                out_of_range.push(format!("{} {} -> {}", seed.id, q.id, reading));
            }
        }
    }

    results.push(TestResult {
        name: "biometrics_in_range".into(),
        passed: out_of_range.is_empty(),
        detail: fail_detail(
            &out_of_range,
            &format!(
                "{} readings within {}..={} bpm",
                readings, config.floor, config.ceiling
            ),
        ),
    });

    results
}

// ── 5. Responses ────────────────────────────────────────────────────────

fn validate_responses(seeds: &[SubjectSeed], _verbose: bool) -> Vec<TestResult> {
    println!("--- Interrogation Responses ---");
    let mut results = Vec::new();
    let directive = DirectiveRule::new(ConditionKind::Warrants);

    let mut empty = Vec::new();
    let ids: Vec<&str> = QUESTIONS
        .iter()
        .map(|q| q.id)
        .chain(["", "unlisted-question"])
        .collect();
    for seed in seeds.iter().take(32) {
        let subject = build(seed, &directive);
        for id in &ids {
            for tone in [Tone::Soft, Tone::Firm, Tone::Harsh] {
                if respond(&subject, id, tone).is_empty() {
                    empty.push(format!("{} {:?} {}", seed.id, id, tone));
                }
            }
        }
    }

    results.push(TestResult {
        name: "responses_total".into(),
        passed: empty.is_empty(),
        detail: fail_detail(&empty, "every question answered in every tone"),
    });

    results
}

// ── 6. Content ──────────────────────────────────────────────────────────

fn validate_content(verbose: bool) -> Vec<TestResult> {
    println!("--- Shift Presets & Scenarios ---");
    let mut results = Vec::new();

    let shifts = match shift_directives() {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "content_presets_parse".into(),
                passed: false,
                detail: format!("preset parse error: {}", e),
            });
            return results;
        }
    };
    results.push(TestResult {
        name: "content_presets_parse".into(),
        passed: !shifts.is_empty(),
        detail: format!("{} shift presets loaded", shifts.len()),
    });

    let scenarios = match parse_subjects(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "content_scenarios_parse".into(),
                passed: false,
                detail: format!("scenario parse error: {}", e),
            });
            return results;
        }
    };
    results.push(TestResult {
        name: "content_scenarios_parse".into(),
        passed: !scenarios.is_empty(),
        detail: format!("{} authored scenarios loaded", scenarios.len()),
    });

    let mut decisive = 0u32;
    let mut grade_bad = Vec::new();
    for shift in &shifts {
        if verbose {
            println!("  Shift {}: {}", shift.shift, shift.title);
            for line in shift.directive.briefing().lines() {
                println!("    {}", line);
            }
        }
        for seed in &scenarios {
            let subject = build(seed, &shift.directive);
            let g = grade(&subject, subject.intended_outcome);
            if !g.correct {
                grade_bad.push(format!("shift {} {}", shift.shift, seed.id));
            }
            let flipped = match subject.intended_outcome {
                Verdict::Approve => Verdict::Deny,
                Verdict::Deny => Verdict::Approve,
            };
            if grade(&subject, flipped).correct {
                grade_bad.push(format!("shift {} {} flipped", shift.shift, seed.id));
            }
            if g.hidden_exception_decisive {
                decisive += 1;
            }
            if verbose {
                println!(
                    "    {} {:20} → {} (hidden decisive: {})",
                    subject.id, subject.name, subject.intended_outcome, g.hidden_exception_decisive
                );
            }
        }
    }
    results.push(TestResult {
        name: "content_grading".into(),
        passed: grade_bad.is_empty(),
        detail: fail_detail(&grade_bad, "ground-truth decisions grade correct, flipped ones don't"),
    });
    results.push(TestResult {
        name: "content_hidden_exceptions_matter".into(),
        passed: decisive > 0,
        detail: format!("{} scenario/shift pairs turned on a hidden exception", decisive),
    });

    let hidden_in_briefing = shifts.iter().any(|s| {
        let briefing = s.directive.briefing();
        s.directive
            .hidden_exceptions
            .iter()
            .filter(|e| !s.directive.exceptions.contains(e))
            .any(|e| briefing.contains(e.describe()))
    });
    results.push(TestResult {
        name: "content_briefing_hides_exceptions".into(),
        passed: !hidden_in_briefing,
        detail: "no briefing names a hidden exception".into(),
    });

    results
}
