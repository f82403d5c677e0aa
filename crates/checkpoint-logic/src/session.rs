//! Interrogation session: asks questions and records the readings.
//!
//! A session owns its own random source, derived from the subject seed
//! on a separate stream, so biometric jitter never disturbs evidence
//! draws. Question numbers start at 1 and climb with every question,
//! which is what raises pressure over the course of an interview.

use serde::{Deserialize, Serialize};

use crate::interrogation::{respond, Interviewee, Tone};
use crate::random::SeededRandom;
use crate::tells::{bpm_with_config, BiometricConfig};

/// Mixed into the subject seed for the biometric stream.
const BIOMETRIC_STREAM: u64 = 0x4250_4D00;

/// One question and what came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question_number: u32,
    pub question_id: String,
    pub tone: Tone,
    pub line: String,
    pub bpm: u32,
}

/// One interview with one subject.
///
/// The session borrows its subject so every question is answered by the
/// same subject whose seed drives the biometric stream.
pub struct InterrogationSession<'a, S: Interviewee> {
    subject: &'a S,
    rng: SeededRandom,
    config: BiometricConfig,
    base_bpm: u32,
    exchanges: Vec<Exchange>,
}

impl<'a, S: Interviewee> InterrogationSession<'a, S> {
    pub fn new(subject: &'a S) -> Self {
        Self::with_config(subject, BiometricConfig::default())
    }

    pub fn with_config(subject: &'a S, config: BiometricConfig) -> Self {
        Self {
            subject,
            rng: SeededRandom::new(subject.subject_seed() ^ BIOMETRIC_STREAM),
            base_bpm: config.resting_bpm,
            config,
            exchanges: Vec::new(),
        }
    }

    pub fn subject(&self) -> &'a S {
        self.subject
    }

    /// Ask one question. The line and reading are recorded and returned.
    pub fn ask(&mut self, question_id: &str, tone: Tone) -> &Exchange {
        let question_number = self.exchanges.len() as u32 + 1;
        let line = respond(self.subject, question_id, tone);
        let reading = bpm_with_config(
            self.base_bpm,
            question_id,
            question_number,
            self.subject.tells(),
            &mut self.rng,
            &self.config,
        );
        log::trace!("q{question_number} {question_id} ({tone}) -> {reading} bpm");
        self.exchanges.push(Exchange {
            question_number,
            question_id: question_id.to_string(),
            tone,
            line,
            bpm: reading,
        });
        self.exchanges.last().unwrap_or_else(|| unreachable!("exchange was just recorded"))
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn questions_asked(&self) -> u32 {
        self.exchanges.len() as u32
    }

    /// Highest reading so far, if anything has been asked.
    pub fn peak_bpm(&self) -> Option<u32> {
        self.exchanges.iter().map(|e| e.bpm).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::{SubjectSeed, SubjectTraits, TruthFlags};
    use crate::tells::{BpmTells, TellType};

    fn subject() -> SubjectSeed {
        SubjectSeed::new("S-S", 21, SubjectTraits::default(), TruthFlags::default())
    }

    #[test]
    fn question_numbers_climb() {
        let s = subject();
        let mut session = InterrogationSession::new(&s);
        assert_eq!(session.peak_bpm(), None);
        for id in ["identity-name", "identity-origin", "pressure-lying"] {
            session.ask(id, Tone::Firm);
        }
        let numbers: Vec<u32> = session.exchanges().iter().map(|e| e.question_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(session.questions_asked(), 3);
        assert!(session.peak_bpm().is_some());
    }

    #[test]
    fn sessions_replay_identically() {
        let s = subject().with_tells(BpmTells {
            tell_type: Some(TellType::FalsePositive),
            is_genuinely_stressed: true,
            ..BpmTells::default()
        });
        let run = || {
            let mut session = InterrogationSession::new(&s);
            for id in ["identity-name", "pressure-synthetic", "warrant-status"] {
                session.ask(id, Tone::Harsh);
            }
            session.exchanges().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn readings_stay_bounded_over_long_sessions() {
        let s = subject().with_tells(BpmTells {
            base_elevation: 30.0,
            tell_type: Some(TellType::Contradiction),
            ..BpmTells::default()
        });
        let mut session = InterrogationSession::new(&s);
        for _ in 0..40 {
            let bpm = session.ask("pressure-fingerprint", Tone::Harsh).bpm;
            assert!((40..=150).contains(&bpm));
        }
        assert_eq!(session.peak_bpm(), Some(150));
    }

    #[test]
    fn lines_come_from_resolver() {
        let s = subject();
        let mut session = InterrogationSession::new(&s);
        let line = session.ask("no-such-question", Tone::Soft).line.clone();
        assert_eq!(line, respond(&s, "no-such-question", Tone::Soft));
    }

    #[test]
    fn answers_come_from_the_bound_subject() {
        let s = subject().with_responses(
            crate::interrogation::InterrogationResponses::new()
                .with_line("identity-name", "Mara. Mara Quell."),
        );
        let mut session = InterrogationSession::new(&s);
        assert_eq!(session.subject().id, "S-S");
        assert_eq!(session.ask("identity-name", Tone::Soft).line, "Mara. Mara Quell.");
        assert_eq!(session.exchanges()[0].question_id, "identity-name");
    }
}
