//! Subject factory: turns demographic traits into a named individual.
//!
//! The real factory (portraits, face assets) lives outside this crate and
//! plugs in through [`SubjectFactory`]. [`ProceduralFactory`] is a
//! deterministic stand-in used by the harness and tests.

use serde::{Deserialize, Serialize};

use crate::random::SeededRandom;
use crate::subject::{ManualOverrides, Sex, SubjectTraits};

/// Mixed into the subject seed so naming never shares a stream with
/// evidence synthesis.
const NAME_STREAM: u64 = 0x4E41_4D45;

/// Options passed alongside traits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryOptions {
    /// The same numeric seed the verification core uses.
    pub seed: u64,
    /// Request a procedural portrait.
    pub procedural_portrait: bool,
    /// Values that take precedence over generated ones.
    pub overrides: ManualOverrides,
}

/// The factory's output, before evidence and verdict are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSubject {
    pub id: String,
    pub name: String,
    pub sex: Sex,
    pub traits: SubjectTraits,
    pub reason_for_visit: String,
    /// Seed handed to the portrait pipeline, when one was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait_seed: Option<u64>,
}

pub trait SubjectFactory {
    fn create_from_traits(
        &self,
        traits: &SubjectTraits,
        sex: Sex,
        options: &FactoryOptions,
    ) -> BaseSubject;
}

/// Name-table factory with no portrait pipeline behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralFactory;

impl SubjectFactory for ProceduralFactory {
    fn create_from_traits(
        &self,
        traits: &SubjectTraits,
        sex: Sex,
        options: &FactoryOptions,
    ) -> BaseSubject {
        let mut rng = SeededRandom::new(options.seed ^ NAME_STREAM);
        let generated_name = generate_name(sex, &mut rng);
        let generated_id = format!("CX-{:05}", rng.int(0, 99_999));
        let generated_reason = *rng.pick(VISIT_REASONS);

        let overrides = &options.overrides;
        let mut traits = *traits;
        if let Some(origin) = overrides.origin {
            traits.origin = origin;
        }

        BaseSubject {
            id: overrides.id.clone().unwrap_or(generated_id),
            name: overrides.name.clone().unwrap_or(generated_name),
            sex,
            traits,
            reason_for_visit: overrides
                .reason_for_visit
                .clone()
                .unwrap_or_else(|| generated_reason.to_string()),
            portrait_seed: options.procedural_portrait.then_some(options.seed),
        }
    }
}

/// Generate a `Given Family` name appropriate to `sex`.
pub fn generate_name(sex: Sex, rng: &mut SeededRandom) -> String {
    let given = match sex {
        Sex::Male => *rng.pick(MALE_GIVEN_NAMES),
        Sex::Female => *rng.pick(FEMALE_GIVEN_NAMES),
        Sex::Unspecified => *rng.pick(NEUTRAL_GIVEN_NAMES),
    };
    let family = *rng.pick(FAMILY_NAMES);
    format!("{given} {family}")
}

static MALE_GIVEN_NAMES: &[&str] = &[
    "Anton", "Bram", "Cassius", "Dmitri", "Elias", "Hiroshi", "Jonas", "Kenji", "Marek", "Omar",
    "Pavel", "Rafael", "Soren", "Tobias",
];

static FEMALE_GIVEN_NAMES: &[&str] = &[
    "Aisha", "Bianca", "Celeste", "Dara", "Elena", "Freya", "Ingrid", "Katya", "Leila", "Mira",
    "Nadia", "Priya", "Thea", "Yuki",
];

static NEUTRAL_GIVEN_NAMES: &[&str] = &[
    "Ash", "Juno", "Kai", "Lyr", "Nova", "Orion", "Quinn", "Rook", "Sage", "Vega",
];

static FAMILY_NAMES: &[&str] = &[
    "Abara", "Castellan", "Chen", "Drozdov", "Halloran", "Ivanova", "Kowalski", "Mbeki",
    "Nakamura", "Okonkwo", "Petrov", "Rask", "Santos", "Varga", "Voss", "Yamada",
];

static VISIT_REASONS: &[&str] = &[
    "Work transfer",
    "Visiting family",
    "Medical appointment",
    "Cargo delivery",
    "Contract negotiation",
    "Returning home",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::OriginWorld;

    #[test]
    fn factory_is_deterministic() {
        let options = FactoryOptions {
            seed: 42,
            ..FactoryOptions::default()
        };
        let traits = SubjectTraits::default();
        let a = ProceduralFactory.create_from_traits(&traits, Sex::Female, &options);
        let b = ProceduralFactory.create_from_traits(&traits, Sex::Female, &options);
        assert_eq!(a, b);
        assert!(a.name.contains(' '));
        assert!(a.id.starts_with("CX-"));
    }

    #[test]
    fn overrides_take_precedence() {
        let options = FactoryOptions {
            seed: 7,
            procedural_portrait: true,
            overrides: ManualOverrides {
                name: Some("Ilse Marr".into()),
                id: Some("S-777".into()),
                origin: Some(OriginWorld::Io),
                reason_for_visit: Some("Diplomatic pouch".into()),
            },
        };
        let base =
            ProceduralFactory.create_from_traits(&SubjectTraits::default(), Sex::Male, &options);
        assert_eq!(base.name, "Ilse Marr");
        assert_eq!(base.id, "S-777");
        assert_eq!(base.traits.origin, OriginWorld::Io);
        assert_eq!(base.reason_for_visit, "Diplomatic pouch");
        assert_eq!(base.portrait_seed, Some(7));
    }

    #[test]
    fn no_portrait_unless_requested() {
        let base = ProceduralFactory.create_from_traits(
            &SubjectTraits::default(),
            Sex::Unspecified,
            &FactoryOptions::default(),
        );
        assert_eq!(base.portrait_seed, None);
    }

    #[test]
    fn names_vary_across_seeds() {
        let names: std::collections::HashSet<String> = (0..100)
            .map(|s| {
                let mut rng = SeededRandom::new(s);
                generate_name(Sex::Unspecified, &mut rng)
            })
            .collect();
        assert!(names.len() > 20);
    }
}
