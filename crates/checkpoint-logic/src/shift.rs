//! Shift content: bundled directive presets and authored subject lists.
//!
//! Each shift runs under one directive. Presets ship in
//! `data/shift_directives.json`; authored subject scenarios are plain
//! JSON arrays of [`SubjectSeed`].

use serde::{Deserialize, Serialize};

use crate::directive::DirectiveRule;
use crate::error::ContentError;
use crate::subject::SubjectSeed;

const SHIFT_DIRECTIVES_JSON: &str = include_str!("../../../data/shift_directives.json");

/// A directive preset for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDirective {
    pub shift: u32,
    pub title: String,
    pub directive: DirectiveRule,
}

/// The bundled shift presets, in shift order.
pub fn shift_directives() -> Result<Vec<ShiftDirective>, ContentError> {
    parse_shift_directives(SHIFT_DIRECTIVES_JSON)
}

pub fn parse_shift_directives(json: &str) -> Result<Vec<ShiftDirective>, ContentError> {
    let mut shifts: Vec<ShiftDirective> = serde_json::from_str(json)?;
    shifts.sort_by_key(|s| s.shift);
    Ok(shifts)
}

/// Parse an authored list of subject seeds.
pub fn parse_subjects(json: &str) -> Result<Vec<SubjectSeed>, ContentError> {
    Ok(serde_json::from_str(json)?)
}
