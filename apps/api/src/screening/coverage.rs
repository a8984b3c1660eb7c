//! Coverage scoring between job-description skills and resume skills.
//!
//! rawScore = 70 × coverage + 30 × (|extra| / extraDenominator)
//!
//! where coverage = |matched| / |jd| (0 when the JD has no recognised skills) and
//! extraDenominator = |jd| + 4 (4 when the JD has no recognised skills). The weights
//! and the +4 pad are kept as-is for compatibility with previously issued scores.

use std::collections::HashSet;

use crate::screening::vocabulary::SkillSet;

pub const COVERAGE_WEIGHT: f64 = 70.0;
pub const EXTRA_WEIGHT: f64 = 30.0;
pub const EXTRA_DENOMINATOR_PAD: usize = 4;
pub const MAX_SCORE: f64 = 100.0;

/// Partition of the two skill sets plus the derived score.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    pub matched: SkillSet,
    pub missing: SkillSet,
    pub extra: SkillSet,
    /// |matched| / |jd|, in [0, 1].
    pub ratio: f64,
    pub score: u8,
}

impl Coverage {
    /// Coverage as a rounded whole percentage, as shown in summaries.
    pub fn percent(&self) -> u32 {
        (self.ratio * 100.0).round() as u32
    }
}

/// Compares JD skills against resume skills. Both inputs are expected in vocabulary
/// order; every output list preserves that order.
pub fn score_coverage(jd_skills: &[String], resume_skills: &[String]) -> Coverage {
    let in_resume: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();
    let in_jd: HashSet<&str> = jd_skills.iter().map(String::as_str).collect();

    let (matched, missing): (SkillSet, SkillSet) = jd_skills
        .iter()
        .cloned()
        .partition(|skill| in_resume.contains(skill.as_str()));

    let extra: SkillSet = resume_skills
        .iter()
        .filter(|skill| !in_jd.contains(skill.as_str()))
        .cloned()
        .collect();

    let ratio = if jd_skills.is_empty() {
        0.0
    } else {
        matched.len() as f64 / jd_skills.len() as f64
    };

    let extra_denominator = if jd_skills.is_empty() {
        EXTRA_DENOMINATOR_PAD
    } else {
        jd_skills.len() + EXTRA_DENOMINATOR_PAD
    };

    let raw = COVERAGE_WEIGHT * ratio + EXTRA_WEIGHT * (extra.len() as f64 / extra_denominator as f64);
    let score = raw.min(MAX_SCORE).max(0.0).round() as u8;

    Coverage {
        matched,
        missing,
        extra,
        ratio,
        score,
    }
}
