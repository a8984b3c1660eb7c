//! MatchEngine — runs extraction, coverage, classification and summary in one call.
//!
//! Pure and synchronous: the vocabulary is read-only after construction, so a single
//! engine can be shared across any number of concurrent requests.

use tracing::debug;

use crate::models::analysis::AnalysisResult;
use crate::screening::classifier::classify;
use crate::screening::coverage::score_coverage;
use crate::screening::summary::summarize;
use crate::screening::vocabulary::SkillVocabulary;

#[derive(Debug, Clone)]
pub struct MatchEngine {
    vocabulary: SkillVocabulary,
}

impl MatchEngine {
    pub fn new(vocabulary: SkillVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Screens `resume_text` against `job_text`. Total: any pair of strings yields a
    /// valid result, empty inputs included.
    pub fn analyze(&self, job_text: &str, resume_text: &str) -> AnalysisResult {
        let jd_skills = self.vocabulary.extract(job_text);
        let resume_skills = self.vocabulary.extract(resume_text);

        let coverage = score_coverage(&jd_skills, &resume_skills);
        let label = classify(coverage.score);
        let summary = summarize(label, coverage.percent(), &coverage.missing, &coverage.extra);

        debug!(
            jd_skills = jd_skills.len(),
            resume_skills = resume_skills.len(),
            matched = coverage.matched.len(),
            score = coverage.score,
            %label,
            "Local analysis complete"
        );

        AnalysisResult {
            candidate_name: String::new(),
            role_title: String::new(),
            score: coverage.score,
            label,
            summary,
            matched_skills: coverage.matched,
            missing_skills: coverage.missing,
            extra_skills: coverage.extra,
        }
    }
}
