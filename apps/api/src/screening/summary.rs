//! Label-specific summary text.

use crate::screening::classifier::Label;

/// Renders the recruiter-facing summary for a label.
///
/// `Strong Recommend` names up to three extra skills, `Consider` up to two missing
/// skills, the other labels up to three missing skills. An empty list falls back to
/// a generic phrase so the sentence always reads correctly.
pub fn summarize(label: Label, coverage_percent: u32, missing: &[String], extra: &[String]) -> String {
    match label {
        Label::StrongRecommend => format!(
            "This candidate demonstrates excellent alignment with {coverage_percent}% of required skills. \
             They bring additional expertise in {} that could add value to the team.",
            first_skills(extra, 3, ", ", "related areas")
        ),
        Label::Consider => format!(
            "The candidate shows good potential with {coverage_percent}% skill match. \
             While there are some gaps in {}, their background suggests they could grow into the role.",
            first_skills(missing, 2, " and ", "a few areas")
        ),
        Label::WeakFit => format!(
            "This candidate has partial alignment ({coverage_percent}% match) with the job requirements. \
             Key gaps include {}. Consider only if other candidates are unavailable.",
            first_skills(missing, 3, ", ", "several areas")
        ),
        Label::NotRecommended => format!(
            "The candidate's profile shows limited alignment ({coverage_percent}% match) with the core requirements. \
             Major skill gaps in {} would require significant training.",
            first_skills(missing, 3, ", ", "essential areas")
        ),
    }
}

fn first_skills(skills: &[String], limit: usize, separator: &str, fallback: &str) -> String {
    if skills.is_empty() {
        return fallback.to_string();
    }
    skills
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
