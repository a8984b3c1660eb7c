use serde::{Deserialize, Serialize};

use crate::screening::classifier::Label;

/// Analysis request, as accepted over HTTP and forwarded to the external provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub job_description: String,
    pub resume_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_title: Option<String>,
}

/// Outcome of screening one resume against one job description.
///
/// `candidate_name` and `role_title` are pass-through metadata; an empty string
/// means the value was not supplied. They never influence the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub role_title: String,
    pub score: u8, // 0 – 100
    pub label: Label,
    pub summary: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
}

impl AnalysisResult {
    /// Copies the request's pass-through metadata onto the result.
    pub fn with_metadata(mut self, request: &AnalysisRequest) -> Self {
        self.candidate_name = request.candidate_name.clone().unwrap_or_default();
        self.role_title = request.role_title.clone().unwrap_or_default();
        self
    }
}
