use serde::{Deserialize, Serialize};
use validator::Validate;

/// One resume submitted for ranking
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResumeInput {
    #[validate(length(min = 1))]
    pub id: String,
    pub text: String,
}

/// Request to rank a batch of resumes against one job description
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[serde(alias = "job_text", rename = "jobText")]
    pub job_text: String,
    #[validate(nested)]
    pub resumes: Vec<ResumeInput>,
}
