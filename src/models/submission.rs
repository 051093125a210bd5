use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Id, SubmissionStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Id,
    pub assignment_id: Id,
    pub user_id: Id,
    pub submitted_at: Option<DateTime<Utc>>,
    pub status: SubmissionStatus,
    pub grade: Option<i32>,
    /// Grader feedback.
    pub comment: Option<String>,
    pub file_url: Option<String>,
}

/// A student turning in an assignment.
///
/// There is no `submitted_at` field: whatever the client sends under
/// `submittedAt` is skipped as an unknown key, and the server stamps its own
/// clock when the submission is stored. `comment` is accepted but dropped
/// since the field holds grader feedback.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmissionRequest {
    pub assignment_id: Id,
    pub user_id: Id,
    pub file_url: Option<String>,
    pub comment: Option<String>,
}
