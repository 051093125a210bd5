use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Id, PublishStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Id,
    pub title: String,
    pub course_id: Id,
    pub due_date: Option<DateTime<Utc>>,
    pub points_possible: Option<i32>,
    pub instructions: Option<String>,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignmentRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub course_id: Id,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0))]
    pub points_possible: Option<i32>,
    pub instructions: Option<String>,
    #[serde(default)]
    pub status: PublishStatus,
}
