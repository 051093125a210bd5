use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Id, PublishStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Id,
    pub title: String,
    pub course_id: Id,
    pub user_id: Id,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncementRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub course_id: Id,
    pub user_id: Id,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub status: PublishStatus,
}
