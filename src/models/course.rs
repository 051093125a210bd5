use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{CourseStatus, Id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Id,
    pub title: String,
    /// Registrar code, e.g. `CS 615 P 1 01`.
    pub code: String,
    pub term: String,
    pub status: CourseStatus,
    /// Card color shown on the dashboard.
    pub color: Option<String>,
    pub instructor_id: Id,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub term: String,
    #[serde(default)]
    pub status: CourseStatus,
    pub color: Option<String>,
    pub instructor_id: Id,
}
