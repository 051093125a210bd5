use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub course_id: Option<Id>,
    pub due_date: Option<DateTime<Utc>>,
    pub points: Option<i32>,
    /// assignment, quiz, or an external platform name.
    #[serde(rename = "type")]
    pub todo_type: String,
    /// Id of the assignment/quiz this reminder points at.
    pub reference_id: Option<Id>,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTodoItemRequest {
    pub user_id: Id,
    #[validate(length(min = 1))]
    pub title: String,
    pub course_id: Option<Id>,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0))]
    pub points: Option<i32>,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub todo_type: String,
    pub reference_id: Option<Id>,
    #[serde(default)]
    pub completed: bool,
}
