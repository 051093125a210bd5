use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Id, PublishStatus, QuestionType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Id,
    pub title: String,
    pub course_id: Id,
    pub due_date: Option<DateTime<Utc>>,
    /// Minutes.
    pub time_limit: Option<i32>,
    pub points_possible: Option<i32>,
    pub instructions: Option<String>,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: Id,
    pub quiz_id: Id,
    pub question_text: String,
    pub question_type: QuestionType,
    pub points: i32,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub id: Id,
    pub question_id: Id,
    pub option_text: String,
    pub is_correct: bool,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewQuizRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub course_id: Id,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0))]
    pub time_limit: Option<i32>,
    #[validate(range(min = 0))]
    pub points_possible: Option<i32>,
    pub instructions: Option<String>,
    #[serde(default)]
    pub status: PublishStatus,
}

fn default_points() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewQuizQuestionRequest {
    pub quiz_id: Id,
    #[validate(length(min = 1))]
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default = "default_points")]
    #[validate(range(min = 0))]
    pub points: i32,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewQuizOptionRequest {
    pub question_id: Id,
    #[validate(length(min = 1))]
    pub option_text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub position: i32,
}
