use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: Id,
    pub title: String,
    pub course_id: Id,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleItem {
    pub id: Id,
    pub module_id: Id,
    pub title: String,
    /// file, video, reading, pdf, external_link, discussion, ...
    #[serde(rename = "type")]
    pub item_type: String,
    pub position: i32,
    pub url: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewModuleRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub course_id: Id,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewModuleItemRequest {
    pub module_id: Id,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub item_type: String,
    #[serde(default)]
    pub position: i32,
    pub url: Option<String>,
    pub content: Option<String>,
}
