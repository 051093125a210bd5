//! Typed access to the REST API for UI code.
//!
//! Every call makes one request. Failures are logged and replaced with an
//! empty default (`Vec::new()`, `None`, `false`), so callers cannot tell "no
//! data" apart from "request failed".

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::*;

/// Body for `POST /api/announcements`; the author is always the client's
/// current user.
#[derive(Debug, Clone)]
pub struct AnnouncementDraft {
    pub title: String,
    pub course_id: Id,
    pub content: String,
    pub status: PublishStatus,
}

pub struct LmsClient {
    client: Client,
    config: ClientConfig,
}

impl LmsClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    pub fn current_user_id(&self) -> Id {
        self.config.current_user_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
                url,
            });
        }

        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
                url,
            });
        }

        Ok(response.json().await?)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str, what: &str) -> Vec<T> {
        self.get_json(path).await.unwrap_or_else(|e| {
            error!("Error fetching {}: {}", what, e);
            Vec::new()
        })
    }

    async fn fetch_one<T: DeserializeOwned>(&self, path: &str, what: &str) -> Option<T> {
        self.get_json(path)
            .await
            .map_err(|e| error!("Error fetching {}: {}", what, e))
            .ok()
    }

    async fn create<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B, what: &str) -> Option<T> {
        self.post_json(path, body)
            .await
            .map_err(|e| error!("Error creating {}: {}", what, e))
            .ok()
    }

    pub async fn fetch_user(&self, user_id: Id) -> Option<UserProfile> {
        self.fetch_one(&format!("/api/user/{}", user_id), "user").await
    }

    pub async fn fetch_user_courses(&self) -> Vec<Course> {
        let path = format!("/api/user/{}/courses", self.config.current_user_id);
        self.fetch_list(&path, "courses").await
    }

    pub async fn fetch_course(&self, course_id: Id) -> Option<Course> {
        self.fetch_one(&format!("/api/courses/{}", course_id), "course").await
    }

    pub async fn fetch_todo_items(&self) -> Vec<TodoItem> {
        let path = format!("/api/user/{}/todo", self.config.current_user_id);
        self.fetch_list(&path, "todo items").await
    }

    pub async fn fetch_course_modules(&self, course_id: Id) -> Vec<Module> {
        self.fetch_list(&format!("/api/courses/{}/modules", course_id), "modules").await
    }

    pub async fn fetch_module_items(&self, module_id: Id) -> Vec<ModuleItem> {
        self.fetch_list(&format!("/api/modules/{}/items", module_id), "module items").await
    }

    pub async fn fetch_course_assignments(&self, course_id: Id) -> Vec<Assignment> {
        self.fetch_list(&format!("/api/courses/{}/assignments", course_id), "assignments").await
    }

    pub async fn fetch_assignment(&self, assignment_id: Id) -> Option<Assignment> {
        self.fetch_one(&format!("/api/assignments/{}", assignment_id), "assignment").await
    }

    /// The current user's submission for an assignment.
    pub async fn fetch_submission(&self, assignment_id: Id) -> Option<Submission> {
        let path = format!(
            "/api/assignments/{}/submissions/{}",
            assignment_id, self.config.current_user_id
        );
        self.fetch_one(&path, "submission").await
    }

    pub async fn fetch_course_quizzes(&self, course_id: Id) -> Vec<Quiz> {
        self.fetch_list(&format!("/api/courses/{}/quizzes", course_id), "quizzes").await
    }

    pub async fn fetch_quiz(&self, quiz_id: Id) -> Option<Quiz> {
        self.fetch_one(&format!("/api/quizzes/{}", quiz_id), "quiz").await
    }

    pub async fn fetch_quiz_questions(&self, quiz_id: Id) -> Vec<QuizQuestion> {
        self.fetch_list(&format!("/api/quizzes/{}/questions", quiz_id), "quiz questions").await
    }

    pub async fn fetch_question_options(&self, question_id: Id) -> Vec<QuizOption> {
        self.fetch_list(&format!("/api/questions/{}/options", question_id), "question options").await
    }

    /// Announcements of one course, or of every course when `course_id` is `None`.
    pub async fn fetch_announcements(&self, course_id: Option<Id>) -> Vec<Announcement> {
        let path = match course_id {
            Some(course_id) => format!("/api/courses/{}/announcements", course_id),
            None => "/api/announcements".to_string(),
        };
        self.fetch_list(&path, "announcements").await
    }

    pub async fn submit_assignment(&self, submission: &NewSubmissionRequest) -> bool {
        self.create::<_, Submission>("/api/submissions", submission, "submission")
            .await
            .is_some()
    }

    pub async fn create_quiz(&self, quiz: &NewQuizRequest) -> Option<Quiz> {
        self.create("/api/quizzes", quiz, "quiz").await
    }

    pub async fn create_assignment(&self, assignment: &NewAssignmentRequest) -> Option<Assignment> {
        self.create("/api/assignments", assignment, "assignment").await
    }

    pub async fn create_announcement(&self, draft: AnnouncementDraft) -> Option<Announcement> {
        let body = NewAnnouncementRequest {
            title: draft.title,
            course_id: draft.course_id,
            user_id: self.config.current_user_id,
            content: draft.content,
            status: draft.status,
        };
        self.create("/api/announcements", &body, "announcement").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_yields_defaults() {
        // Port 9 (discard) is closed on test machines; the connection is refused.
        let client = LmsClient::new(ClientConfig::new("http://127.0.0.1:9", 1)).expect("Failed to build client");

        assert!(client.fetch_user_courses().await.is_empty());
        assert!(client.fetch_course(1).await.is_none());
        assert!(client.create_quiz(&NewQuizRequest {
            title: "Quiz".to_string(),
            course_id: 1,
            due_date: None,
            time_limit: None,
            points_possible: None,
            instructions: None,
            status: PublishStatus::Published,
        }).await.is_none());
    }
}
