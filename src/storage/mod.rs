pub mod memory;
pub mod seed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::models::*;

pub use memory::MemStorage;

/// Every read and write of LMS data goes through this trait.
///
/// `get_*` returns `None` when the id is unknown. `create_*` validates the
/// request first and only assigns an id once validation passed, so a
/// rejected request leaves the id sequence untouched.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: Id) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn create_user(&self, req: NewUserRequest) -> Result<User, StorageError>;

    async fn get_courses(&self) -> Vec<Course>;
    async fn get_course(&self, id: Id) -> Option<Course>;
    async fn create_course(&self, req: NewCourseRequest) -> Result<Course, StorageError>;
    /// There is no enrollment table yet, so every user sees every course.
    async fn get_user_courses(&self, user_id: Id) -> Vec<Course>;

    /// Ordered by position.
    async fn get_modules(&self, course_id: Id) -> Vec<Module>;
    async fn create_module(&self, req: NewModuleRequest) -> Result<Module, StorageError>;
    /// Ordered by position.
    async fn get_module_items(&self, module_id: Id) -> Vec<ModuleItem>;
    async fn create_module_item(&self, req: NewModuleItemRequest) -> Result<ModuleItem, StorageError>;

    async fn get_assignments(&self, course_id: Id) -> Vec<Assignment>;
    async fn get_assignment(&self, id: Id) -> Option<Assignment>;
    async fn create_assignment(&self, req: NewAssignmentRequest) -> Result<Assignment, StorageError>;

    /// First submission stored for the pair, if any.
    async fn get_submission(&self, assignment_id: Id, user_id: Id) -> Option<Submission>;
    async fn create_submission(
        &self,
        req: NewSubmissionRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, StorageError>;

    async fn get_quizzes(&self, course_id: Id) -> Vec<Quiz>;
    async fn get_quiz(&self, id: Id) -> Option<Quiz>;
    async fn create_quiz(&self, req: NewQuizRequest) -> Result<Quiz, StorageError>;
    /// Ordered by position.
    async fn get_quiz_questions(&self, quiz_id: Id) -> Vec<QuizQuestion>;
    async fn create_quiz_question(&self, req: NewQuizQuestionRequest) -> Result<QuizQuestion, StorageError>;
    /// Ordered by position.
    async fn get_quiz_options(&self, question_id: Id) -> Vec<QuizOption>;
    async fn create_quiz_option(&self, req: NewQuizOptionRequest) -> Result<QuizOption, StorageError>;

    /// Newest first. `None` returns announcements of every course.
    async fn get_announcements(&self, course_id: Option<Id>) -> Vec<Announcement>;
    async fn create_announcement(
        &self,
        req: NewAnnouncementRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Announcement, StorageError>;

    async fn get_user_todo_items(&self, user_id: Id) -> Vec<TodoItem>;
    async fn create_todo_item(&self, req: NewTodoItemRequest) -> Result<TodoItem, StorageError>;
}
