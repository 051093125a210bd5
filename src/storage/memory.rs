use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use validator::Validate;

use crate::error::StorageError;
use crate::models::*;

use super::Storage;

/// Rows of one entity type keyed by id.
///
/// Ids come from a counter that only moves forward, so iterating the
/// `BTreeMap` yields rows in insertion order.
#[derive(Debug)]
pub(crate) struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(Id) -> T) -> Result<T, StorageError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(StorageError::IdsExhausted)?;
        let row = build(id);
        self.rows.insert(id, row.clone());
        Ok(row)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    fn get(&self, id: Id) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| pred(row)).cloned().collect()
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|row| pred(row)).cloned()
    }
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: Table<User>,
    pub(crate) courses: Table<Course>,
    pub(crate) modules: Table<Module>,
    pub(crate) module_items: Table<ModuleItem>,
    pub(crate) assignments: Table<Assignment>,
    pub(crate) submissions: Table<Submission>,
    pub(crate) quizzes: Table<Quiz>,
    pub(crate) quiz_questions: Table<QuizQuestion>,
    pub(crate) quiz_options: Table<QuizOption>,
    pub(crate) announcements: Table<Announcement>,
    pub(crate) todo_items: Table<TodoItem>,
}

fn validated<R: Validate>(req: &R, entity: &str) -> Result<(), StorageError> {
    req.validate().map_err(|e| {
        warn!("rejected new {}: {}", entity, e);
        StorageError::from(e)
    })
}

impl Tables {
    pub(crate) fn insert_user(&mut self, req: NewUserRequest) -> Result<User, StorageError> {
        validated(&req, "user")?;
        if self.users.find(|u| u.username == req.username).is_some() {
            warn!("rejected new user: username {} already taken", req.username);
            return Err(StorageError::Conflict(format!("username {} already taken", req.username)));
        }
        self.users.insert_with(|id| User {
            id,
            username: req.username,
            password: req.password,
            display_name: req.display_name,
            email: req.email,
            role: req.role,
            avatar_initials: req.avatar_initials,
        })
    }

    pub(crate) fn insert_course(&mut self, req: NewCourseRequest) -> Result<Course, StorageError> {
        validated(&req, "course")?;
        self.courses.insert_with(|id| Course {
            id,
            title: req.title,
            code: req.code,
            term: req.term,
            status: req.status,
            color: req.color,
            instructor_id: req.instructor_id,
        })
    }

    pub(crate) fn insert_module(&mut self, req: NewModuleRequest) -> Result<Module, StorageError> {
        validated(&req, "module")?;
        self.modules.insert_with(|id| Module {
            id,
            title: req.title,
            course_id: req.course_id,
            position: req.position,
        })
    }

    pub(crate) fn insert_module_item(&mut self, req: NewModuleItemRequest) -> Result<ModuleItem, StorageError> {
        validated(&req, "module item")?;
        self.module_items.insert_with(|id| ModuleItem {
            id,
            module_id: req.module_id,
            title: req.title,
            item_type: req.item_type,
            position: req.position,
            url: req.url,
            content: req.content,
        })
    }

    pub(crate) fn insert_assignment(&mut self, req: NewAssignmentRequest) -> Result<Assignment, StorageError> {
        validated(&req, "assignment")?;
        self.assignments.insert_with(|id| Assignment {
            id,
            title: req.title,
            course_id: req.course_id,
            due_date: req.due_date,
            points_possible: req.points_possible,
            instructions: req.instructions,
            status: req.status,
        })
    }

    pub(crate) fn insert_submission(
        &mut self,
        req: NewSubmissionRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, StorageError> {
        validated(&req, "submission")?;
        self.submissions.insert_with(|id| Submission {
            id,
            assignment_id: req.assignment_id,
            user_id: req.user_id,
            submitted_at: Some(submitted_at),
            status: SubmissionStatus::Submitted,
            grade: None,
            comment: None,
            file_url: req.file_url,
        })
    }

    pub(crate) fn insert_quiz(&mut self, req: NewQuizRequest) -> Result<Quiz, StorageError> {
        validated(&req, "quiz")?;
        self.quizzes.insert_with(|id| Quiz {
            id,
            title: req.title,
            course_id: req.course_id,
            due_date: req.due_date,
            time_limit: req.time_limit,
            points_possible: req.points_possible,
            instructions: req.instructions,
            status: req.status,
        })
    }

    pub(crate) fn insert_quiz_question(&mut self, req: NewQuizQuestionRequest) -> Result<QuizQuestion, StorageError> {
        validated(&req, "quiz question")?;
        self.quiz_questions.insert_with(|id| QuizQuestion {
            id,
            quiz_id: req.quiz_id,
            question_text: req.question_text,
            question_type: req.question_type,
            points: req.points,
            position: req.position,
        })
    }

    pub(crate) fn insert_quiz_option(&mut self, req: NewQuizOptionRequest) -> Result<QuizOption, StorageError> {
        validated(&req, "quiz option")?;
        self.quiz_options.insert_with(|id| QuizOption {
            id,
            question_id: req.question_id,
            option_text: req.option_text,
            is_correct: req.is_correct,
            position: req.position,
        })
    }

    pub(crate) fn insert_announcement(
        &mut self,
        req: NewAnnouncementRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Announcement, StorageError> {
        validated(&req, "announcement")?;
        self.announcements.insert_with(|id| Announcement {
            id,
            title: req.title,
            course_id: req.course_id,
            user_id: req.user_id,
            content: req.content,
            created_at,
            status: req.status,
        })
    }

    pub(crate) fn insert_todo_item(&mut self, req: NewTodoItemRequest) -> Result<TodoItem, StorageError> {
        validated(&req, "todo item")?;
        self.todo_items.insert_with(|id| TodoItem {
            id,
            user_id: req.user_id,
            title: req.title,
            course_id: req.course_id,
            due_date: req.due_date,
            points: req.points,
            todo_type: req.todo_type,
            reference_id: req.reference_id,
            completed: req.completed,
        })
    }
}

/// Process-lifetime store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: Id) -> Option<User> {
        self.tables.read().await.users.get(id)
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.tables.read().await.users.find(|u| u.username == username)
    }

    async fn create_user(&self, req: NewUserRequest) -> Result<User, StorageError> {
        let user = self.tables.write().await.insert_user(req)?;
        debug!("created user {}", user.id);
        Ok(user)
    }

    async fn get_courses(&self) -> Vec<Course> {
        self.tables.read().await.courses.all()
    }

    async fn get_course(&self, id: Id) -> Option<Course> {
        self.tables.read().await.courses.get(id)
    }

    async fn create_course(&self, req: NewCourseRequest) -> Result<Course, StorageError> {
        let course = self.tables.write().await.insert_course(req)?;
        debug!("created course {}", course.id);
        Ok(course)
    }

    async fn get_user_courses(&self, _user_id: Id) -> Vec<Course> {
        self.tables.read().await.courses.all()
    }

    async fn get_modules(&self, course_id: Id) -> Vec<Module> {
        let mut modules = self.tables.read().await.modules.filter(|m| m.course_id == course_id);
        modules.sort_by_key(|m| m.position);
        modules
    }

    async fn create_module(&self, req: NewModuleRequest) -> Result<Module, StorageError> {
        self.tables.write().await.insert_module(req)
    }

    async fn get_module_items(&self, module_id: Id) -> Vec<ModuleItem> {
        let mut items = self.tables.read().await.module_items.filter(|i| i.module_id == module_id);
        items.sort_by_key(|i| i.position);
        items
    }

    async fn create_module_item(&self, req: NewModuleItemRequest) -> Result<ModuleItem, StorageError> {
        self.tables.write().await.insert_module_item(req)
    }

    async fn get_assignments(&self, course_id: Id) -> Vec<Assignment> {
        self.tables.read().await.assignments.filter(|a| a.course_id == course_id)
    }

    async fn get_assignment(&self, id: Id) -> Option<Assignment> {
        self.tables.read().await.assignments.get(id)
    }

    async fn create_assignment(&self, req: NewAssignmentRequest) -> Result<Assignment, StorageError> {
        let assignment = self.tables.write().await.insert_assignment(req)?;
        debug!("created assignment {} for course {}", assignment.id, assignment.course_id);
        Ok(assignment)
    }

    async fn get_submission(&self, assignment_id: Id, user_id: Id) -> Option<Submission> {
        self.tables
            .read()
            .await
            .submissions
            .find(|s| s.assignment_id == assignment_id && s.user_id == user_id)
    }

    async fn create_submission(
        &self,
        req: NewSubmissionRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, StorageError> {
        let submission = self.tables.write().await.insert_submission(req, submitted_at)?;
        debug!(
            "created submission {} (assignment {}, user {})",
            submission.id, submission.assignment_id, submission.user_id
        );
        Ok(submission)
    }

    async fn get_quizzes(&self, course_id: Id) -> Vec<Quiz> {
        self.tables.read().await.quizzes.filter(|q| q.course_id == course_id)
    }

    async fn get_quiz(&self, id: Id) -> Option<Quiz> {
        self.tables.read().await.quizzes.get(id)
    }

    async fn create_quiz(&self, req: NewQuizRequest) -> Result<Quiz, StorageError> {
        let quiz = self.tables.write().await.insert_quiz(req)?;
        debug!("created quiz {} for course {}", quiz.id, quiz.course_id);
        Ok(quiz)
    }

    async fn get_quiz_questions(&self, quiz_id: Id) -> Vec<QuizQuestion> {
        let mut questions = self.tables.read().await.quiz_questions.filter(|q| q.quiz_id == quiz_id);
        questions.sort_by_key(|q| q.position);
        questions
    }

    async fn create_quiz_question(&self, req: NewQuizQuestionRequest) -> Result<QuizQuestion, StorageError> {
        self.tables.write().await.insert_quiz_question(req)
    }

    async fn get_quiz_options(&self, question_id: Id) -> Vec<QuizOption> {
        let mut options = self.tables.read().await.quiz_options.filter(|o| o.question_id == question_id);
        options.sort_by_key(|o| o.position);
        options
    }

    async fn create_quiz_option(&self, req: NewQuizOptionRequest) -> Result<QuizOption, StorageError> {
        self.tables.write().await.insert_quiz_option(req)
    }

    async fn get_announcements(&self, course_id: Option<Id>) -> Vec<Announcement> {
        let tables = self.tables.read().await;
        let mut announcements = match course_id {
            Some(course_id) => tables.announcements.filter(|a| a.course_id == course_id),
            None => tables.announcements.all(),
        };
        announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        announcements
    }

    async fn create_announcement(
        &self,
        req: NewAnnouncementRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Announcement, StorageError> {
        let announcement = self.tables.write().await.insert_announcement(req, created_at)?;
        debug!("created announcement {} for course {}", announcement.id, announcement.course_id);
        Ok(announcement)
    }

    async fn get_user_todo_items(&self, user_id: Id) -> Vec<TodoItem> {
        self.tables.read().await.todo_items.filter(|t| t.user_id == user_id)
    }

    async fn create_todo_item(&self, req: NewTodoItemRequest) -> Result<TodoItem, StorageError> {
        self.tables.write().await.insert_todo_item(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn assignment_req(title: &str, course_id: Id) -> NewAssignmentRequest {
        NewAssignmentRequest {
            title: title.to_string(),
            course_id,
            due_date: None,
            points_possible: Some(100),
            instructions: None,
            status: PublishStatus::Published,
        }
    }

    fn module_req(title: &str, course_id: Id, position: i32) -> NewModuleRequest {
        NewModuleRequest {
            title: title.to_string(),
            course_id,
            position,
        }
    }

    fn announcement_req(title: &str, course_id: Id) -> NewAnnouncementRequest {
        NewAnnouncementRequest {
            title: title.to_string(),
            course_id,
            user_id: 2,
            content: "Body".to_string(),
            status: PublishStatus::Published,
        }
    }

    #[tokio::test]
    async fn test_ids_increase_per_entity() {
        let storage = MemStorage::new();

        let first = storage.create_assignment(assignment_req("Step 1", 1)).await.expect("Failed to create assignment");
        let second = storage.create_assignment(assignment_req("Step 2", 1)).await.expect("Failed to create assignment");
        let quiz = storage
            .create_quiz(NewQuizRequest {
                title: "Quiz".to_string(),
                course_id: 1,
                due_date: None,
                time_limit: Some(20),
                points_possible: Some(20),
                instructions: None,
                status: PublishStatus::Published,
            })
            .await
            .expect("Failed to create quiz");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        // Counters are per entity type.
        assert_eq!(quiz.id, 1);
    }

    #[tokio::test]
    async fn test_rejected_create_keeps_counter() {
        let storage = MemStorage::new();

        let result = storage.create_assignment(assignment_req("", 1)).await;
        assert!(matches!(result, Err(StorageError::Validation(_))));

        let created = storage.create_assignment(assignment_req("Wireframes", 1)).await.expect("Failed to create assignment");
        assert_eq!(created.id, 1);
        assert_eq!(storage.get_assignments(1).await.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let storage = MemStorage::new();

        assert!(storage.get_user(42).await.is_none());
        assert!(storage.get_course(42).await.is_none());
        assert!(storage.get_assignment(42).await.is_none());
        assert!(storage.get_quiz(42).await.is_none());
        assert!(storage.get_submission(42, 1).await.is_none());
    }

    #[tokio::test]
    async fn test_modules_sorted_by_position() {
        let storage = MemStorage::new();

        storage.create_module(module_req("Third", 1, 2)).await.expect("Failed to create module");
        storage.create_module(module_req("First", 1, 0)).await.expect("Failed to create module");
        storage.create_module(module_req("Other course", 2, 0)).await.expect("Failed to create module");
        storage.create_module(module_req("Second", 1, 1)).await.expect("Failed to create module");

        let titles: Vec<String> = storage.get_modules(1).await.into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert!(storage.get_modules(999).await.is_empty());
    }

    #[tokio::test]
    async fn test_quiz_options_sorted_by_position() {
        let storage = MemStorage::new();

        for (text, position) in [("B", 1), ("A", 0), ("C", 2)] {
            storage
                .create_quiz_option(NewQuizOptionRequest {
                    question_id: 7,
                    option_text: text.to_string(),
                    is_correct: text == "A",
                    position,
                })
                .await
                .expect("Failed to create option");
        }

        let options = storage.get_quiz_options(7).await;
        let texts: Vec<&str> = options.iter().map(|o| o.option_text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
        assert!(options[0].is_correct);
    }

    #[tokio::test]
    async fn test_announcements_newest_first() {
        let storage = MemStorage::new();
        let now = Utc::now();

        storage.create_announcement(announcement_req("Old", 1), now - Duration::days(7)).await.expect("Failed to create announcement");
        storage.create_announcement(announcement_req("New", 1), now).await.expect("Failed to create announcement");
        storage.create_announcement(announcement_req("Elsewhere", 2), now - Duration::days(1)).await.expect("Failed to create announcement");

        let course: Vec<String> = storage.get_announcements(Some(1)).await.into_iter().map(|a| a.title).collect();
        assert_eq!(course, vec!["New", "Old"]);

        let all: Vec<String> = storage.get_announcements(None).await.into_iter().map(|a| a.title).collect();
        assert_eq!(all, vec!["New", "Elsewhere", "Old"]);
    }

    #[tokio::test]
    async fn test_submission_stamped_and_reset() {
        let storage = MemStorage::new();
        let server_time = Utc::now();

        let submission = storage
            .create_submission(
                NewSubmissionRequest {
                    assignment_id: 3,
                    user_id: 1,
                    file_url: Some("report.pdf".to_string()),
                    comment: Some("please grade kindly".to_string()),
                },
                server_time,
            )
            .await
            .expect("Failed to create submission");

        assert_eq!(submission.submitted_at, Some(server_time));
        assert_eq!(submission.status, SubmissionStatus::Submitted);
        assert_eq!(submission.grade, None);
        assert_eq!(submission.comment, None);

        let found = storage.get_submission(3, 1).await.expect("Submission not found");
        assert_eq!(found.id, submission.id);
        assert!(storage.get_submission(3, 2).await.is_none());
    }

    #[tokio::test]
    async fn test_user_lookup_by_username() {
        let storage = MemStorage::new();

        let user = storage
            .create_user(NewUserRequest {
                username: "mrossi".to_string(),
                password: "secret".to_string(),
                display_name: "Maria Rossi".to_string(),
                email: "mrossi@example.com".to_string(),
                role: UserRole::Instructor,
                avatar_initials: Some("MR".to_string()),
            })
            .await
            .expect("Failed to create user");

        let found = storage.get_user_by_username("mrossi").await.expect("User not found");
        assert_eq!(found.id, user.id);
        assert_eq!(found.role, UserRole::Instructor);
        assert!(storage.get_user_by_username("nobody").await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let storage = MemStorage::new();

        let result = storage
            .create_user(NewUserRequest {
                username: "broken".to_string(),
                password: "secret".to_string(),
                display_name: "Broken".to_string(),
                email: "not-an-email".to_string(),
                role: UserRole::Student,
                avatar_initials: None,
            })
            .await;

        assert!(result.is_err());
        assert!(storage.get_user(1).await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let storage = MemStorage::new();
        let user_req = |display_name: &str| NewUserRequest {
            username: "dup".to_string(),
            password: "secret".to_string(),
            display_name: display_name.to_string(),
            email: "dup@example.com".to_string(),
            role: UserRole::Student,
            avatar_initials: None,
        };

        let first = storage.create_user(user_req("First")).await.expect("Failed to create user");
        let second = storage.create_user(user_req("Second")).await;
        assert!(matches!(second, Err(StorageError::Conflict(_))));

        let found = storage.get_user_by_username("dup").await.expect("User not found");
        assert_eq!(found.id, first.id);
        assert_eq!(found.display_name, "First");
        assert!(storage.get_user(2).await.is_none());
    }

    #[test]
    fn test_exhausted_id_counter_rejects_insert() {
        let mut table: Table<Id> = Table::default();
        table.next_id = Id::MAX - 1;

        assert_eq!(table.insert_with(|id| id).expect("Failed to insert row"), Id::MAX - 1);
        assert!(matches!(table.insert_with(|id| id), Err(StorageError::IdsExhausted)));
        assert_eq!(table.next_id, Id::MAX);
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_todo_items_scoped_to_user() {
        let storage = MemStorage::new();

        for user_id in [1, 2, 1] {
            storage
                .create_todo_item(NewTodoItemRequest {
                    user_id,
                    title: format!("Todo for {}", user_id),
                    course_id: None,
                    due_date: None,
                    points: None,
                    todo_type: "assignment".to_string(),
                    reference_id: None,
                    completed: false,
                })
                .await
                .expect("Failed to create todo item");
        }

        let ids: Vec<Id> = storage.get_user_todo_items(1).await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(storage.get_user_todo_items(3).await.is_empty());
    }
}
