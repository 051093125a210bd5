pub mod announcement;
pub mod assignment;
pub mod course;
pub mod module;
pub mod quiz;
pub mod status;
pub mod submission;
pub mod todo;
pub mod user;

pub use announcement::{Announcement, NewAnnouncementRequest};
pub use assignment::{Assignment, NewAssignmentRequest};
pub use course::{Course, NewCourseRequest};
pub use module::{Module, ModuleItem, NewModuleItemRequest, NewModuleRequest};
pub use quiz::{
    NewQuizOptionRequest, NewQuizQuestionRequest, NewQuizRequest, Quiz, QuizOption, QuizQuestion,
};
pub use status::{CourseStatus, PublishStatus, QuestionType, SubmissionStatus, UserRole};
pub use submission::{NewSubmissionRequest, Submission};
pub use todo::{NewTodoItemRequest, TodoItem};
pub use user::{NewUserRequest, User, UserProfile};

/// Entity ids are assigned per table, starting at 1.
pub type Id = i32;
