//! Sample records loaded at startup so a fresh process has something to show.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::info;

use crate::error::StorageError;
use crate::models::*;

use super::memory::{MemStorage, Tables};

impl MemStorage {
    pub fn with_sample_data() -> Result<Self, StorageError> {
        let mut tables = Tables::default();
        seed(&mut tables, Utc::now())?;
        info!(
            "seeded {} users, {} courses, {} assignments, {} quizzes, {} announcements",
            tables.users.len(),
            tables.courses.len(),
            tables.assignments.len(),
            tables.quizzes.len(),
            tables.announcements.len(),
        );
        Ok(Self::from_tables(tables))
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, min, 0))
        .map(|dt| dt.and_utc())
}

fn item(module_id: Id, title: &str, item_type: &str, position: i32, url: &str) -> NewModuleItemRequest {
    NewModuleItemRequest {
        module_id,
        title: title.to_string(),
        item_type: item_type.to_string(),
        position,
        url: Some(url.to_string()),
        content: None,
    }
}

pub(crate) fn seed(tables: &mut Tables, now: DateTime<Utc>) -> Result<(), StorageError> {
    let student = tables.insert_user(NewUserRequest {
        username: "jsmith".to_string(),
        password: "password123".to_string(),
        display_name: "John Smith".to_string(),
        email: "student@example.com".to_string(),
        role: UserRole::Student,
        avatar_initials: Some("JS".to_string()),
    })?;
    let professor = tables.insert_user(NewUserRequest {
        username: "professor".to_string(),
        password: "securepass".to_string(),
        display_name: "Professor Johnson".to_string(),
        email: "professor@example.com".to_string(),
        role: UserRole::Instructor,
        avatar_initials: Some("PJ".to_string()),
    })?;

    let course_rows = [
        ("User Interface Design", "CS 615 P 1 01", "Spring 2023", "#0374B5"),
        ("Intro THRY Computation", "CS 420 P 1 02", "Spring 2023", "#B86E00"),
        ("Aquaculture", "ENVSCI 134 OL 1 01", "Spring 2023", "#2D8C3C"),
        ("Elem Italian II", "ITAL 102 OL 1 01", "Spring 2023", "#B82E00"),
        ("Programming in C", "CS 240 P 1 02", "Fall 2024", "#2D8C3C"),
    ];
    let mut courses = Vec::with_capacity(course_rows.len());
    for (title, code, term, color) in course_rows {
        courses.push(tables.insert_course(NewCourseRequest {
            title: title.to_string(),
            code: code.to_string(),
            term: term.to_string(),
            status: CourseStatus::Active,
            color: Some(color.to_string()),
            instructor_id: professor.id,
        })?);
    }
    let ui_design = &courses[0];
    let computation = &courses[1];
    let aquaculture = &courses[2];
    let italian = &courses[3];

    let module_titles = [
        "Module 1: Introduction to User Interface Design",
        "Module 2: Visual Design Fundamentals",
        "Module 3: Prototyping Techniques",
    ];
    let mut modules = Vec::with_capacity(module_titles.len());
    for (position, title) in (0..).zip(module_titles) {
        modules.push(tables.insert_module(NewModuleRequest {
            title: title.to_string(),
            course_id: ui_design.id,
            position,
        })?);
    }

    let items = [
        item(modules[0].id, "Course Syllabus", "file", 0, "#"),
        item(modules[0].id, "Lecture 1: Introduction to UI/UX Principles", "video", 1, "#"),
        item(modules[0].id, "Required Reading: Design of Everyday Things (Ch. 1)", "reading", 2, "#"),
        item(modules[1].id, "Lecture 2: Color Theory & Typography", "video", 0, "#"),
        item(modules[1].id, "Slide Deck: Visual Hierarchy", "file", 1, "#"),
        item(modules[1].id, "Reading: Gestalt Principles in UI Design", "pdf", 2, "#"),
        item(modules[1].id, "External Resource: Adobe Color Wheel", "external_link", 3, "https://color.adobe.com"),
        item(modules[2].id, "Lecture 3: From Sketches to Wireframes", "video", 0, "#"),
        item(modules[2].id, "Demo: Using Figma for UI Prototyping", "video", 1, "#"),
        item(modules[2].id, "Assignment Instructions: Lo-Fi Prototype", "file", 2, "#"),
        item(
            modules[2].id,
            "External Resource: Figma Tutorial",
            "external_link",
            3,
            "https://www.figma.com/resources/learn-design/",
        ),
        item(modules[2].id, "Discussion: Share Your Prototype Ideas", "discussion", 4, "#"),
    ];
    for req in items {
        tables.insert_module_item(req)?;
    }

    let assignment_rows = [
        (
            "Project Step 5 - Computer Prototyping",
            ui_design.id,
            at(2023, 4, 15, 23, 59),
            100,
            "Create a high-fidelity computer prototype of your user interface design based on the feedback received from your paper prototype.",
        ),
        (
            "Assignment -- Passato Prossimo o Imperfetto",
            italian.id,
            at(2023, 4, 20, 23, 59),
            0,
            "Complete the exercises on when to use Passato Prossimo versus Imperfetto tenses in Italian.",
        ),
        (
            "Project Step 4 - Paper Prototyping",
            ui_design.id,
            at(2023, 4, 1, 23, 59),
            100,
            "Create paper prototypes of your user interface design and conduct user testing with at least 3 participants.",
        ),
        (
            "Project Step 3 - Wireframes",
            ui_design.id,
            at(2023, 3, 15, 23, 59),
            100,
            "Create wireframes for your user interface design.",
        ),
    ];
    let mut assignments = Vec::with_capacity(assignment_rows.len());
    for (title, course_id, due_date, points, instructions) in assignment_rows {
        assignments.push(tables.insert_assignment(NewAssignmentRequest {
            title: title.to_string(),
            course_id,
            due_date,
            points_possible: Some(points),
            instructions: Some(instructions.to_string()),
            status: PublishStatus::Published,
        })?);
    }

    // Already graded, so it bypasses the regular submission path.
    let paper_prototype = assignments[2].id;
    tables.submissions.insert_with(|id| Submission {
        id,
        assignment_id: paper_prototype,
        user_id: student.id,
        submitted_at: at(2023, 4, 1, 20, 45),
        status: SubmissionStatus::Graded,
        grade: Some(94),
        comment: Some(
            "Great job on the paper prototype! Your user testing methodology was very thorough.".to_string(),
        ),
        file_url: Some("#".to_string()),
    })?;

    let quiz_rows = [
        (
            "UI/UX Design Principles Quiz",
            ui_design.id,
            at(2023, 4, 22, 23, 59),
            20,
            20,
            "This quiz covers the material from Modules 1-3 on UI/UX design principles, visual design fundamentals, and basic prototyping concepts.",
        ),
        (
            "Introduction to Computation Midterm",
            computation.id,
            at(2023, 3, 15, 23, 59),
            90,
            100,
            "Comprehensive midterm exam covering automata theory, formal languages, and computability concepts.",
        ),
        (
            "Italian Verb Conjugation Quiz",
            italian.id,
            at(2023, 4, 25, 23, 59),
            15,
            15,
            "Test your knowledge of Italian verb conjugations, including regular and irregular verbs in present and past tenses.",
        ),
    ];
    for (title, course_id, due_date, time_limit, points, instructions) in quiz_rows {
        tables.insert_quiz(NewQuizRequest {
            title: title.to_string(),
            course_id,
            due_date,
            time_limit: Some(time_limit),
            points_possible: Some(points),
            instructions: Some(instructions.to_string()),
            status: PublishStatus::Published,
        })?;
    }

    let announcement_rows = [
        (
            "Important: Final Project Requirements Update",
            ui_design.id,
            "Dear students, I've updated the requirements for the final project. Please review the updated document in the course materials section. The main changes affect the deliverable format and submission deadline.",
            2,
        ),
        (
            "Guest Lecture This Thursday",
            aquaculture.id,
            "We'll be having a guest lecture this Thursday by Dr. Sarah Chen, a leading researcher in sustainable aquaculture practices. The lecture will be recorded for those who cannot attend live.",
            7,
        ),
        (
            "Midterm Exam Grades Posted",
            computation.id,
            "The grades for the midterm exam have been posted. The class average was 82%. If you'd like to discuss your exam, please sign up for office hours using the link below.",
            14,
        ),
    ];
    for (title, course_id, content, days_ago) in announcement_rows {
        tables.insert_announcement(
            NewAnnouncementRequest {
                title: title.to_string(),
                course_id,
                user_id: professor.id,
                content: content.to_string(),
                status: PublishStatus::Published,
            },
            now - Duration::days(days_ago),
        )?;
    }

    for (assignment, course_id, points) in [(&assignments[0], ui_design.id, 100), (&assignments[1], italian.id, 0)] {
        tables.insert_todo_item(NewTodoItemRequest {
            user_id: student.id,
            title: format!("Turn in {}", assignment.title),
            course_id: Some(course_id),
            due_date: assignment.due_date,
            points: Some(points),
            todo_type: "assignment".to_string(),
            reference_id: Some(assignment.id),
            completed: false,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_sample_data_loaded() {
        let storage = MemStorage::with_sample_data().expect("Failed to seed storage");

        let student = storage.get_user(1).await.expect("Student not found");
        assert_eq!(student.username, "jsmith");
        assert_eq!(storage.get_user_by_username("professor").await.map(|u| u.id), Some(2));

        assert_eq!(storage.get_courses().await.len(), 5);
        assert_eq!(storage.get_modules(1).await.len(), 3);
        assert_eq!(storage.get_module_items(2).await.len(), 4);
        assert_eq!(storage.get_assignments(1).await.len(), 3);
        assert_eq!(storage.get_quizzes(2).await.len(), 1);
        assert_eq!(storage.get_announcements(None).await.len(), 3);
        assert_eq!(storage.get_user_todo_items(1).await.len(), 2);
    }

    #[tokio::test]
    async fn test_sample_submission_is_graded() {
        let storage = MemStorage::with_sample_data().expect("Failed to seed storage");

        let submission = storage.get_submission(3, 1).await.expect("Submission not found");
        assert_eq!(submission.status, SubmissionStatus::Graded);
        assert_eq!(submission.grade, Some(94));
    }

    #[tokio::test]
    async fn test_sample_announcements_newest_first() {
        let storage = MemStorage::with_sample_data().expect("Failed to seed storage");

        let titles: Vec<String> = storage.get_announcements(None).await.into_iter().map(|a| a.title).collect();
        assert_eq!(
            titles,
            vec![
                "Important: Final Project Requirements Update",
                "Guest Lecture This Thursday",
                "Midterm Exam Grades Posted",
            ]
        );
    }
}
