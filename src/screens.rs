//! The four entity screens, each an [`crate::screen::EntityScreen`] instance.

pub mod courses;
pub mod enrollments;
pub mod students;
pub mod teachers;

pub use courses::Courses;
pub use enrollments::Enrollments;
pub use students::Students;
pub use teachers::Teachers;
