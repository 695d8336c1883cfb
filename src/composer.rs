//! Builds an enrollment out of two independently loaded collections.
//!
//! The composer is the only way enrollments get created: the student and
//! course picked in the form are looked up in freshly loaded lists and only
//! ids that resolve there end up in the posted body.

use crate::{
    data::{
        RecordId, Reference,
        course::Course,
        enrollment::EnrollmentDraft,
        student::Student,
    },
    error::{IncompleteSelectionSnafu, RegistrarResult},
    screen::{Choices, FormValues, SelectOption},
    state::RegistrarState,
};
use jiff::civil::Date;
use snafu::OptionExt;

pub const STUDENT_FIELD: &str = "student";
pub const COURSE_FIELD: &str = "course";
pub const DATE_FIELD: &str = "enrollmentDate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub student: Option<RecordId>,
    pub course: Option<RecordId>,
    pub enrollment_date: Option<Date>,
}

impl Selection {
    pub fn from_values(values: &FormValues) -> RegistrarResult<Self> {
        Ok(Self {
            student: values.record_id(STUDENT_FIELD, "Student")?,
            course: values.record_id(COURSE_FIELD, "Course")?,
            enrollment_date: values.date(DATE_FIELD)?,
        })
    }

    pub fn ensure_complete(&self) -> RegistrarResult<(RecordId, RecordId)> {
        match (self.student, self.course) {
            (Some(student), Some(course)) => Ok((student, course)),
            _ => IncompleteSelectionSnafu.fail(),
        }
    }
}

/// Resolves the selection against the loaded collections by linear search.
pub fn resolve(
    students: &[Student],
    courses: &[Course],
    selection: Selection,
    today: Date,
) -> RegistrarResult<EnrollmentDraft> {
    let (student_id, course_id) = selection.ensure_complete()?;

    let student = students
        .iter()
        .find(|student| student.id == student_id)
        .context(IncompleteSelectionSnafu)?;
    let course = courses
        .iter()
        .find(|course| course.id == course_id)
        .context(IncompleteSelectionSnafu)?;

    Ok(EnrollmentDraft {
        student: Reference { id: student.id },
        course: Reference { id: course.id },
        enrollment_date: selection.enrollment_date.unwrap_or(today),
    })
}

pub async fn load_collections(state: &RegistrarState) -> RegistrarResult<(Vec<Student>, Vec<Course>)> {
    let students = state.records::<Student>();
    let courses = state.records::<Course>();

    let (students, courses) = tokio::join!(students.list(), courses.list());
    Ok((students?, courses?))
}

pub async fn load_choices(state: &RegistrarState) -> RegistrarResult<Choices> {
    let (students, courses) = load_collections(state).await?;

    let students: Vec<_> = students
        .iter()
        .map(|student| SelectOption {
            value: student.id,
            label: student.full_name(),
        })
        .collect();
    let courses: Vec<_> = courses
        .into_iter()
        .map(|course| SelectOption {
            value: course.id,
            label: course.title,
        })
        .collect();

    Ok(Choices::from([(STUDENT_FIELD, students), (COURSE_FIELD, courses)]))
}

/// An incomplete selection fails before anything is loaded.
pub async fn compose(state: &RegistrarState, selection: Selection) -> RegistrarResult<EnrollmentDraft> {
    selection.ensure_complete()?;

    let (students, courses) = load_collections(state).await?;
    let draft = resolve(&students, &courses, selection, state.today())?;
    debug!(?draft, "composed enrollment");
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistrarError;
    use jiff::civil::date;
    use pretty_assertions::assert_eq;

    fn students() -> Vec<Student> {
        vec![
            Student {
                id: 1,
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@x.com".into(),
            },
            Student {
                id: 2,
                first_name: "Alan".into(),
                last_name: "Turing".into(),
                email: "alan@x.com".into(),
            },
        ]
    }

    fn courses() -> Vec<Course> {
        vec![Course {
            id: 10,
            title: "Analytical Engines".into(),
            description: None,
            teacher: None,
        }]
    }

    #[test]
    fn missing_selection_fails_locally() {
        let only_student = Selection {
            student: Some(1),
            ..Selection::default()
        };
        let only_course = Selection {
            course: Some(10),
            ..Selection::default()
        };

        for selection in [Selection::default(), only_student, only_course] {
            let err = resolve(&students(), &courses(), selection, date(2026, 10, 18)).unwrap_err();
            assert!(matches!(err, RegistrarError::IncompleteSelection));
            assert_eq!(err.to_string(), "Please select both a student and a course");
        }
    }

    #[test]
    fn unknown_ids_do_not_resolve() {
        let selection = Selection {
            student: Some(99),
            course: Some(10),
            enrollment_date: None,
        };
        assert!(matches!(
            resolve(&students(), &courses(), selection, date(2026, 10, 18)),
            Err(RegistrarError::IncompleteSelection)
        ));
    }

    #[test]
    fn resolved_draft_defaults_to_today() {
        let selection = Selection {
            student: Some(2),
            course: Some(10),
            enrollment_date: None,
        };

        let draft = resolve(&students(), &courses(), selection, date(2026, 10, 18)).unwrap();
        assert_eq!(
            draft,
            EnrollmentDraft {
                student: Reference { id: 2 },
                course: Reference { id: 10 },
                enrollment_date: date(2026, 10, 18),
            }
        );
    }

    #[test]
    fn explicit_date_is_kept() {
        let selection = Selection {
            student: Some(1),
            course: Some(10),
            enrollment_date: Some(date(2025, 9, 1)),
        };

        let draft = resolve(&students(), &courses(), selection, date(2026, 10, 18)).unwrap();
        assert_eq!(draft.enrollment_date, date(2025, 9, 1));
    }

    #[test]
    fn selection_reads_form_values() {
        let values = FormValues::default()
            .with(STUDENT_FIELD, "2")
            .with(COURSE_FIELD, "")
            .with(DATE_FIELD, "2026-01-31");

        assert_eq!(
            Selection::from_values(&values).unwrap(),
            Selection {
                student: Some(2),
                course: None,
                enrollment_date: Some(date(2026, 1, 31)),
            }
        );
    }
}
