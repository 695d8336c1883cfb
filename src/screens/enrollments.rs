#![allow(clippy::unused_async)]

use crate::{
    composer::{self, COURSE_FIELD, DATE_FIELD, STUDENT_FIELD, Selection},
    data::{
        RecordId,
        enrollment::{Enrollment, EnrollmentDisplay, EnrollmentDraft},
    },
    error::RegistrarResult,
    screen::{Choices, EntityScreen, Field, FieldKind, FormValues, ScreenMode},
    state::RegistrarState,
};
use maud::{Markup, html};

/// Enrollments are created and edited through the composer: both selectors
/// are resolved against freshly loaded students and courses before posting.
pub struct Enrollments;

impl EntityScreen for Enrollments {
    type Resource = Enrollment;
    type Row = EnrollmentDisplay;

    const SLUG: &'static str = "enrollments";
    const SINGULAR: &'static str = "Enrollment";
    const PLURAL: &'static str = "Enrollments";
    const COLUMNS: &'static [&'static str] = &["Student", "Course", "Enrollment Date"];
    const FIELDS: &'static [Field] = &[
        Field::required(
            STUDENT_FIELD,
            "Student",
            FieldKind::Select {
                placeholder: "Select a student",
            },
        ),
        Field::required(
            COURSE_FIELD,
            "Course",
            FieldKind::Select {
                placeholder: "Select a course",
            },
        ),
        Field::optional(DATE_FIELD, "Enrollment Date", FieldKind::Date),
    ];

    async fn load_rows(state: &RegistrarState) -> RegistrarResult<Vec<EnrollmentDisplay>> {
        state.records::<Enrollment>().list_projection().await
    }

    fn row_id(row: &EnrollmentDisplay) -> RecordId {
        row.id
    }

    fn row_cells(row: &EnrollmentDisplay) -> Vec<Markup> {
        let or_dash = |value: Option<&str>| {
            html! {
                @if let Some(value) = value {
                    (value)
                } @else {
                    span class="italic text-gray-400" {"-"}
                }
            }
        };

        vec![
            or_dash(row.student_name.as_deref()),
            or_dash(row.course_title.as_deref()),
            or_dash(row.enrollment_date.map(|date| date.to_string()).as_deref()),
        ]
    }

    async fn load_choices(state: &RegistrarState) -> RegistrarResult<Choices> {
        composer::load_choices(state).await
    }

    fn blank_values(state: &RegistrarState) -> FormValues {
        FormValues::default().with(DATE_FIELD, state.today().to_string())
    }

    fn values_of(record: &Enrollment) -> FormValues {
        FormValues::default()
            .with(STUDENT_FIELD, record.student.id.to_string())
            .with(COURSE_FIELD, record.course.id.to_string())
            .with(
                DATE_FIELD,
                record
                    .enrollment_date
                    .map(|date| date.to_string())
                    .unwrap_or_default(),
            )
    }

    fn validate(values: &FormValues) -> RegistrarResult<()> {
        Selection::from_values(values)?.ensure_complete()?;
        Ok(())
    }

    async fn prepare_draft(
        state: &RegistrarState,
        values: &FormValues,
    ) -> RegistrarResult<EnrollmentDraft> {
        composer::compose(state, Selection::from_values(values)?).await
    }

    fn saved_message(mode: ScreenMode) -> String {
        match mode {
            ScreenMode::Creating => "Enrollment created successfully!".to_string(),
            ScreenMode::Editing(_) => "Enrollment updated successfully!".to_string(),
        }
    }
}
