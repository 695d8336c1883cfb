#![allow(clippy::unused_async)]

use crate::{
    data::{
        RecordId, Reference,
        course::{Course, CourseDisplay, CourseDraft},
        teacher::Teacher,
    },
    error::RegistrarResult,
    screen::{Choices, EntityScreen, Field, FieldKind, FormValues, SelectOption},
    state::RegistrarState,
};
use maud::{Markup, html};

pub struct Courses;

impl EntityScreen for Courses {
    type Resource = Course;
    type Row = CourseDisplay;

    const SLUG: &'static str = "courses";
    const SINGULAR: &'static str = "Course";
    const PLURAL: &'static str = "Courses";
    const COLUMNS: &'static [&'static str] = &["Title", "Teacher"];
    const FIELDS: &'static [Field] = &[
        Field::required("title", "Title", FieldKind::Text),
        Field::optional("description", "Description", FieldKind::TextArea),
        Field::optional("teacher", "Teacher", FieldKind::Select { placeholder: "None" }),
    ];

    async fn load_rows(state: &RegistrarState) -> RegistrarResult<Vec<CourseDisplay>> {
        state.records::<Course>().list_projection().await
    }

    fn row_id(row: &CourseDisplay) -> RecordId {
        row.id
    }

    fn row_cells(row: &CourseDisplay) -> Vec<Markup> {
        vec![
            html! {
                (row.title)
                @if let Some(description) = &row.description {
                    p class="text-sm text-gray-400" {(description)}
                }
            },
            html! {
                @if let Some(teacher) = &row.teacher_full_name {
                    (teacher)
                } @else {
                    span class="italic text-gray-400" {"Not Assigned"}
                }
            },
        ]
    }

    async fn load_choices(state: &RegistrarState) -> RegistrarResult<Choices> {
        let teachers = state.records::<Teacher>().list().await?;

        let options: Vec<_> = teachers
            .iter()
            .map(|teacher| SelectOption {
                value: teacher.id,
                label: teacher.full_name(),
            })
            .collect();
        Ok(Choices::from([("teacher", options)]))
    }

    fn values_of(record: &Course) -> FormValues {
        FormValues::default()
            .with("title", &record.title)
            .with("description", record.description.clone().unwrap_or_default())
            .with(
                "teacher",
                record
                    .teacher
                    .map(|teacher| teacher.id.to_string())
                    .unwrap_or_default(),
            )
    }

    async fn prepare_draft(
        _state: &RegistrarState,
        values: &FormValues,
    ) -> RegistrarResult<CourseDraft> {
        Ok(CourseDraft {
            title: values.text("title"),
            description: values.optional_text("description"),
            teacher: values.record_id("teacher", "Teacher")?.map(Reference::from),
        })
    }
}
