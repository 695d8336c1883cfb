#![allow(clippy::unused_async)]

use crate::{
    data::{
        RecordId,
        student::{Student, StudentDraft},
    },
    error::RegistrarResult,
    screen::{EntityScreen, Field, FieldKind, FormValues},
    state::RegistrarState,
};
use maud::{Markup, html};

pub struct Students;

impl EntityScreen for Students {
    type Resource = Student;
    type Row = Student;

    const SLUG: &'static str = "students";
    const SINGULAR: &'static str = "Student";
    const PLURAL: &'static str = "Students";
    const COLUMNS: &'static [&'static str] = &["First Name", "Last Name", "Email"];
    const FIELDS: &'static [Field] = &[
        Field::required("firstName", "First Name", FieldKind::Text),
        Field::required("lastName", "Last Name", FieldKind::Text),
        Field::required("email", "Email", FieldKind::Email),
    ];

    async fn load_rows(state: &RegistrarState) -> RegistrarResult<Vec<Student>> {
        state.records::<Student>().list().await
    }

    fn row_id(row: &Student) -> RecordId {
        row.id
    }

    fn row_cells(row: &Student) -> Vec<Markup> {
        vec![
            html! {(row.first_name)},
            html! {(row.last_name)},
            html! { a href={"mailto:" (row.email)} class="text-blue-200 underline" {(row.email)} },
        ]
    }

    fn values_of(record: &Student) -> FormValues {
        FormValues::default()
            .with("firstName", &record.first_name)
            .with("lastName", &record.last_name)
            .with("email", &record.email)
    }

    async fn prepare_draft(
        _state: &RegistrarState,
        values: &FormValues,
    ) -> RegistrarResult<StudentDraft> {
        Ok(StudentDraft {
            first_name: values.text("firstName"),
            last_name: values.text("lastName"),
            email: values.text("email"),
        })
    }
}
