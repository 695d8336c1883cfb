#![allow(clippy::unused_async)]

use crate::{
    data::{
        RecordId,
        teacher::{Teacher, TeacherDraft},
    },
    error::RegistrarResult,
    screen::{EntityScreen, Field, FieldKind, FormValues},
    state::RegistrarState,
};
use maud::{Markup, html};

pub struct Teachers;

impl EntityScreen for Teachers {
    type Resource = Teacher;
    type Row = Teacher;

    const SLUG: &'static str = "teachers";
    const SINGULAR: &'static str = "Teacher";
    const PLURAL: &'static str = "Teachers";
    const COLUMNS: &'static [&'static str] = &["First Name", "Last Name", "Email", "Specialization"];
    const FIELDS: &'static [Field] = &[
        Field::required("firstName", "First Name", FieldKind::Text),
        Field::required("lastName", "Last Name", FieldKind::Text),
        Field::required("email", "Email", FieldKind::Email),
        Field::optional("specialization", "Specialization", FieldKind::Text),
    ];

    async fn load_rows(state: &RegistrarState) -> RegistrarResult<Vec<Teacher>> {
        state.records::<Teacher>().list().await
    }

    fn row_id(row: &Teacher) -> RecordId {
        row.id
    }

    fn row_cells(row: &Teacher) -> Vec<Markup> {
        vec![
            html! {(row.first_name)},
            html! {(row.last_name)},
            html! { a href={"mailto:" (row.email)} class="text-blue-200 underline" {(row.email)} },
            html! {
                @if let Some(specialization) = &row.specialization {
                    (specialization)
                } @else {
                    span class="italic text-gray-400" {"-"}
                }
            },
        ]
    }

    fn values_of(record: &Teacher) -> FormValues {
        FormValues::default()
            .with("firstName", &record.first_name)
            .with("lastName", &record.last_name)
            .with("email", &record.email)
            .with(
                "specialization",
                record.specialization.clone().unwrap_or_default(),
            )
    }

    async fn prepare_draft(
        _state: &RegistrarState,
        values: &FormValues,
    ) -> RegistrarResult<TeacherDraft> {
        Ok(TeacherDraft {
            first_name: values.text("firstName"),
            last_name: values.text("lastName"),
            email: values.text("email"),
            specialization: values.optional_text("specialization"),
        })
    }
}
