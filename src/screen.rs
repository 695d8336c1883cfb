//! The list + form + confirm-delete pattern shared by every entity screen.
//!
//! An [`EntityScreen`] describes one kind of record: its table columns, its
//! form fields and which of them are required, how to load its rows and how
//! to turn submitted form values into a draft for the Record Client. The
//! handlers in [`crate::routes::crud`] drive every screen through the same
//! Viewing -> Editing -> Submitting cycle.

use crate::{
    data::{RecordId, Resource},
    error::{MissingRequiredFieldSnafu, ParseDateSnafu, ParseRecordIdSnafu, RegistrarResult},
    state::RegistrarState,
};
use jiff::civil::Date;
use maud::Markup;
use serde::Deserialize;
use snafu::ResultExt;
use std::{collections::HashMap, future::Future};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    TextArea,
    Date,
    /// Choices come from [`EntityScreen::load_choices`] under the field's name.
    Select { placeholder: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: RecordId,
    pub label: String,
}

pub type Choices = HashMap<&'static str, Vec<SelectOption>>;

/// Raw submitted (or pre-populated) form values, keyed by field name.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn take(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).trim().is_empty()
    }

    pub fn text(&self, name: &str) -> String {
        self.get(name).trim().to_string()
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|text| !text.is_empty())
    }

    pub fn record_id(&self, name: &str, label: &'static str) -> RegistrarResult<Option<RecordId>> {
        let raw = self.get(name).trim();
        if raw.is_empty() {
            return Ok(None);
        }

        raw.parse::<RecordId>().map(Some).context(ParseRecordIdSnafu {
            label,
            original: raw,
        })
    }

    pub fn date(&self, name: &str) -> RegistrarResult<Option<Date>> {
        let raw = self.get(name).trim();
        if raw.is_empty() {
            return Ok(None);
        }

        raw.parse::<Date>()
            .map(Some)
            .context(ParseDateSnafu { original: raw })
    }

    /// Fails on the first required field left blank, in form order.
    pub fn ensure_required(&self, fields: &[Field]) -> RegistrarResult<()> {
        for field in fields.iter().filter(|field| field.required) {
            snafu::ensure!(
                !self.is_blank(field.name),
                MissingRequiredFieldSnafu { label: field.label }
            );
        }
        Ok(())
    }
}

/// Which form a screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    Creating,
    Editing(RecordId),
}

impl ScreenMode {
    pub const fn from_selected(selected: Option<RecordId>) -> Self {
        match selected {
            Some(id) => Self::Editing(id),
            None => Self::Creating,
        }
    }

    pub const fn selected(self) -> Option<RecordId> {
        match self {
            Self::Creating => None,
            Self::Editing(id) => Some(id),
        }
    }
}

pub trait EntityScreen: Send + Sync + 'static {
    type Resource: Resource;
    type Row: Send;

    /// Path segment for the screen's routes, e.g. `students`.
    const SLUG: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;
    /// Table columns between the ID column and the actions column.
    const COLUMNS: &'static [&'static str];
    const FIELDS: &'static [Field];

    fn load_rows(
        state: &RegistrarState,
    ) -> impl Future<Output = RegistrarResult<Vec<Self::Row>>> + Send;

    fn row_id(row: &Self::Row) -> RecordId;

    fn row_cells(row: &Self::Row) -> Vec<Markup>;

    fn load_choices(state: &RegistrarState) -> impl Future<Output = RegistrarResult<Choices>> + Send {
        let _ = state;
        async { Ok(Choices::new()) }
    }

    fn blank_values(state: &RegistrarState) -> FormValues {
        let _ = state;
        FormValues::default()
    }

    fn values_of(record: &Self::Resource) -> FormValues;

    /// Local checks run before anything is sent to the backend.
    fn validate(values: &FormValues) -> RegistrarResult<()> {
        values.ensure_required(Self::FIELDS)
    }

    fn prepare_draft(
        state: &RegistrarState,
        values: &FormValues,
    ) -> impl Future<Output = RegistrarResult<<Self::Resource as Resource>::Draft>> + Send;

    fn saved_message(mode: ScreenMode) -> String {
        match mode {
            ScreenMode::Creating => format!("{} created", Self::SINGULAR),
            ScreenMode::Editing(_) => format!("{} updated", Self::SINGULAR),
        }
    }
}
