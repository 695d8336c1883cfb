use crate::data::{HasProjection, RecordId, Reference, Resource};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: RecordId,
    pub student: Reference,
    pub course: Reference,
    #[serde(default)]
    pub enrollment_date: Option<Date>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDraft {
    pub student: Reference,
    pub course: Reference,
    pub enrollment_date: Date,
}

/// Server-computed row for the enrollments table.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDisplay {
    pub id: RecordId,
    #[serde(default)]
    pub student_id: Option<RecordId>,
    #[serde(default)]
    pub course_id: Option<RecordId>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub enrollment_date: Option<Date>,
}

impl Resource for Enrollment {
    const PATH: &'static str = "enrollments";
    type Draft = EnrollmentDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

impl HasProjection for Enrollment {
    type Projection = EnrollmentDisplay;
}
