use crate::data::{HasProjection, RecordId, Reference, Resource};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub teacher: Option<Reference>,
}

/// `teacher` is always sent, as `null` when unassigned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub title: String,
    pub description: Option<String>,
    pub teacher: Option<Reference>,
}

/// Server-computed row for the courses table.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourseDisplay {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<RecordId>,
    #[serde(default)]
    pub teacher_full_name: Option<String>,
}

impl Resource for Course {
    const PATH: &'static str = "courses";
    type Draft = CourseDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

impl HasProjection for Course {
    type Projection = CourseDisplay;
}
