use crate::data::{RecordId, Resource};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub specialization: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialization: Option<String>,
}

impl Resource for Teacher {
    const PATH: &'static str = "teachers";
    type Draft = TeacherDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
