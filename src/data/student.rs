use crate::data::{RecordId, Resource};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Resource for Student {
    const PATH: &'static str = "students";
    type Draft = StudentDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
