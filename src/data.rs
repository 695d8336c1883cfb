use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub mod course;
pub mod enrollment;
pub mod student;
pub mod teacher;

pub type RecordId = i64;

/// A reference to another record, sent as `{ "id": .. }`. Anything else the
/// backend nests alongside the id is ignored on read.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub id: RecordId,
}

impl From<RecordId> for Reference {
    fn from(id: RecordId) -> Self {
        Self { id }
    }
}

/// The full body of an update: the draft fields plus the id being replaced.
#[derive(Serialize, Debug)]
pub struct WithId<'a, D> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: &'a D,
}

/// One kind of record served by the backend under `/{PATH}`.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    const PATH: &'static str;

    /// Body sent to create a record, or (with an id) to replace one.
    type Draft: Serialize + Send + Sync;

    fn id(&self) -> RecordId;
}

/// Resources that also expose a server-computed display projection at `/{PATH}/dto`.
pub trait HasProjection: Resource {
    type Projection: DeserializeOwned + Send;
}
