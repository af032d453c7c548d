use serde::{Deserialize, Serialize};

/// A sequence row as seen inside a transaction, after it has been locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRow {
    pub id: i64,
    pub name: String,
    pub count: i64,
}

impl From<models::sequence::Model> for SequenceRow {
    fn from(m: models::sequence::Model) -> Self {
        Self { id: m.id, name: m.sequence_name, count: m.sequence_count }
    }
}
