use serde::{Deserialize, Serialize};

/// What the user told us: display name, role, and a free-text description of
/// what they are struggling with. Immutable once confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    pub role: String,
    pub struggle: String,
}

/// Structured advice returned by the inference backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub symptom: String,
    pub measure: String,
    pub follow_up: String,
    pub identified_symptoms: Vec<String>,
}

/// The three collector fields. `as_str()` doubles as the persistence key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldId {
    Name,
    Role,
    Struggle,
}

impl FieldId {
    pub const ALL: [FieldId; 3] = [FieldId::Name, FieldId::Role, FieldId::Struggle];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Role => "role",
            FieldId::Struggle => "struggle",
        }
    }
}
