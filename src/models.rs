use serde::{Deserialize, Serialize};

/// One voteable choice. This is also the persisted record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyOption {
    pub id: u64,
    pub name: String,
    pub count: u64,
}

impl SurveyOption {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            count: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddOptionRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptionView {
    pub id: u64,
    pub name: String,
    pub count: u64,
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub options: Vec<OptionView>,
    pub total_votes: u64,
}
